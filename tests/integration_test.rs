use ai_question_bank::error::AppResult;
use ai_question_bank::extraction::{extract_section, SECTION_PLACEHOLDER};
use ai_question_bank::models::{GenerateRequest, Provenance};
use ai_question_bank::services::GenerationParams;
use ai_question_bank::{
    extract_questions, App, Config, FallbackReason, LlmService, QuestionService, QuestionShape,
    QuestionType, TextGenerator,
};
use std::path::PathBuf;

/// 按调用顺序依次返回预设回复的生成器
struct ScriptedGenerator {
    replies: Vec<&'static str>,
    next: std::sync::atomic::AtomicUsize,
}

impl ScriptedGenerator {
    fn new(replies: Vec<&'static str>) -> Self {
        Self {
            replies,
            next: std::sync::atomic::AtomicUsize::new(0),
        }
    }
}

impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        _user_message: &str,
        _system_message: Option<&str>,
        _params: GenerationParams,
    ) -> AppResult<String> {
        let idx = self.next.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.replies[idx % self.replies.len()].to_string())
    }
}

fn temp_root(name: &str) -> PathBuf {
    let root = std::env::temp_dir().join(format!(
        "ai_question_bank_it_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&root).unwrap();
    root
}

#[test]
fn test_fenced_scenario() {
    let raw = "```json\n[{\"stem\":\"2+2=?\",\"options\":[{\"key\":\"A\",\"text\":\"3\"},{\"key\":\"B\",\"text\":\"4\"}],\"answer\":\"B\"}]\n```";
    let result = extract_questions(Some(raw), &QuestionShape::new("", 1, 0, 0));

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].question_type, QuestionType::Single);
    assert_eq!(result.records[0].stem, "2+2=?");
    assert_eq!(result.records[0].answer, "B");
    assert_eq!(result.records[0].options.len(), 2);
}

#[test]
fn test_prose_scenario() {
    let result = extract_questions(
        Some("no structure here"),
        &QuestionShape::new("一段用于出题的学习材料", 2, 1, 0),
    );

    let types: Vec<QuestionType> = result.records.iter().map(|r| r.question_type).collect();
    assert_eq!(types, vec![QuestionType::Single, QuestionType::Single, QuestionType::Multi]);
    assert!(result.records.iter().all(|r| r.options.len() == 4));
    assert!(result.records.iter().all(|r| r.source == Provenance::Fallback));
    assert_eq!(result.outcome.fallback, Some(FallbackReason::NoPayload));
}

#[test]
fn test_missing_section_scenario() {
    assert_eq!(extract_section("", "easy tricks"), SECTION_PLACEHOLDER);
    let text = "短\n也短";
    assert_eq!(extract_section(text, "easy tricks"), SECTION_PLACEHOLDER);
}

#[test]
fn test_coverage_for_all_small_shapes() {
    for single in 0..4 {
        for multi in 0..4 {
            for blank in 0..4 {
                let shape = QuestionShape::new("材料", single, multi, blank);
                let result = extract_questions(Some("[{\"stem\": \"唯一一题\"}]"), &shape);
                assert_eq!(result.records.len(), single + multi + blank);
                for (idx, record) in result.records.iter().enumerate() {
                    assert_eq!(record.question_type, shape.type_at(idx));
                    assert!(record.is_schema_valid());
                }
            }
        }
    }
}

#[test]
fn test_service_with_blocking_runtime() {
    let service = QuestionService::new(ScriptedGenerator::new(vec![
        "好的：[{stem: '细胞的控制中心是？', answer: 'C',}]",
    ]));
    let req = GenerateRequest::new("细胞核是细胞的控制中心，含有遗传物质。").with_counts(1, 0, 1);

    let response = tokio_test::block_on(service.generate(&req)).unwrap();
    assert!(response.success);
    assert!(response.data.extraction.repaired);
    assert_eq!(response.data.questions[0].stem, "细胞的控制中心是？");
    assert_eq!(response.data.questions[1].question_type, QuestionType::Blank);
    assert!(response.data.questions[1].options.is_empty());
}

#[tokio::test]
async fn test_app_runs_task_folder() {
    let root = temp_root("app");
    let task_folder = root.join("tasks");
    std::fs::create_dir_all(&task_folder).unwrap();

    std::fs::write(
        task_folder.join("01_generate.toml"),
        r#"
name = "水的沸腾"

[task]
kind = "generate"
material = "水在一个标准大气压下的沸点是100摄氏度，沸腾时温度保持不变。"
single_count = 1
multi_count = 0
blank_count = 0
"#,
    )
    .unwrap();
    std::fs::write(
        task_folder.join("02_explain.toml"),
        r#"
name = "沸点解析"

[task]
kind = "explain"
question = "水的沸点是多少摄氏度？"
correct_answer = "100"
"#,
    )
    .unwrap();

    let config = Config {
        max_concurrent_tasks: 1,
        task_folder: task_folder.to_string_lossy().to_string(),
        output_folder: root.join("output").to_string_lossy().to_string(),
        warn_file: root.join("warn.txt").to_string_lossy().to_string(),
        ..Config::default()
    };
    let generator = ScriptedGenerator::new(vec![
        "```json\n[{\"stem\": \"标准大气压下水的沸点是？\", \"answer\": \"B\", \"options\": [\"90℃\", \"100℃\"]}]\n```",
        "【核心知识点】标准大气压下水的沸点为100摄氏度\n【答案分析】答案为100，与材料一致",
    ]);

    let app = App::with_generator(config, generator);
    let stats = app.run().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.success, 2);
    assert_eq!(stats.failed, 0);
    assert!(!root.join("warn.txt").exists());

    assert!(root.join("output").join("01_generate.json").exists());
    assert!(root.join("output").join("02_explain.json").exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
#[ignore] // 默认忽略，需要真实的 API 密钥：cargo test -- --ignored
async fn test_generate_against_real_endpoint() {
    ai_question_bank::utils::logging::init(true);

    let config = Config::from_env();
    config.validate().expect("请设置 LLM_API_KEY");

    let service = QuestionService::new(LlmService::new(&config));
    let req = GenerateRequest::new(
        "光合作用是绿色植物利用光能，把二氧化碳和水合成有机物并释放氧气的过程，主要在叶绿体中进行。",
    )
    .with_counts(2, 1, 1);

    let response = service.generate(&req).await.expect("出题失败");
    println!("{}", serde_json::to_string_pretty(&response).unwrap());
    assert_eq!(response.data.questions.len(), 4);
    assert!(response.data.questions.iter().all(|q| q.is_schema_valid()));
}
