//! 提示词构建
//!
//! 每个函数返回 (user_message, system_message)，与 `LlmService::send_to_llm` 的参数对应。

use crate::models::question::QuestionOption;
use crate::models::request::{AnalyzeRequest, ExplainRequest, GenerateRequest, SimilarRequest};
use crate::services::llm_service::GenerationParams;
use crate::utils::logging::truncate_text;

/// 学习材料最多发送给模型的字符数
pub const MATERIAL_PROMPT_CHARS: usize = 1500;
/// 错题分析时每道题题干的最大字符数
pub const WRONG_QUESTION_PROMPT_CHARS: usize = 80;
/// 错题分析最多包含的题目数
pub const MAX_ANALYZED_QUESTIONS: usize = 5;

pub const EXPLAIN_PARAMS: GenerationParams = GenerationParams::new(0.7, 2000);
pub const SIMILAR_PARAMS: GenerationParams = GenerationParams::new(0.8, 4000);
pub const GENERATE_PARAMS: GenerationParams = GenerationParams::new(0.7, 3000);
pub const ANALYZE_PARAMS: GenerationParams = GenerationParams::new(0.7, 2000);

const EXPLAIN_SYSTEM: &str =
    "你是一位专业的教学助手，擅长解析题目。请用中文回答，结构清晰，重点内容加粗显示，确保解析准确、全面。";
const SIMILAR_SYSTEM: &str = "你是一位专业的出题专家，擅长生成高质量、无歧义的相似题目。请确保新题与原题考点一致但内容不同，提供完整选项和解析，返回规范的JSON数组。";
const GENERATE_SYSTEM: &str = "你是一位专业的出题老师，请根据用户提供的学习材料生成练习题。确保题目覆盖材料中的重要知识点，难度适中，格式规范。直接返回JSON数组，不要额外的解释文字。";
const ANALYZE_SYSTEM: &str =
    "你是一位专业的教学分析师，擅长通过错题分析学习情况。请提供专业、实用、鼓励性的建议。";

fn option_lines(options: &[QuestionOption]) -> String {
    options
        .iter()
        .map(|opt| format!("{}. {}", opt.key, opt.text))
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// AI 解析提示词
pub fn explain_prompt(req: &ExplainRequest) -> (String, String) {
    let mut prompt = format!("请对以下题目进行解析：\n\n【题目】\n{}", req.question.trim());

    if !req.options.is_empty() {
        prompt.push_str("\n\n【选项】\n");
        prompt.push_str(&option_lines(&req.options));
    }

    prompt.push_str(&format!(
        "\n\n【正确答案】\n{}",
        non_blank(req.correct_answer.as_deref()).unwrap_or("未提供")
    ));

    if let Some(user_answer) = non_blank(req.user_answer.as_deref()) {
        prompt.push_str(&format!("\n\n【用户答案】\n{}", user_answer));
    }

    if !req.knowledge_points.is_empty() {
        prompt.push_str(&format!("\n\n【知识点】\n{}", req.knowledge_points.join("、")));
    }

    prompt.push_str(
        "\n\n请提供以下解析（每部分用【标题】标出，重点内容用**加粗**）：\
         \n1. 【核心知识点】总结核心考点\
         \n2. 【答案分析】分析正确选项和错误选项\
         \n3. 【易错点】指出常见错误\
         \n4. 【解题技巧】提供解题方法\
         \n5. 【拓展延伸】提供相关拓展知识",
    );

    (prompt, EXPLAIN_SYSTEM.to_string())
}

/// 相似题提示词，`count` 为已经截断到上限后的数量
pub fn similar_prompt(req: &SimilarRequest, count: usize) -> (String, String) {
    let mut prompt = format!(
        "请根据原题生成 {} 道高质量相似题：\n\n【原题信息】\n题目：{}\n题型：{}\n正确答案：{}",
        count,
        req.question.trim(),
        req.question_type.display_text(),
        non_blank(req.correct_answer.as_deref()).unwrap_or("未提供"),
    );

    if !req.knowledge_points.is_empty() {
        prompt.push_str(&format!("\n知识点：{}", req.knowledge_points.join("、")));
    }

    if !req.options.is_empty() {
        prompt.push_str("\n\n【原题选项】\n");
        prompt.push_str(&option_lines(&req.options));
    }

    prompt.push_str(&format!(
        r#"

【生成要求】
1. 保持相同考点和难度，但改变具体场景、数值、表述方式
2. 不要直接复制原题，要有创新性
3. 每道题都要提供正确答案和解析
4. 如果是选择题，必须提供完整的4个选项（A、B、C、D）
5. 确保题目逻辑严谨，没有歧义
6. 每道题都要标注难度（easy/medium/hard）
7. 每道题都要标注相关知识点

【返回格式】
请以JSON数组格式返回，每道题包含以下字段：
{{
  "stem": "题目内容",
  "options": [{{"key": "A", "text": "选项内容"}}, {{"key": "B", "text": "选项内容"}}, ...],
  "answer": "正确答案（如'A'或'AB'）",
  "explanation": "解析说明",
  "difficulty": "难度（easy/medium/hard）",
  "knowledgePoints": ["知识点1", "知识点2"]
}}

请生成 {} 道不同的相似题，确保多样性。"#,
        count
    ));

    (prompt, SIMILAR_SYSTEM.to_string())
}

/// AI 出题提示词
pub fn generate_prompt(req: &GenerateRequest) -> (String, String) {
    let material = req.material.trim();
    let excerpt: String = material.chars().take(MATERIAL_PROMPT_CHARS).collect();
    let truncated_marker = if material.chars().count() > MATERIAL_PROMPT_CHARS {
        "...（内容已截断）"
    } else {
        ""
    };

    let prompt = format!(
        r#"请根据以下学习材料生成练习题：

学习材料：
"{}"{}

要求：
1. 生成 {} 道单选题
2. 生成 {} 道多选题
3. 生成 {} 道填空题
4. 每道题都要有：题干、选项（选择题）、正确答案、知识点
5. 题目要覆盖材料中的重要内容
6. 难度适中，适合练习使用
7. 按单选、多选、填空的顺序排列

请以JSON数组格式返回，每道题的结构如下：
{{
  "type": "single" 或 "multi" 或 "blank",
  "stem": "题目内容",
  "options": [{{"key": "A", "text": "选项内容"}}, {{"key": "B", "text": "选项内容"}}, ...],
  "answer": "正确答案",
  "knowledgePoints": ["知识点1", "知识点2"],
  "difficulty": "easy" 或 "medium" 或 "hard"
}}

注意：如果是填空题，options字段为空数组[]"#,
        excerpt, truncated_marker, req.single_count, req.multi_count, req.blank_count
    );

    (prompt, GENERATE_SYSTEM.to_string())
}

/// 错题分析提示词，只包含前 [`MAX_ANALYZED_QUESTIONS`] 道错题
pub fn analyze_prompt(req: &AnalyzeRequest) -> (String, String) {
    let listing = req
        .wrong_questions
        .iter()
        .take(MAX_ANALYZED_QUESTIONS)
        .enumerate()
        .map(|(i, wq)| {
            format!(
                "第{}题：{}\n你的答案：{}，正确答案：{}\n",
                i + 1,
                truncate_text(wq.question.trim(), WRONG_QUESTION_PROMPT_CHARS),
                non_blank(wq.user_answer.as_deref()).unwrap_or("未作答"),
                wq.correct_answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        r#"请分析以下错题，为学生提供学习建议：

【错题列表】
{}

【分析要求】
请提供：
1. 整体错误分析（主要犯错原因）
2. 薄弱知识点总结
3. 具体的学习建议和复习计划
4. 推荐的练习重点

请用清晰、有条理的方式组织内容，语气鼓励，帮助学生建立信心。"#,
        listing
    );

    (prompt, ANALYZE_SYSTEM.to_string())
}
