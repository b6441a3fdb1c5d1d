//! 兜底内容生成
//!
//! 无法从 AI 响应中提取题目时，按请求的数量和题型生成确定性的占位题目。
//! 不依赖任何外部输入，永远不会失败。

use crate::extraction::shape::{QuestionShape, SimilarShape};
use crate::models::question::{
    Difficulty, Provenance, QuestionOption, QuestionRecord, QuestionType, SimilarQuestionRecord,
};
use crate::utils::text::char_window;

/// 兜底题干从学习材料中截取的窗口长度
const STEM_WINDOW_CHARS: usize = 20;
/// 相似题题干引用原题的最大长度
const SIMILAR_STEM_PREFIX_CHARS: usize = 60;

pub const FALLBACK_SIMILAR_EXPLANATION: &str = "基于原题的相似题，保持相同考点但更换了具体场景。";

const OPTION_TEMPLATES: [[&str; 4]; 3] = [
    [
        "选项A：这是第一个选项内容",
        "选项B：这是第二个选项内容",
        "选项C：这是第三个选项内容",
        "选项D：这是第四个选项内容",
    ],
    [
        "选项A：涉及核心知识点的内容",
        "选项B：常见干扰项，容易混淆",
        "选项C：部分正确但不完整",
        "选项D：完全错误的选项",
    ],
    [
        "选项A：符合题意的正确答案",
        "选项B：与题目相关但不够准确",
        "选项C：看似正确实则错误",
        "选项D：明显不符合题意",
    ],
];

const OPTION_KEYS: [&str; 4] = ["A", "B", "C", "D"];

/// 生成默认选项
///
/// 按 `index` 轮换三套模板，保证同一批题目的选项有所区别；填空题没有选项
pub fn default_options(question_type: QuestionType, index: usize) -> Vec<QuestionOption> {
    if !question_type.is_choice() {
        return Vec::new();
    }

    let template = &OPTION_TEMPLATES[index % OPTION_TEMPLATES.len()];
    OPTION_KEYS
        .iter()
        .zip(template.iter())
        .map(|(key, text)| QuestionOption::new(*key, *text))
        .collect()
}

/// 生成第 `index` 道兜底题目（从 0 开始）
pub fn fallback_question(shape: &QuestionShape<'_>, index: usize) -> QuestionRecord {
    let question_type = shape.type_at(index);
    let id = index + 1;
    let raw_type_text = question_type.display_text();
    let window = char_window(
        shape.material,
        index.saturating_mul(STEM_WINDOW_CHARS),
        STEM_WINDOW_CHARS,
    );

    QuestionRecord {
        id,
        question_type,
        stem: format!("{} {}: {}...", raw_type_text, id, window),
        options: default_options(question_type, index),
        answer: question_type.default_answer().to_string(),
        knowledge_points: vec!["AI生成题目".to_string()],
        difficulty: Difficulty::Medium,
        raw_type_text: raw_type_text.to_string(),
        source: Provenance::Fallback,
    }
}

/// 生成一整批兜底题目，数量为 `shape.total()`
pub fn fallback_questions(shape: &QuestionShape<'_>) -> Vec<QuestionRecord> {
    (0..shape.total())
        .map(|index| fallback_question(shape, index))
        .collect()
}

/// 生成第 `index` 道兜底相似题（从 0 开始）
pub fn fallback_similar_question(shape: &SimilarShape<'_>, index: usize) -> SimilarQuestionRecord {
    let number = index + 1;
    let prefix = char_window(shape.question, 0, SIMILAR_STEM_PREFIX_CHARS);

    SimilarQuestionRecord {
        id: number,
        question_type: shape.question_type,
        stem: format!("相似题 {}: {}...（场景变化 {}）", number, prefix, number),
        options: default_options(shape.question_type, index),
        answer: shape.answer_or_default(),
        explanation: FALLBACK_SIMILAR_EXPLANATION.to_string(),
        knowledge_points: vec!["相似题训练".to_string(), "考点巩固".to_string()],
        difficulty: Difficulty::escalating(index),
        source: Provenance::Fallback,
    }
}

/// 生成一整批兜底相似题，数量为 `shape.total()`
pub fn fallback_similar_questions(shape: &SimilarShape<'_>) -> Vec<SimilarQuestionRecord> {
    (0..shape.total())
        .map(|index| fallback_similar_question(shape, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::shape::{MAX_QUESTION_BATCH, MAX_SIMILAR_BATCH};

    const MATERIAL: &str = "细胞是生物体结构和功能的基本单位。细胞膜控制物质进出，细胞核是遗传信息库，线粒体是有氧呼吸的主要场所。";

    #[test]
    fn test_default_options_rotate() {
        let first = default_options(QuestionType::Single, 0);
        let fourth = default_options(QuestionType::Multi, 3);
        let second = default_options(QuestionType::Single, 1);

        assert_eq!(first.len(), 4);
        assert_eq!(first, fourth);
        assert_ne!(first, second);
        assert_eq!(
            first.iter().map(|o| o.key.as_str()).collect::<Vec<_>>(),
            vec!["A", "B", "C", "D"]
        );
        assert!(default_options(QuestionType::Blank, 0).is_empty());
    }

    #[test]
    fn test_fallback_questions_positional_types() {
        let shape = QuestionShape::new(MATERIAL, 2, 1, 2);
        let questions = fallback_questions(&shape);

        let types: Vec<QuestionType> = questions.iter().map(|q| q.question_type).collect();
        assert_eq!(
            types,
            vec![
                QuestionType::Single,
                QuestionType::Single,
                QuestionType::Multi,
                QuestionType::Blank,
                QuestionType::Blank,
            ]
        );
        assert_eq!(questions[2].answer, "AB");
        assert!(questions.iter().all(QuestionRecord::is_schema_valid));
    }

    #[test]
    fn test_fallback_stems_advance_through_material() {
        let shape = QuestionShape::new(MATERIAL, 3, 0, 0);
        let questions = fallback_questions(&shape);

        assert!(questions[0].stem.starts_with("单选题 1: 细胞是生物体结构和功能的基本单位。"));
        assert_ne!(questions[0].stem, questions[1].stem);
        assert!(questions[1].stem.starts_with("单选题 2: "));
    }

    #[test]
    fn test_fallback_questions_edge_counts() {
        assert!(fallback_questions(&QuestionShape::new(MATERIAL, 0, 0, 0)).is_empty());

        let capped = fallback_questions(&QuestionShape::new("", 30, 0, 0));
        assert_eq!(capped.len(), MAX_QUESTION_BATCH);
        // 材料为空时题干仍然非空
        assert!(capped.iter().all(QuestionRecord::is_schema_valid));
        let ids: std::collections::HashSet<usize> = capped.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), capped.len());
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let shape = QuestionShape::new(MATERIAL, 1, 2, 1);
        assert_eq!(fallback_questions(&shape), fallback_questions(&shape));
    }

    #[test]
    fn test_fallback_similar_questions() {
        let knowledge_points = vec!["浮力".to_string()];
        let shape = SimilarShape {
            question: "一个木块漂浮在水面上，它受到的浮力等于什么？",
            question_type: QuestionType::Single,
            correct_answer: Some("C"),
            knowledge_points: &knowledge_points,
            count: 8,
        };
        let similar = fallback_similar_questions(&shape);

        assert_eq!(similar.len(), MAX_SIMILAR_BATCH);
        assert!(similar.iter().all(|q| q.source == Provenance::Fallback));
        assert!(similar.iter().all(|q| q.answer == "C"));
        assert!(similar.iter().all(SimilarQuestionRecord::is_schema_valid));
        assert_eq!(
            similar.iter().map(|q| q.difficulty).collect::<Vec<_>>(),
            vec![
                Difficulty::Easy,
                Difficulty::Medium,
                Difficulty::Hard,
                Difficulty::Hard,
                Difficulty::Hard,
            ]
        );
        assert!(similar[1].stem.ends_with("（场景变化 2）"));
    }

    #[test]
    fn test_fallback_similar_blank_has_no_options() {
        let shape = SimilarShape {
            question: "水的沸点是____℃",
            question_type: QuestionType::Blank,
            correct_answer: None,
            knowledge_points: &[],
            count: 2,
        };
        let similar = fallback_similar_questions(&shape);
        assert!(similar.iter().all(|q| q.options.is_empty()));
        assert!(similar.iter().all(|q| !q.answer.is_empty()));
    }
}
