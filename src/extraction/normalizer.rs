//! 题目规范化
//!
//! 把解析出的任意 JSON 对象映射为规范题目记录，缺失字段一律用确定性的默认值补齐。
//!
//! 题型严格按位置分配（前 `single_count` 道单选，接着 `multi_count` 道多选，其余填空），
//! 即使 AI 返回的条目自带 `type` 字段也以位置为准。

use serde_json::{Map, Value};
use tracing::debug;

use crate::extraction::fallback::{
    default_options, fallback_question, fallback_similar_question, FALLBACK_SIMILAR_EXPLANATION,
};
use crate::extraction::shape::{QuestionShape, SimilarShape};
use crate::models::question::{
    Difficulty, Provenance, QuestionOption, QuestionRecord, QuestionType, SimilarQuestionRecord,
};
use crate::utils::text::char_window;

/// 默认题干从学习材料中截取的窗口长度
const DEFAULT_STEM_WINDOW_CHARS: usize = 30;
const SIMILAR_STEM_PREFIX_CHARS: usize = 60;

/// 把解析结果整理为条目列表
///
/// 数组直接使用，单个对象包装为一个元素，其他类型返回 `None`
pub fn into_entries(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(_) => Some(vec![value]),
        _ => None,
    }
}

/// 取第 `index` 个条目，只有 JSON 对象才算有效的解析结果
fn object_entry(entries: &[Value], index: usize) -> Option<&Value> {
    entries.get(index).filter(|entry| entry.is_object())
}

/// 前 `total` 个条目中对象的数量
fn count_objects(entries: &[Value], total: usize) -> usize {
    entries.iter().take(total).filter(|entry| entry.is_object()).count()
}

/// 规范化出题结果
///
/// 输出数量恰好为 `shape.total()`；解析条目多余的部分截断，不足的位置由兜底题目补齐。
/// 数组中不是对象的元素（数字、`null`、嵌套数组等）同样由兜底题目替换。
/// 返回 (题目列表, 来自解析结果的题目数)
pub fn normalize_questions(
    entries: &[Value],
    shape: &QuestionShape<'_>,
) -> (Vec<QuestionRecord>, usize) {
    let total = shape.total();

    let records = (0..total)
        .map(|index| match object_entry(entries, index) {
            Some(entry) => normalize_question(entry, shape, index),
            None => fallback_question(shape, index),
        })
        .collect();

    (records, count_objects(entries, total))
}

/// 规范化单道题
pub fn normalize_question(entry: &Value, shape: &QuestionShape<'_>, index: usize) -> QuestionRecord {
    let fields = entry.as_object();
    let question_type = shape.type_at(index);
    let id = index + 1;

    if let Some(declared) = get_text(fields, "type").and_then(|t| QuestionType::parse_loose(&t)) {
        if declared != question_type {
            debug!(
                "第 {} 题声明的题型 {} 与请求位置要求的 {} 不一致，按位置处理",
                id, declared, question_type
            );
        }
    }

    let stem = get_text(fields, "stem").unwrap_or_else(|| {
        format!(
            "题目 {}: {}...",
            id,
            char_window(
                shape.material,
                index.saturating_mul(DEFAULT_STEM_WINDOW_CHARS),
                DEFAULT_STEM_WINDOW_CHARS
            )
        )
    });

    QuestionRecord {
        id,
        question_type,
        stem,
        options: resolve_options(fields, question_type, index),
        answer: get_answer(fields)
            .unwrap_or_else(|| question_type.default_answer().to_string()),
        knowledge_points: get_knowledge_points(fields)
            .unwrap_or_else(|| vec!["AI生成".to_string()]),
        difficulty: get_difficulty(fields),
        raw_type_text: question_type.display_text().to_string(),
        source: Provenance::AiGenerated,
    }
}

/// 规范化相似题结果
///
/// 返回 (相似题列表, 来自解析结果的题目数)
pub fn normalize_similar_questions(
    entries: &[Value],
    shape: &SimilarShape<'_>,
) -> (Vec<SimilarQuestionRecord>, usize) {
    let total = shape.total();

    let records = (0..total)
        .map(|index| match object_entry(entries, index) {
            Some(entry) => normalize_similar_question(entry, shape, index),
            None => fallback_similar_question(shape, index),
        })
        .collect();

    (records, count_objects(entries, total))
}

/// 规范化单道相似题，题型统一为原题题型
pub fn normalize_similar_question(
    entry: &Value,
    shape: &SimilarShape<'_>,
    index: usize,
) -> SimilarQuestionRecord {
    let fields = entry.as_object();
    let id = index + 1;
    let question_type = shape.question_type;

    let stem = get_text(fields, "stem").unwrap_or_else(|| {
        format!(
            "相似题 {}: {}...",
            id,
            char_window(shape.question, 0, SIMILAR_STEM_PREFIX_CHARS)
        )
    });

    let knowledge_points = get_knowledge_points(fields)
        .or_else(|| non_empty_points(shape.knowledge_points.iter().cloned()))
        .unwrap_or_else(|| vec!["AI生成相似题".to_string()]);

    SimilarQuestionRecord {
        id,
        question_type,
        stem,
        options: resolve_options(fields, question_type, index),
        answer: get_answer(fields).unwrap_or_else(|| shape.answer_or_default()),
        explanation: get_text(fields, "explanation")
            .unwrap_or_else(|| FALLBACK_SIMILAR_EXPLANATION.to_string()),
        knowledge_points,
        difficulty: get_difficulty(fields),
        source: Provenance::AiGenerated,
    }
}

// ========== 字段解析 ==========

type Fields<'a> = Option<&'a Map<String, Value>>;

fn get<'a>(fields: Fields<'a>, key: &str) -> Option<&'a Value> {
    fields.and_then(|map| map.get(key))
}

/// 字符串或数字转为非空文本
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn get_text(fields: Fields<'_>, key: &str) -> Option<String> {
    get(fields, key).and_then(scalar_text)
}

/// 答案可以是字符串、数字或字符串数组（多选题常见 `["A", "C"]`）
fn get_answer(fields: Fields<'_>) -> Option<String> {
    match get(fields, "answer")? {
        Value::Array(items) => {
            let joined: String = items.iter().filter_map(scalar_text).collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined)
            }
        }
        other => scalar_text(other),
    }
}

fn get_difficulty(fields: Fields<'_>) -> Difficulty {
    get_text(fields, "difficulty")
        .and_then(|d| Difficulty::parse_loose(&d))
        .unwrap_or_default()
}

/// 知识点可以是数组或单个字符串，结果为空时返回 `None`
fn get_knowledge_points(fields: Fields<'_>) -> Option<Vec<String>> {
    match get(fields, "knowledgePoints")? {
        Value::Array(items) => non_empty_points(items.iter().filter_map(scalar_text)),
        other => scalar_text(other).map(|point| vec![point]),
    }
}

fn non_empty_points(points: impl Iterator<Item = String>) -> Option<Vec<String>> {
    let points: Vec<String> = points
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();
    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

/// 选择题使用解析出的选项，没有时生成默认选项；填空题强制为空
fn resolve_options(fields: Fields<'_>, question_type: QuestionType, index: usize) -> Vec<QuestionOption> {
    if !question_type.is_choice() {
        return Vec::new();
    }

    let parsed = get(fields, "options").map(parse_options).unwrap_or_default();
    if parsed.is_empty() {
        default_options(question_type, index)
    } else {
        parsed
    }
}

/// 解析选项，支持三种写法：
/// - `[{"key": "A", "text": "..."}]`
/// - `["...", "..."]`，按位置分配字母
/// - `{"A": "...", "B": "..."}`
fn parse_options(value: &Value) -> Vec<QuestionOption> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .filter_map(|(pos, item)| match item {
                Value::Object(option) => {
                    let key = option
                        .get("key")
                        .and_then(scalar_text)
                        .unwrap_or_else(|| option_letter(pos));
                    let text = option.get("text").and_then(scalar_text).unwrap_or_default();
                    Some(QuestionOption::new(key, text))
                }
                other => scalar_text(other).map(|text| QuestionOption::new(option_letter(pos), text)),
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, text)| {
                scalar_text(text).map(|text| QuestionOption::new(key.trim(), text))
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn option_letter(pos: usize) -> String {
    match u8::try_from(pos) {
        Ok(offset) if offset < 26 => char::from(b'A' + offset).to_string(),
        _ => (pos + 1).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape(single: usize, multi: usize, blank: usize) -> QuestionShape<'static> {
        QuestionShape::new("牛顿第一定律指出，一切物体在没有受到外力作用时，总保持静止状态或匀速直线运动状态。", single, multi, blank)
    }

    #[test]
    fn test_into_entries() {
        assert_eq!(into_entries(json!([1, 2])).unwrap().len(), 2);
        assert_eq!(into_entries(json!({"stem": "x"})).unwrap().len(), 1);
        assert!(into_entries(json!("text")).is_none());
        assert!(into_entries(json!(42)).is_none());
    }

    #[test]
    fn test_full_entry_preserved() {
        let entry = json!({
            "stem": "2+2=?",
            "options": [{"key": "A", "text": "3"}, {"key": "B", "text": "4"}],
            "answer": "B",
            "knowledgePoints": ["加法"],
            "difficulty": "easy"
        });
        let record = normalize_question(&entry, &shape(1, 0, 0), 0);

        assert_eq!(record.question_type, QuestionType::Single);
        assert_eq!(record.stem, "2+2=?");
        assert_eq!(record.answer, "B");
        assert_eq!(record.options.len(), 2);
        assert_eq!(record.options[1], QuestionOption::new("B", "4"));
        assert_eq!(record.difficulty, Difficulty::Easy);
        assert_eq!(record.knowledge_points, vec!["加法".to_string()]);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let record = normalize_question(&json!({}), &shape(0, 1, 0), 0);

        assert_eq!(record.question_type, QuestionType::Multi);
        assert!(record.stem.starts_with("题目 1: 牛顿第一定律指出"));
        assert_eq!(record.answer, "AB");
        assert_eq!(record.options, default_options(QuestionType::Multi, 0));
        assert_eq!(record.knowledge_points, vec!["AI生成".to_string()]);
        assert_eq!(record.difficulty, Difficulty::Medium);
        assert_eq!(record.raw_type_text, "多选题");
        assert!(record.is_schema_valid());
    }

    #[test]
    fn test_position_wins_over_declared_type() {
        let entries = vec![
            json!({"type": "blank", "stem": "填空？", "options": [{"key": "A", "text": "x"}]}),
            json!({"type": "single", "stem": "单选？"}),
        ];
        let (records, parsed) = normalize_questions(&entries, &shape(1, 0, 1));

        assert_eq!(parsed, 2);
        assert_eq!(records[0].question_type, QuestionType::Single);
        assert_eq!(records[0].options, vec![QuestionOption::new("A", "x")]);
        assert_eq!(records[1].question_type, QuestionType::Blank);
        assert!(records[1].options.is_empty());
    }

    #[test]
    fn test_non_object_entries_use_fallback() {
        let entries = vec![json!(1), json!(null), json!({"stem": "第三题"}), json!(["A", "B"])];
        let (records, parsed) = normalize_questions(&entries, &shape(4, 0, 0));

        assert_eq!(parsed, 1);
        assert_eq!(records.len(), 4);
        assert_eq!(records[0], fallback_question(&shape(4, 0, 0), 0));
        assert_eq!(records[1].source, Provenance::Fallback);
        assert_eq!(records[2].stem, "第三题");
        assert_eq!(records[2].source, Provenance::AiGenerated);
        assert_eq!(records[3].source, Provenance::Fallback);
    }

    #[test]
    fn test_truncate_and_fill_shortfall() {
        let entries = vec![json!({"stem": "第一题"}), json!({"stem": "第二题"}), json!({"stem": "第三题"})];

        let (records, parsed) = normalize_questions(&entries, &shape(2, 0, 0));
        assert_eq!(parsed, 2);
        assert_eq!(records.len(), 2);

        let (records, parsed) = normalize_questions(&entries[..1], &shape(2, 1, 0));
        assert_eq!(parsed, 1);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].stem, "第一题");
        // 不足的部分由兜底题目补齐，而不是重复已有条目
        assert!(records[1].stem.starts_with("单选题 2: "));
        assert!(records[2].stem.starts_with("多选题 3: "));
    }

    #[test]
    fn test_tolerant_field_shapes() {
        let entry = json!({
            "stem": "  以下哪些是偶数？ ",
            "options": ["2", "3", "4"],
            "answer": ["A", "C"],
            "knowledgePoints": "奇偶性",
            "difficulty": "legendary"
        });
        let record = normalize_question(&entry, &shape(0, 1, 0), 0);

        assert_eq!(record.stem, "以下哪些是偶数？");
        assert_eq!(
            record.options.iter().map(|o| o.key.as_str()).collect::<Vec<_>>(),
            vec!["A", "B", "C"]
        );
        assert_eq!(record.answer, "AC");
        assert_eq!(record.knowledge_points, vec!["奇偶性".to_string()]);
        assert_eq!(record.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_options_as_map_and_numeric_answer() {
        let entry = json!({"options": {"A": "红", "B": "绿"}, "answer": 1, "knowledgePoints": []});
        let record = normalize_question(&entry, &shape(1, 0, 0), 0);

        assert_eq!(record.options, vec![QuestionOption::new("A", "红"), QuestionOption::new("B", "绿")]);
        assert_eq!(record.answer, "1");
        assert_eq!(record.knowledge_points, vec!["AI生成".to_string()]);
    }

    #[test]
    fn test_empty_strings_count_as_missing() {
        let entry = json!({"stem": "", "answer": "  ", "options": []});
        let record = normalize_question(&entry, &shape(1, 0, 0), 0);
        assert!(record.stem.starts_with("题目 1: "));
        assert_eq!(record.answer, "A");
        assert_eq!(record.options.len(), 4);
    }

    #[test]
    fn test_option_letter() {
        assert_eq!(option_letter(0), "A");
        assert_eq!(option_letter(25), "Z");
        assert_eq!(option_letter(26), "27");
    }

    #[test]
    fn test_similar_defaults_from_original() {
        let knowledge_points = vec!["勾股定理".to_string()];
        let shape = SimilarShape {
            question: "直角三角形两直角边分别为3和4，斜边长为多少？",
            question_type: QuestionType::Single,
            correct_answer: Some("B"),
            knowledge_points: &knowledge_points,
            count: 3,
        };
        let entries = vec![json!({"stem": "两直角边为6和8，斜边为？", "explanation": "勾股数的倍数"}), json!("oops")];

        let (records, parsed) = normalize_similar_questions(&entries, &shape);
        assert_eq!(parsed, 1);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].answer, "B");
        assert_eq!(records[0].explanation, "勾股数的倍数");
        assert_eq!(records[0].knowledge_points, knowledge_points);
        assert_eq!(records[0].source, Provenance::AiGenerated);

        // 字符串条目不算解析结果，按兜底题目处理
        assert!(records[1].stem.starts_with("相似题 2: 直角三角形"));
        assert_eq!(records[1].options.len(), 4);
        assert_eq!(records[1].explanation, FALLBACK_SIMILAR_EXPLANATION);
        assert_eq!(records[1].source, Provenance::Fallback);

        assert_eq!(records[2].source, Provenance::Fallback);
        assert!(records.iter().all(SimilarQuestionRecord::is_schema_valid));
    }

    #[test]
    fn test_similar_blank_forces_empty_options() {
        let shape = SimilarShape {
            question: "中国的首都是____",
            question_type: QuestionType::Blank,
            correct_answer: Some("北京"),
            knowledge_points: &[],
            count: 1,
        };
        let entry = json!({"stem": "日本的首都是____", "options": [{"key": "A", "text": "东京"}]});
        let record = normalize_similar_question(&entry, &shape, 0);

        assert!(record.options.is_empty());
        assert_eq!(record.answer, "北京");
        assert_eq!(record.knowledge_points, vec!["AI生成相似题".to_string()]);
    }
}
