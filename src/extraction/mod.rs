//! 提取与兜底引擎
//!
//! 把 AI 返回的自由文本转换为规范的题目记录：
//!
//! ```text
//! 原始文本 → 定位 (locator) → 宽松解析 (lenient) → 规范化 (normalizer) → 题目列表
//!            └────────────── 任一环节失败 ──────────────→ 兜底 (fallback)
//! ```
//!
//! 所有函数都是同步纯函数，对任何输入都不会失败，返回数量恰好等于请求数量（受上限约束）。
//! 走了哪条路径通过 [`ExtractionOutcome`] 交给调用方记录。

pub mod fallback;
pub mod lenient;
pub mod locator;
pub mod normalizer;
pub mod section;
pub mod shape;

use serde::Serialize;
use serde_json::Value;

use crate::models::question::{QuestionRecord, SimilarQuestionRecord};

pub use fallback::{default_options, fallback_questions, fallback_similar_questions};
pub use lenient::{parse_lenient, PayloadError};
pub use locator::{locate_payload, LocateStrategy};
pub use section::{extract_explanation, extract_section, first_meaningful_line, SECTION_PLACEHOLDER};
pub use shape::{QuestionShape, SimilarShape, MAX_QUESTION_BATCH, MAX_SIMILAR_BATCH};

/// 走兜底路径的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// 上游没有返回任何文本，不做定位与解析
    UpstreamUnavailable,
    /// 文本中找不到结构化片段
    NoPayload,
    /// 修复后仍无法解析
    Unparseable,
    /// 解析结果既不是数组也不是对象
    ShapeMismatch,
    /// 解析成功但条目数少于请求数，缺口由兜底补齐
    Shortfall,
}

/// 一次提取的过程记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutcome {
    /// 命中的定位策略
    pub strategy: Option<LocateStrategy>,
    /// 是否经过语法修复
    pub repaired: bool,
    /// 来自解析结果的记录数
    pub parsed_count: usize,
    /// 兜底生成的记录数
    pub synthesized_count: usize,
    pub fallback: Option<FallbackReason>,
}

impl ExtractionOutcome {
    /// 是否有任何记录来自兜底
    pub fn used_fallback(&self) -> bool {
        self.synthesized_count > 0
    }

    /// 是否全部记录都来自兜底
    pub fn fully_fallback(&self) -> bool {
        self.parsed_count == 0 && self.synthesized_count > 0
    }
}

/// 提取结果
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub records: Vec<T>,
    pub outcome: ExtractionOutcome,
}

/// 从 AI 响应中提取出题结果
///
/// `raw` 为 `None` 表示上游不可用，直接走兜底
pub fn extract_questions(raw: Option<&str>, shape: &QuestionShape<'_>) -> Extraction<QuestionRecord> {
    run_pipeline(raw, shape.total(), |entries| {
        normalizer::normalize_questions(entries, shape)
    })
}

/// 从 AI 响应中提取相似题
pub fn extract_similar_questions(
    raw: Option<&str>,
    shape: &SimilarShape<'_>,
) -> Extraction<SimilarQuestionRecord> {
    run_pipeline(raw, shape.total(), |entries| {
        normalizer::normalize_similar_questions(entries, shape)
    })
}

fn run_pipeline<T>(
    raw: Option<&str>,
    total: usize,
    normalize: impl FnOnce(&[Value]) -> (Vec<T>, usize),
) -> Extraction<T> {
    let mut outcome = ExtractionOutcome::default();

    let entries = match locate_and_parse(raw, &mut outcome) {
        Ok(entries) => entries,
        Err(reason) => {
            outcome.fallback = Some(reason);
            Vec::new()
        }
    };

    // 解析失败时条目为空，规范化阶段会把每个位置都交给兜底生成
    let (records, parsed_count) = normalize(&entries);
    outcome.parsed_count = parsed_count;
    outcome.synthesized_count = total - parsed_count;
    if outcome.fallback.is_none() && outcome.synthesized_count > 0 {
        outcome.fallback = Some(FallbackReason::Shortfall);
    }

    Extraction { records, outcome }
}

/// 定位并解析，命中的策略和是否修复记入 `outcome`
fn locate_and_parse(
    raw: Option<&str>,
    outcome: &mut ExtractionOutcome,
) -> Result<Vec<Value>, FallbackReason> {
    let raw = raw.ok_or(FallbackReason::UpstreamUnavailable)?;
    let located = locate_payload(raw).ok_or(FallbackReason::NoPayload)?;
    outcome.strategy = Some(located.strategy);

    let parsed = parse_lenient(located.text).map_err(|_| FallbackReason::Unparseable)?;
    outcome.repaired = parsed.repaired;

    normalizer::into_entries(parsed.value).ok_or(FallbackReason::ShapeMismatch)
}
