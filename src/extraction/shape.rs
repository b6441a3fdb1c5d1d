//! 调用方请求的输出形状
//!
//! 描述需要多少道题、什么题型，以及用于生成默认值的原题上下文。

use crate::models::question::QuestionType;

/// 一次出题最多返回的题目数
pub const MAX_QUESTION_BATCH: usize = 20;
/// 一次最多返回的相似题数
pub const MAX_SIMILAR_BATCH: usize = 5;

/// 出题请求的形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionShape<'a> {
    /// 学习材料，用于构造默认题干
    pub material: &'a str,
    pub single_count: usize,
    pub multi_count: usize,
    pub blank_count: usize,
}

impl<'a> QuestionShape<'a> {
    pub fn new(material: &'a str, single_count: usize, multi_count: usize, blank_count: usize) -> Self {
        Self {
            material,
            single_count,
            multi_count,
            blank_count,
        }
    }

    /// 实际输出的题目数（受上限约束）
    pub fn total(&self) -> usize {
        self.single_count
            .saturating_add(self.multi_count)
            .saturating_add(self.blank_count)
            .min(MAX_QUESTION_BATCH)
    }

    /// 第 `index` 道题（从 0 开始）的题型
    pub fn type_at(&self, index: usize) -> QuestionType {
        QuestionType::by_position(index, self.single_count, self.multi_count)
    }
}

/// 相似题请求的形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarShape<'a> {
    /// 原题题干
    pub question: &'a str,
    pub question_type: QuestionType,
    /// 原题正确答案
    pub correct_answer: Option<&'a str>,
    /// 原题知识点
    pub knowledge_points: &'a [String],
    pub count: usize,
}

impl<'a> SimilarShape<'a> {
    pub fn total(&self) -> usize {
        self.count.min(MAX_SIMILAR_BATCH)
    }

    /// 原题答案（忽略空白答案），没有时按题型给默认答案
    pub fn answer_or_default(&self) -> String {
        self.correct_answer
            .map(str::trim)
            .filter(|answer| !answer.is_empty())
            .unwrap_or_else(|| self.question_type.default_answer())
            .to_string()
    }
}
