//! 题目记录数据结构
//!
//! 引擎对外输出的规范化题目格式，序列化字段名与前端约定保持一致（camelCase）。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// 单选题
    #[default]
    Single,
    /// 多选题
    Multi,
    /// 填空题
    Blank,
}

impl QuestionType {
    /// 按批次位置分配题型：前 `single` 道为单选，接下来 `multi` 道为多选，其余为填空
    pub fn by_position(index: usize, single: usize, multi: usize) -> Self {
        if index < single {
            QuestionType::Single
        } else if index < single + multi {
            QuestionType::Multi
        } else {
            QuestionType::Blank
        }
    }

    /// 宽松解析题型字符串，支持英文标识和中文名称
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "single" | "单选" | "单选题" => Some(QuestionType::Single),
            "multi" | "multiple" | "多选" | "多选题" => Some(QuestionType::Multi),
            "blank" | "fill" | "填空" | "填空题" => Some(QuestionType::Blank),
            _ => None,
        }
    }

    /// 是否为选择题（需要选项）
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionType::Single | QuestionType::Multi)
    }

    /// 题型的中文显示名称
    pub fn display_text(self) -> &'static str {
        match self {
            QuestionType::Single => "单选题",
            QuestionType::Multi => "多选题",
            QuestionType::Blank => "填空题",
        }
    }

    /// 缺少答案时的默认答案
    pub fn default_answer(self) -> &'static str {
        match self {
            QuestionType::Single => "A",
            QuestionType::Multi => "AB",
            QuestionType::Blank => "待补充",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            QuestionType::Single => "single",
            QuestionType::Multi => "multi",
            QuestionType::Blank => "blank",
        };
        f.write_str(text)
    }
}

/// 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "easy" | "简单" | "容易" => Some(Difficulty::Easy),
            "medium" | "中等" | "适中" => Some(Difficulty::Medium),
            "hard" | "困难" | "难" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// 兜底相似题的难度递进：easy, medium, hard, hard, ...
    pub fn escalating(index: usize) -> Self {
        match index {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }
}

/// 选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub key: String,
    pub text: String,
}

impl QuestionOption {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// 题目来源标记，用于区分真实 AI 内容与兜底占位内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    #[serde(rename = "ai-generated")]
    AiGenerated,
    #[serde(rename = "ai-generated-fallback")]
    Fallback,
}

impl Provenance {
    pub fn is_fallback(self) -> bool {
        matches!(self, Provenance::Fallback)
    }
}

/// 规范化题目记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: usize,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub stem: String,
    pub options: Vec<QuestionOption>,
    pub answer: String,
    pub knowledge_points: Vec<String>,
    pub difficulty: Difficulty,
    pub raw_type_text: String,
    pub source: Provenance,
}

impl QuestionRecord {
    /// 检查记录是否满足规范格式
    ///
    /// 选择题必须有选项，填空题必须没有选项；题干、答案、知识点不能为空
    pub fn is_schema_valid(&self) -> bool {
        let options_ok = if self.question_type.is_choice() {
            !self.options.is_empty()
        } else {
            self.options.is_empty()
        };

        options_ok
            && !self.stem.trim().is_empty()
            && !self.answer.trim().is_empty()
            && !self.knowledge_points.is_empty()
            && self.knowledge_points.iter().all(|kp| !kp.trim().is_empty())
    }
}

/// 相似题记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarQuestionRecord {
    pub id: usize,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub stem: String,
    pub options: Vec<QuestionOption>,
    pub answer: String,
    pub explanation: String,
    pub knowledge_points: Vec<String>,
    pub difficulty: Difficulty,
    pub source: Provenance,
}

impl SimilarQuestionRecord {
    pub fn is_schema_valid(&self) -> bool {
        let options_ok = if self.question_type.is_choice() {
            !self.options.is_empty()
        } else {
            self.options.is_empty()
        };

        options_ok
            && !self.stem.trim().is_empty()
            && !self.answer.trim().is_empty()
            && !self.explanation.trim().is_empty()
            && !self.knowledge_points.is_empty()
    }
}
