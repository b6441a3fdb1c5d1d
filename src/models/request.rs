//! 请求数据结构
//!
//! 四类操作的入参，既可以在代码中直接构造，也可以从任务 TOML 文件反序列化。

use serde::{Deserialize, Serialize};

use crate::models::question::{QuestionOption, QuestionType};

/// AI 解析请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub knowledge_points: Vec<String>,
    #[serde(default)]
    pub question_type: Option<QuestionType>,
}

fn default_similar_count() -> usize {
    3
}

/// 相似题请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarRequest {
    pub question: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub knowledge_points: Vec<String>,
    /// 期望生成的数量，上限 5
    #[serde(default = "default_similar_count")]
    pub count: usize,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl SimilarRequest {
    pub fn new(question: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            question: question.into(),
            correct_answer: None,
            question_type,
            knowledge_points: Vec::new(),
            count: default_similar_count(),
            options: Vec::new(),
        }
    }
}

fn default_single_count() -> usize {
    3
}

fn default_multi_count() -> usize {
    2
}

fn default_blank_count() -> usize {
    1
}

/// AI 出题请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// 学习材料
    pub material: String,
    #[serde(default = "default_single_count")]
    pub single_count: usize,
    #[serde(default = "default_multi_count")]
    pub multi_count: usize,
    #[serde(default = "default_blank_count")]
    pub blank_count: usize,
}

impl GenerateRequest {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            single_count: default_single_count(),
            multi_count: default_multi_count(),
            blank_count: default_blank_count(),
        }
    }

    pub fn with_counts(mut self, single: usize, multi: usize, blank: usize) -> Self {
        self.single_count = single;
        self.multi_count = multi;
        self.blank_count = blank;
        self
    }
}

/// 一道错题
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrongQuestion {
    pub question: String,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub correct_answer: String,
}

/// 错题分析请求
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub wrong_questions: Vec<WrongQuestion>,
}

/// 任务文件中的一个任务，按 `kind` 区分
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    Explain(ExplainRequest),
    Similar(SimilarRequest),
    Generate(GenerateRequest),
    Analyze(AnalyzeRequest),
}

impl TaskKind {
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Explain(_) => "explain",
            TaskKind::Similar(_) => "similar",
            TaskKind::Generate(_) => "generate",
            TaskKind::Analyze(_) => "analyze",
        }
    }
}

/// 任务文件
///
/// ```toml
/// name = "光合作用练习"
///
/// [task]
/// kind = "generate"
/// material = "光合作用是绿色植物……"
/// single_count = 2
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFile {
    pub name: String,
    pub task: TaskKind,
    /// 文件路径（加载时设置）
    #[serde(skip)]
    pub file_path: Option<String>,
}
