//! 响应数据结构
//!
//! 与前端约定的 JSON 格式（camelCase）。上游失败时 `success` 为 false，
//! 但 `data` 依然是结构完整的兜底内容。

use serde::Serialize;

use crate::extraction::ExtractionOutcome;
use crate::models::explanation::ExplanationSections;
use crate::models::question::{QuestionRecord, SimilarQuestionRecord};

/// 服务名称
pub const SERVICE_NAME: &str = "智能题库AI服务";
/// 服务版本
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// 功能列表
pub const SERVICE_FEATURES: [&str; 4] = ["AI解析", "多题相似题生成", "AI智能出题", "错题分析"];

/// 统一的时间戳格式
pub fn timestamp_now() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// AI 解析响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationResponse {
    pub success: bool,
    pub data: ExplanationSections,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 相似题内容来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratedFrom {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarQuestionsData {
    pub similar_questions: Vec<SimilarQuestionRecord>,
    pub generated_from: GeneratedFrom,
    pub count: usize,
    pub note: String,
    pub extraction: ExtractionOutcome,
}

/// 相似题响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarQuestionsResponse {
    pub success: bool,
    pub data: SimilarQuestionsData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestionsData {
    pub questions: Vec<QuestionRecord>,
    pub count: usize,
    pub note: String,
    pub extraction: ExtractionOutcome,
}

/// AI 出题响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedQuestionsResponse {
    pub success: bool,
    pub data: GeneratedQuestionsData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 错题分析报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub overall_analysis: String,
    pub generated_at: String,
    pub analyzed_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// 分析服务不可用时的固定报告
    pub fn unavailable() -> Self {
        Self {
            overall_analysis: "错题分析功能暂时不可用，建议您：\n1. 整理错题本\n2. 重点复习错误知识点\n3. 定期回顾\n\n系统将尽快恢复服务。".to_string(),
            generated_at: timestamp_now(),
            analyzed_count: 0,
            recommendations: Vec::new(),
        }
    }

    /// 固定的学习建议
    pub fn default_recommendations() -> Vec<String> {
        vec![
            "建议每天复习错题30分钟".to_string(),
            "重点关注薄弱知识点".to_string(),
            "多做类似题目巩固".to_string(),
        ]
    }
}

/// 错题分析响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    pub data: AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 服务状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub version: String,
    pub features: Vec<String>,
}

impl HealthStatus {
    pub fn current() -> Self {
        Self {
            success: true,
            message: format!("{}运行正常", SERVICE_NAME),
            timestamp: timestamp_now(),
            version: SERVICE_VERSION.to_string(),
            features: SERVICE_FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }
}
