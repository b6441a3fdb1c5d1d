//! 题目服务 - 业务能力层
//!
//! 四类操作：AI 解析、相似题、AI 出题、错题分析。
//!
//! 每个操作的步骤相同：校验参数 → 构建提示词 → 调用模型 → 交给提取引擎。
//! 模型调用失败不会作为错误返回，而是得到 `success = false` 且内容完整的兜底响应；
//! 只有参数校验失败才返回 `Err`。

use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};
use crate::extraction::{
    extract_explanation, extract_questions, extract_similar_questions, ExtractionOutcome,
    QuestionShape, SimilarShape, MAX_SIMILAR_BATCH,
};
use crate::models::explanation::ExplanationSections;
use crate::models::request::{AnalyzeRequest, ExplainRequest, GenerateRequest, SimilarRequest};
use crate::models::response::{
    timestamp_now, AnalysisReport, AnalysisResponse, ExplanationResponse, GeneratedFrom,
    GeneratedQuestionsData, GeneratedQuestionsResponse, HealthStatus, SimilarQuestionsData,
    SimilarQuestionsResponse,
};
use crate::services::llm_service::TextGenerator;
use crate::services::prompts::{self, MAX_ANALYZED_QUESTIONS};
use crate::utils::logging::truncate_text;

/// 学习材料最少字符数（去掉首尾空白后）
pub const MIN_MATERIAL_CHARS: usize = 10;

/// 题目服务
///
/// 职责：
/// - 处理单个请求
/// - 不关心任务文件和输出位置
pub struct QuestionService<G> {
    generator: G,
}

impl<G: TextGenerator> QuestionService<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// AI 解析题目
    pub async fn explain(&self, req: &ExplainRequest) -> AppResult<ExplanationResponse> {
        if req.question.trim().is_empty() {
            return Err(AppError::validation("请提供题目内容"));
        }

        let (user_message, system_message) = prompts::explain_prompt(req);
        debug!("解析题目: {}", truncate_text(req.question.trim(), 40));

        match self
            .generator
            .generate(&user_message, Some(&system_message), prompts::EXPLAIN_PARAMS)
            .await
        {
            Ok(text) => Ok(ExplanationResponse {
                success: true,
                data: extract_explanation(&text),
                message: "AI解析生成成功".to_string(),
                error: None,
            }),
            Err(e) => {
                warn!("AI解析失败，返回固定提示: {}", e);
                Ok(ExplanationResponse {
                    success: false,
                    data: ExplanationSections::unavailable(),
                    message: "AI解析失败，请稍后重试".to_string(),
                    error: Some(e.to_string()),
                })
            }
        }
    }

    /// 生成相似题
    pub async fn similar(&self, req: &SimilarRequest) -> AppResult<SimilarQuestionsResponse> {
        let question = req.question.trim();
        if question.is_empty() {
            return Err(AppError::validation("需要题目内容"));
        }

        let count = req.count.min(MAX_SIMILAR_BATCH);
        let shape = SimilarShape {
            question,
            question_type: req.question_type,
            correct_answer: req.correct_answer.as_deref(),
            knowledge_points: &req.knowledge_points,
            count,
        };

        info!("🎯 生成 {} 道相似题，题型: {}", count, req.question_type);
        let (user_message, system_message) = prompts::similar_prompt(req, count);

        let response = match self
            .generator
            .generate(&user_message, Some(&system_message), prompts::SIMILAR_PARAMS)
            .await
        {
            Ok(text) => {
                let extraction = extract_similar_questions(Some(&text), &shape);
                log_outcome("相似题", &extraction.outcome);

                let generated_from = if extraction.outcome.fully_fallback() {
                    GeneratedFrom::Fallback
                } else {
                    GeneratedFrom::Ai
                };
                let count = extraction.records.len();

                SimilarQuestionsResponse {
                    success: true,
                    data: SimilarQuestionsData {
                        similar_questions: extraction.records,
                        generated_from,
                        count,
                        note: format!("成功生成 {} 道相似题，每题都包含完整选项", count),
                        extraction: extraction.outcome,
                    },
                    error: None,
                }
            }
            Err(e) => {
                warn!("生成相似题失败，使用兜底题目: {}", e);
                let extraction = extract_similar_questions(None, &shape);
                let count = extraction.records.len();

                SimilarQuestionsResponse {
                    success: false,
                    data: SimilarQuestionsData {
                        similar_questions: extraction.records,
                        generated_from: GeneratedFrom::Fallback,
                        count,
                        note: "生成失败，请稍后重试".to_string(),
                        extraction: extraction.outcome,
                    },
                    error: Some("生成相似题失败，可能是网络问题或AI服务繁忙".to_string()),
                }
            }
        };

        Ok(response)
    }

    /// 根据学习材料出题
    pub async fn generate(&self, req: &GenerateRequest) -> AppResult<GeneratedQuestionsResponse> {
        let material = req.material.trim();
        if material.chars().count() < MIN_MATERIAL_CHARS {
            return Err(AppError::validation(format!(
                "请提供足够的学习材料（至少{}字）",
                MIN_MATERIAL_CHARS
            )));
        }

        let shape = QuestionShape::new(material, req.single_count, req.multi_count, req.blank_count);
        info!(
            "📊 计划生成 {} 题（单选:{}, 多选:{}, 填空:{}）",
            shape.total(),
            req.single_count,
            req.multi_count,
            req.blank_count
        );

        let (user_message, system_message) = prompts::generate_prompt(req);

        let response = match self
            .generator
            .generate(&user_message, Some(&system_message), prompts::GENERATE_PARAMS)
            .await
        {
            Ok(text) => {
                debug!("AI响应前200字符: {}", truncate_text(&text, 200));
                let extraction = extract_questions(Some(&text), &shape);
                log_outcome("出题", &extraction.outcome);
                let count = extraction.records.len();

                GeneratedQuestionsResponse {
                    success: true,
                    data: GeneratedQuestionsData {
                        questions: extraction.records,
                        count,
                        note: format!("AI智能出题完成，共生成 {} 道题目", count),
                        extraction: extraction.outcome,
                    },
                    error: None,
                }
            }
            Err(e) => {
                warn!("AI出题失败，使用备用题目: {}", e);
                let extraction = extract_questions(None, &shape);
                let count = extraction.records.len();

                GeneratedQuestionsResponse {
                    success: false,
                    data: GeneratedQuestionsData {
                        questions: extraction.records,
                        count,
                        note: "出题失败，返回备用题目".to_string(),
                        extraction: extraction.outcome,
                    },
                    error: Some("AI出题失败，可能是网络问题或AI服务繁忙".to_string()),
                }
            }
        };

        Ok(response)
    }

    /// 错题分析
    pub async fn analyze(&self, req: &AnalyzeRequest) -> AppResult<AnalysisResponse> {
        if req.wrong_questions.is_empty() {
            return Err(AppError::validation("没有错题数据"));
        }

        let analyzed_count = req.wrong_questions.len().min(MAX_ANALYZED_QUESTIONS);
        info!("📊 分析 {} 道错题", analyzed_count);
        let (user_message, system_message) = prompts::analyze_prompt(req);

        match self
            .generator
            .generate(&user_message, Some(&system_message), prompts::ANALYZE_PARAMS)
            .await
        {
            Ok(text) => Ok(AnalysisResponse {
                success: true,
                data: AnalysisReport {
                    overall_analysis: text,
                    generated_at: timestamp_now(),
                    analyzed_count,
                    recommendations: AnalysisReport::default_recommendations(),
                },
                error: None,
            }),
            Err(e) => {
                warn!("错题分析失败: {}", e);
                Ok(AnalysisResponse {
                    success: false,
                    data: AnalysisReport::unavailable(),
                    error: Some("错题分析失败".to_string()),
                })
            }
        }
    }

    /// 服务状态
    pub fn health(&self) -> HealthStatus {
        HealthStatus::current()
    }
}

fn log_outcome(operation: &str, outcome: &ExtractionOutcome) {
    match outcome.fallback {
        None => info!(
            "✅ {}: 成功解析 {} 道 (策略: {:?}, 修复: {})",
            operation, outcome.parsed_count, outcome.strategy, outcome.repaired
        ),
        Some(reason) => warn!(
            "⚠️ {}: 解析 {} 道，兜底 {} 道 (原因: {:?})",
            operation, outcome.parsed_count, outcome.synthesized_count, reason
        ),
    }
}
