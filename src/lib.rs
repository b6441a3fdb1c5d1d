//! # AI Question Bank
//!
//! 把大模型返回的自由文本转换为结构完整的题目记录的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 提取引擎（Extraction）
//! - `extraction/` - 同步纯函数，对任何输入都返回符合规范的题目
//! - `locator` - 在文本中定位 JSON 片段
//! - `lenient` - 严格解析 + 一次语法修复
//! - `normalizer` - 字段补齐、题型按位置分配
//! - `fallback` - 确定性的兜底题目
//! - `section` - 从解析文本中拆分章节
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个请求
//! - `LlmService` - 调用兼容 OpenAI API 的模型
//! - `QuestionService` - 解析 / 相似题 / 出题 / 错题分析
//! - `WarnWriter` - 写 warn.txt 能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个任务文件"的完整处理流程
//! - `TaskCtx` - 上下文封装（任务名 + 来源文件）
//! - `TaskFlow` - 流程编排（调用服务 → 写结果 → 写警告）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量任务处理器，管理并发和统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod extraction;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use extraction::{
    extract_explanation, extract_questions, extract_similar_questions, Extraction,
    ExtractionOutcome, FallbackReason, QuestionShape, SimilarShape,
};
pub use models::{QuestionRecord, QuestionType, SimilarQuestionRecord, TaskFile, TaskKind};
pub use orchestrator::{App, RunStats};
pub use services::{LlmService, QuestionService, TextGenerator};
pub use workflow::{ProcessResult, TaskCtx, TaskFlow};
