//! 任务处理流程 - 流程层
//!
//! 核心职责：定义"一个任务文件"的完整处理流程
//!
//! 流程顺序：
//! 1. 按任务类型调用 QuestionService
//! 2. 把响应写入 OUTPUT_FOLDER/<文件名>.json
//! 3. 使用了兜底内容或参数错误时写入 warn.txt

use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::request::{TaskFile, TaskKind};
use crate::services::{QuestionService, TextGenerator, WarnWriter};
use crate::workflow::task_ctx::TaskCtx;

/// 任务处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessResult {
    /// 内容全部来自 AI
    Success,
    /// 部分或全部内容为兜底生成
    Fallback,
    /// 参数校验未通过，未调用模型
    Rejected,
}

/// 任务处理流程
///
/// - 编排单个任务的处理流程
/// - 决定何时写输出、何时写警告
/// - 只依赖业务能力（services）
pub struct TaskFlow<G> {
    question_service: QuestionService<G>,
    warn_writer: WarnWriter,
    output_folder: PathBuf,
    verbose_logging: bool,
}

/// 服务响应中与流程相关的信息
struct Rendered {
    body: serde_json::Value,
    used_fallback: bool,
    summary: String,
}

impl Rendered {
    fn new(response: &impl Serialize, used_fallback: bool, summary: String) -> AppResult<Self> {
        Ok(Self {
            body: serde_json::to_value(response)?,
            used_fallback,
            summary,
        })
    }
}

impl<G: TextGenerator> TaskFlow<G> {
    /// 创建新的任务处理流程
    pub fn new(config: &Config, generator: G) -> Self {
        Self {
            question_service: QuestionService::new(generator),
            warn_writer: WarnWriter::with_path(&config.warn_file),
            output_folder: PathBuf::from(&config.output_folder),
            verbose_logging: config.verbose_logging,
        }
    }

    pub fn question_service(&self) -> &QuestionService<G> {
        &self.question_service
    }

    pub async fn run(&self, task: &TaskFile, ctx: &TaskCtx) -> AppResult<ProcessResult> {
        info!("{} ▶ 开始处理", ctx);

        let rendered = match self.dispatch(&task.task).await {
            Ok(rendered) => rendered,
            Err(AppError::Validation(message)) => {
                warn!("{} ⚠️ 参数错误: {}", ctx, message);
                let body = json!({ "success": false, "error": message });
                self.write_output(ctx, &body).await?;
                self.write_warn(ctx, &format!("参数错误: {}", message)).await?;
                return Ok(ProcessResult::Rejected);
            }
            Err(e) => return Err(e),
        };

        if self.verbose_logging {
            info!("{} {}", ctx, rendered.summary);
        }

        let output_path = self.write_output(ctx, &rendered.body).await?;
        info!("{} ✓ 结果已写入 {}", ctx, output_path.display());

        if rendered.used_fallback {
            self.write_warn(ctx, &format!("使用了兜底内容: {}", rendered.summary))
                .await?;
            Ok(ProcessResult::Fallback)
        } else {
            Ok(ProcessResult::Success)
        }
    }

    /// 按任务类型调用对应的服务
    async fn dispatch(&self, task: &TaskKind) -> AppResult<Rendered> {
        let service = &self.question_service;
        match task {
            TaskKind::Explain(req) => {
                let resp = service.explain(req).await?;
                let summary = format!("解析完成 (success: {})", resp.success);
                Rendered::new(&resp, !resp.success, summary)
            }
            TaskKind::Similar(req) => {
                let resp = service.similar(req).await?;
                let outcome = &resp.data.extraction;
                let summary = format!(
                    "相似题 {} 道 (解析 {}, 兜底 {})",
                    resp.data.count, outcome.parsed_count, outcome.synthesized_count
                );
                Rendered::new(&resp, !resp.success || outcome.used_fallback(), summary)
            }
            TaskKind::Generate(req) => {
                let resp = service.generate(req).await?;
                let outcome = &resp.data.extraction;
                let summary = format!(
                    "出题 {} 道 (解析 {}, 兜底 {})",
                    resp.data.count, outcome.parsed_count, outcome.synthesized_count
                );
                Rendered::new(&resp, !resp.success || outcome.used_fallback(), summary)
            }
            TaskKind::Analyze(req) => {
                let resp = service.analyze(req).await?;
                let summary = format!("错题分析 {} 道", resp.data.analyzed_count);
                Rendered::new(&resp, !resp.success, summary)
            }
        }
    }

    /// 写入结果文件，返回文件路径
    async fn write_output(&self, ctx: &TaskCtx, body: &serde_json::Value) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.output_folder)
            .await
            .map_err(|e| AppError::file_write_failed(self.output_folder.display().to_string(), e))?;

        let path = output_path(&self.output_folder, &ctx.output_stem);
        let content = serde_json::to_string_pretty(body)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        Ok(path)
    }

    /// 写入警告日志
    async fn write_warn(&self, ctx: &TaskCtx, reason: &str) -> AppResult<()> {
        self.warn_writer
            .write(&ctx.name, &ctx.source_file, reason)
            .await?;

        warn!("{} ⚠️ 已写入 {}: {}", ctx, self.warn_writer.path(), reason);

        Ok(())
    }
}

fn output_path(folder: &Path, stem: &str) -> PathBuf {
    folder.join(format!("{}.json", stem))
}
