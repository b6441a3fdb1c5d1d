//! 批量任务处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量任务的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：检查配置、写日志文件头、创建 LLM 客户端
//! 2. **批量加载**：扫描并加载所有任务文件（`Vec<TaskFile>`）
//! 3. **并发控制**：使用 Semaphore 限制同时处理的任务数
//! 4. **全局统计**：汇总所有任务的处理结果
//!
//! 单个任务的细节交给 `workflow::TaskFlow`。

use crate::config::Config;
use crate::models::request::TaskFile;
use crate::services::{LlmService, TextGenerator};
use crate::utils::logging::{
    init_log_file, log_startup, log_tasks_loaded, print_final_stats,
};
use crate::workflow::{ProcessResult, TaskCtx, TaskFlow};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App<G = LlmService> {
    config: Config,
    flow: Arc<TaskFlow<G>>,
}

impl App<LlmService> {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;

        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(config.max_concurrent_tasks, &config.llm_model_name);

        let llm_service = LlmService::new(&config);
        Ok(Self::with_generator(config, llm_service))
    }
}

impl<G: TextGenerator + 'static> App<G> {
    /// 使用指定的文本生成器创建应用
    pub fn with_generator(config: Config, generator: G) -> Self {
        let flow = Arc::new(TaskFlow::new(&config, generator));
        Self { config, flow }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        // 加载所有待处理的任务
        let tasks = self.load_tasks().await?;

        if tasks.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML文件，程序结束");
            return Ok(RunStats::default());
        }

        log_tasks_loaded(tasks.len(), self.config.max_concurrent_tasks);

        let stats = self.process_all_tasks(tasks).await?;

        // 输出最终统计
        print_final_stats(
            stats.success,
            stats.fallback,
            stats.rejected + stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 加载任务
    async fn load_tasks(&self) -> Result<Vec<TaskFile>> {
        info!("\n📁 正在扫描待处理的任务...");
        crate::models::load_all_task_files(&self.config.task_folder).await
    }

    /// 并发处理所有任务
    pub async fn process_all_tasks(&self, tasks: Vec<TaskFile>) -> Result<RunStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_tasks.max(1)));
        let mut handles = Vec::with_capacity(tasks.len());

        for (idx, task) in tasks.into_iter().enumerate() {
            let ctx = TaskCtx::new(&task, idx + 1);
            let permit = semaphore.clone().acquire_owned().await?;
            let flow = Arc::clone(&self.flow);
            let task_index = ctx.task_index;

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match flow.run(&task, &ctx).await {
                    Ok(result) => Ok(result),
                    Err(e) => {
                        error!("{} ❌ 处理过程中发生错误: {}", ctx, e);
                        Err(e)
                    }
                }
            });
            handles.push((task_index, handle));
        }

        // 等待所有任务完成
        let mut stats = RunStats {
            total: handles.len(),
            ..Default::default()
        };

        for (task_index, handle) in handles {
            match handle.await {
                Ok(Ok(ProcessResult::Success)) => stats.success += 1,
                Ok(Ok(ProcessResult::Fallback)) => stats.fallback += 1,
                Ok(Ok(ProcessResult::Rejected)) => stats.rejected += 1,
                Ok(Err(_)) => stats.failed += 1,
                Err(e) => {
                    error!("[任务 #{}] 任务执行失败: {}", task_index, e);
                    stats.failed += 1;
                }
            }
        }

        Ok(stats)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    /// 内容全部来自 AI
    pub success: usize,
    /// 使用了兜底内容
    pub fallback: usize,
    /// 参数错误
    pub rejected: usize,
    /// 写文件等意外错误
    pub failed: usize,
}
