//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ### `batch_processor` - 批量任务处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载任务文件（Vec<TaskFile>）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<TaskFile>)
//!     ↓
//! workflow::TaskFlow (处理单个任务)
//!     ↓
//! services (能力层：question / llm / warn)
//!     ↓
//! extraction (提取与兜底引擎，纯函数)
//! ```
//!
//! 编排层只做调度和统计，不做具体业务判断。

pub mod batch_processor;

pub use batch_processor::{App, RunStats};
