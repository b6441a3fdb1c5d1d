//! 任务处理上下文
//!
//! 封装"我正在处理哪个任务文件"这一信息

use std::fmt::Display;
use std::path::Path;

use crate::models::request::TaskFile;

/// 任务处理上下文
#[derive(Debug, Clone)]
pub struct TaskCtx {
    /// 任务序号（从1开始，仅用于日志显示）
    pub task_index: usize,

    /// 任务名称
    pub name: String,

    /// 任务类型标识
    pub kind: &'static str,

    /// 来源文件，内存中构造的任务为 "<memory>"
    pub source_file: String,

    /// 输出文件名（不含扩展名）
    pub output_stem: String,
}

impl TaskCtx {
    /// 从任务文件创建上下文
    pub fn new(task: &TaskFile, task_index: usize) -> Self {
        let source_file = task
            .file_path
            .clone()
            .unwrap_or_else(|| "<memory>".to_string());

        let output_stem = task
            .file_path
            .as_deref()
            .and_then(|p| Path::new(p).file_stem())
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| sanitize_stem(&task.name, task_index));

        Self {
            task_index,
            name: task.name.clone(),
            kind: task.task.label(),
            source_file,
            output_stem,
        }
    }
}

/// 把任务名转成可用的文件名
fn sanitize_stem(name: &str, task_index: usize) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        format!("task_{}", task_index)
    } else {
        cleaned
    }
}

impl Display for TaskCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[任务 #{} {} ({})]", self.task_index, self.name, self.kind)
    }
}
