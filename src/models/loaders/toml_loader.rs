use crate::models::request::TaskFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载任务
pub async fn load_task_file(toml_file_path: &Path) -> Result<TaskFile> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut task: TaskFile = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    // 设置文件路径
    task.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(task)
}

/// 从文件夹中加载所有 TOML 任务文件
///
/// 解析失败的文件记录警告后跳过，不影响其他任务；结果按文件名排序
pub async fn load_all_task_files(folder_path: &str) -> Result<Vec<TaskFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut tasks = Vec::with_capacity(toml_files.len());
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_task_file(&path).await {
            Ok(task) => {
                tracing::info!("成功加载任务「{}」({})", task.name, task.task.label());
                tasks.push(task);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(tasks)
}
