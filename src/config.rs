use crate::error::{AppResult, ConfigError};

/// 未设置密钥时的占位值，与常见 `.env` 模板一致
const PLACEHOLDER_API_KEY: &str = "sk-xxxxxxxxxxxxxxxx";

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的任务数量
    pub max_concurrent_tasks: usize,
    /// 任务 TOML 文件存放目录
    pub task_folder: String,
    /// 结果 JSON 输出目录
    pub output_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 兜底 / 失败任务记录文件
    pub warn_file: String,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次 LLM 调用的超时时间（秒）
    pub llm_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 4,
            task_folder: "tasks".to_string(),
            output_folder: "output".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            warn_file: "warn.txt".to_string(),
            llm_api_key: PLACEHOLDER_API_KEY.to_string(),
            llm_api_base_url: "https://api.deepseek.com/v1".to_string(),
            llm_model_name: "deepseek-chat".to_string(),
            llm_timeout_secs: 90,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_tasks: std::env::var("MAX_CONCURRENT_TASKS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_tasks),
            task_folder: std::env::var("TASK_FOLDER").unwrap_or(default.task_folder),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
            llm_api_key: std::env::var("LLM_API_KEY")
                .or_else(|_| std::env::var("DEEPSEEK_API_KEY"))
                .unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.llm_timeout_secs),
        }
    }

    /// 启动前检查配置
    ///
    /// 密钥为空或仍是 `xxxx` 形式的示例值时拒绝启动
    pub fn validate(&self) -> AppResult<()> {
        let key = self.llm_api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey {
                var_name: "LLM_API_KEY".to_string(),
            }
            .into());
        }
        if key.contains("xxxx") {
            return Err(ConfigError::PlaceholderApiKey.into());
        }
        if self.max_concurrent_tasks == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_CONCURRENT_TASKS".to_string(),
                value: "0".to_string(),
                reason: "至少为 1".to_string(),
            }
            .into());
        }
        if self.llm_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "LLM_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
                reason: "至少为 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}
