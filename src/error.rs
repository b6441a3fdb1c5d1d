use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 请求参数校验失败
    #[error("参数错误: {0}")]
    Validation(String),
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 任务文件内容错误
    #[error("任务错误: {0}")]
    Task(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少 API 密钥
    #[error("未设置 API 密钥，请设置环境变量 {var_name}")]
    MissingApiKey { var_name: String },
    /// API 密钥仍是示例值
    #[error("API 密钥仍是示例值，请替换为实际密钥")]
    PlaceholderApiKey,
    /// 数值配置不合法
    #[error("配置项 {name} 的值 {value} 不合法: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {0}")]
    RequestBuild(String),
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },
    /// 调用超时
    #[error("LLM 调用超时 (模型: {model}, {secs} 秒)")]
    Timeout { model: String, secs: u64 },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    JsonSerializeFailed(#[from] serde_json::Error),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建参数校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建LLM API调用错误
    pub fn llm_api_failed(model: impl Into<String>, source: async_openai::error::OpenAIError) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source,
        })
    }

    /// 是否为参数校验错误
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::JsonSerializeFailed(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::validation("请提供题目内容");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "参数错误: 请提供题目内容");

        let err: AppError = ConfigError::PlaceholderApiKey.into();
        assert!(err.to_string().starts_with("配置错误"));

        let err: AppError = LlmError::Timeout {
            model: "deepseek-chat".to_string(),
            secs: 90,
        }
        .into();
        assert_eq!(err.to_string(), "LLM错误: LLM 调用超时 (模型: deepseek-chat, 90 秒)");
        assert!(!err.is_validation());
    }
}
