//! LLM 服务 - 业务能力层
//!
//! 只负责"把提示词发给模型、拿回文本"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 DeepSeek, Azure, Doubao 等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 单次调用的采样参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub const fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// 文本生成能力
///
/// 题目服务只依赖这个 trait，测试时可以替换为固定返回值的实现
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        params: GenerationParams,
    ) -> impl Future<Output = AppResult<String>> + Send;
}

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 生成文本
/// - 每次调用受超时限制，不做重试
/// - 不解析返回内容
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    timeout: Duration,
}

impl LlmService {
    /// 创建新的 LLM 服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（兼容 OpenAI API 的服务）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: config.llm_model_name.clone(),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    /// - `params`: 采样参数
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白）
    ///
    /// # 示例
    /// ```no_run
    /// # use ai_question_bank::services::{GenerationParams, LlmService};
    /// # async fn example(service: &LlmService) -> ai_question_bank::error::AppResult<()> {
    /// let response = service.send_to_llm(
    ///     "你好，请介绍一下你自己",
    ///     Some("你是一个友好的助手"),
    ///     GenerationParams::new(0.7, 512),
    /// ).await?;
    /// println!("LLM 响应: {}", response);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        params: GenerationParams,
    ) -> AppResult<String> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.chars().count());

        // 构建消息列表
        let mut messages = Vec::new();

        // 添加系统消息（如果提供）
        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| LlmError::RequestBuild(e.to_string()))?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| LlmError::RequestBuild(e.to_string()))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        // 构建请求
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(params.temperature)
            .max_tokens(params.max_tokens)
            .build()
            .map_err(|e| LlmError::RequestBuild(e.to_string()))?;

        // 调用 API
        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                warn!("LLM API 调用超时 ({} 秒)", self.timeout.as_secs());
                LlmError::Timeout {
                    model: self.model_name.clone(),
                    secs: self.timeout.as_secs(),
                }
            })?
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                AppError::llm_api_failed(&self.model_name, e)
            })?;

        debug!("LLM API 调用成功");

        // 提取响应内容
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| LlmError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        Ok(content)
    }
}

impl TextGenerator for LlmService {
    async fn generate(
        &self,
        user_message: &str,
        system_message: Option<&str>,
        params: GenerationParams,
    ) -> AppResult<String> {
        self.send_to_llm(user_message, system_message, params).await
    }
}
