use async_openai::error::OpenAIError;
use thiserror::Error;

use crate::workflow::session::{LoadTicket, Phase};

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 出题错误
    #[error("出题错误: {0}")]
    Generation(#[from] GenerationError),
    /// 会话状态错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 终端读写错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 出题错误
///
/// 只在 `QuestionService` 内部流转，对外统一降级为兜底题库
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 构建请求失败
    #[error("构建LLM请求失败: {0}")]
    RequestBuild(#[source] OpenAIError),
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: OpenAIError,
    },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
    /// 解析后没有任何题目
    #[error("LLM没有返回任何题目")]
    NoQuestions,
    /// 题目结构不合法
    #[error("第 {index} 题不合法: {reason}")]
    InvalidQuestion { index: usize, reason: String },
}

/// 会话状态错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// 当前阶段不允许该操作
    #[error("阶段 {phase:?} 不允许执行 {action}")]
    InvalidTransition { phase: Phase, action: &'static str },
    /// 加载结果已过期（会话已重置或重新开始）
    #[error("加载票据 {ticket} 已过期")]
    StaleLoad { ticket: LoadTicket },
    /// 进入答题阶段但题目为空
    #[error("题目列表为空")]
    EmptyQuestionList,
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
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
}

// ========== 便捷构造函数 ==========

impl GenerationError {
    /// 创建LLM API调用错误
    pub fn api_call_failed(model: impl Into<String>, source: OpenAIError) -> Self {
        GenerationError::ApiCallFailed {
            model: model.into(),
            source,
        }
    }

    /// 创建题目结构错误
    pub fn invalid_question(index: usize, reason: impl Into<String>) -> Self {
        GenerationError::InvalidQuestion {
            index,
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
