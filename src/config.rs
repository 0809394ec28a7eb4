use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// 非文件来源的配置在错误信息中的名称
const INLINE_SOURCE: &str = "<inline>";

/// 程序配置
///
/// 凭据只在构造 `QuestionService` 时注入，核心逻辑不直接读取环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    /// LLM API 密钥，缺失时进入兜底题库模式
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 采样温度
    pub temperature: f32,
    // --- 出题配置 ---
    /// 每次生成的题目数量
    pub question_count: usize,
    /// 兜底模式下模拟网络延迟（毫秒）
    pub fallback_delay_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            llm_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            llm_model_name: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            question_count: 10,
            fallback_delay_ms: 1500,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置或无法解析的变量使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文本解析配置，缺失的键使用默认值
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse_toml(content, INLINE_SOURCE)
    }

    /// 从 TOML 文件加载配置
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse_toml(&content, &path.display().to_string())
    }

    /// `QUIZ_CONFIG` 指向配置文件时先加载文件，再叠加环境变量
    pub fn from_env_or_file() -> Result<Self, ConfigError> {
        match std::env::var("QUIZ_CONFIG") {
            Ok(path) if !path.trim().is_empty() => {
                Ok(Self::load(path.trim())?.with_env_overrides())
            }
            _ => Ok(Self::from_env()),
        }
    }

    /// 是否配置了可用的凭据
    pub fn has_credential(&self) -> bool {
        self.llm_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    fn parse_toml(content: &str, source_name: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Config>(content)
            .map(Config::normalized)
            .map_err(|e| ConfigError::TomlParseFailed {
                path: source_name.to_string(),
                source: e,
            })
    }

    fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// 用外部变量覆盖配置；空白值视为未设置，无法解析的值保留原配置
    fn with_overrides(self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            llm_api_key: var("API_KEY").or(self.llm_api_key),
            llm_api_base_url: var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
            temperature: parse_var(var("LLM_TEMPERATURE")).unwrap_or(self.temperature),
            question_count: parse_var(var("QUESTION_COUNT")).unwrap_or(self.question_count),
            fallback_delay_ms: parse_var(var("FALLBACK_DELAY_MS"))
                .unwrap_or(self.fallback_delay_ms),
            verbose_logging: parse_var(var("VERBOSE_LOGGING")).unwrap_or(self.verbose_logging),
        }
        .normalized()
    }

    /// 空白密钥视为未配置
    fn normalized(mut self) -> Self {
        self.llm_api_key = self
            .llm_api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        self
    }
}

fn parse_var<T: FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_credential() {
        let config = Config::default();
        assert!(!config.has_credential());
        assert_eq!(config.question_count, 10);
        assert_eq!(config.fallback_delay_ms, 1500);
    }

    #[test]
    fn test_toml_partial_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
            llm_api_key = "secret"
            question_count = 3
            "#,
        )
        .unwrap();

        assert!(config.has_credential());
        assert_eq!(config.question_count, 3);
        assert_eq!(config.llm_model_name, "gemini-2.5-flash");
        assert_eq!(config.fallback_delay_ms, 1500);
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        let config = Config::from_toml_str(r#"llm_api_key = "   ""#).unwrap();
        assert!(!config.has_credential());
        assert!(config.llm_api_key.is_none());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = Config::from_toml_str("question_count = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
    }

    #[test]
    fn test_inline_parse_error_names_source() {
        let err = Config::from_toml_str("question_count = \"many\"").unwrap_err();
        assert!(err.to_string().starts_with("TOML解析失败 (<inline>): "));
    }

    #[test]
    fn test_blank_override_keeps_file_key() {
        let file = Config::from_toml_str(r#"llm_api_key = "from-file""#).unwrap();
        let config = file.with_overrides(|name| match name {
            "API_KEY" => Some("   ".to_string()),
            "LLM_MODEL_NAME" => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.llm_api_key.as_deref(), Some("from-file"));
        assert_eq!(config.llm_model_name, "gemini-2.5-flash");
    }

    #[test]
    fn test_overrides_replace_and_ignore_unparsable() {
        let config = Config::default().with_overrides(|name| match name {
            "API_KEY" => Some("from-env".to_string()),
            "QUESTION_COUNT" => Some("5".to_string()),
            "FALLBACK_DELAY_MS" => Some("soon".to_string()),
            "VERBOSE_LOGGING" => Some("true".to_string()),
            _ => None,
        });

        assert_eq!(config.llm_api_key.as_deref(), Some("from-env"));
        assert_eq!(config.question_count, 5);
        assert_eq!(config.fallback_delay_ms, 1500);
        assert!(config.verbose_logging);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
