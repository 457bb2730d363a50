use reqwest::header::HeaderValue;
use reqwest::Url;
use std::fmt;

use super::client_context::ClientContext;
use super::errors::ConfigError;

/// 默认收集端点
pub const DEFAULT_ENDPOINT: &str = "http://20.244.56.144/evaluation-service/logs";

/// 默认客户端标识 (作为 `User-Agent` 请求头发送)
pub const DEFAULT_CLIENT_ID: &str = "LoggingMiddleware/1.0.0";

/// 日志发射器配置
///
/// 访问令牌来自外部配置,绝不写入源码。
/// `Debug` 输出与 `summary_for_logging` 均不包含令牌明文。
#[derive(Clone, PartialEq, Eq)]
pub struct EmitterConfig {
    /// 收集端点完整地址
    pub endpoint: String,

    /// Bearer 访问令牌
    pub access_token: String,

    /// 客户端标识
    pub client_id: String,

    /// 客户端上下文 (user agent / 来源地址)
    pub context: ClientContext,
}

impl EmitterConfig {
    /// 创建新的配置,端点与客户端标识取默认值
    ///
    /// # 示例
    /// ```
    /// use logging_middleware::models::EmitterConfig;
    ///
    /// let config = EmitterConfig::new("token-abc".to_string());
    /// assert_eq!(config.client_id, "LoggingMiddleware/1.0.0");
    /// ```
    pub fn new(access_token: String) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            access_token,
            client_id: DEFAULT_CLIENT_ID.to_string(),
            context: ClientContext::default(),
        }
    }

    /// 设置收集端点 (构建器模式)
    ///
    /// # 示例
    /// ```
    /// use logging_middleware::models::EmitterConfig;
    ///
    /// let config = EmitterConfig::new("token-abc".to_string())
    ///     .with_endpoint("http://127.0.0.1:8080/logs".to_string());
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn with_endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// 设置客户端标识 (构建器模式)
    pub fn with_client_id(mut self, client_id: String) -> Self {
        self.client_id = client_id;
        self
    }

    /// 设置客户端上下文 (构建器模式)
    pub fn with_context(mut self, context: ClientContext) -> Self {
        self.context = context;
        self
    }

    /// 校验配置
    ///
    /// - 端点必须是 http/https 地址
    /// - 令牌不能为空,也不能包含空白字符,`Bearer <令牌>` 必须是合法的请求头值
    /// - 客户端标识不能为空,且必须是合法的 `User-Agent` 请求头值
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| ConfigError::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                url.scheme()
            )));
        }

        if self.access_token.trim().is_empty() {
            return Err(ConfigError::InvalidToken("token is empty".to_string()));
        }

        if self.access_token.chars().any(char::is_whitespace) {
            return Err(ConfigError::InvalidToken(
                "token contains whitespace".to_string(),
            ));
        }

        if HeaderValue::from_str(&format!("Bearer {}", self.access_token)).is_err() {
            return Err(ConfigError::InvalidToken(
                "token is not a valid header value".to_string(),
            ));
        }

        if self.client_id.trim().is_empty() {
            return Err(ConfigError::InvalidClientId(
                "client id is empty".to_string(),
            ));
        }

        if HeaderValue::from_str(&self.client_id).is_err() {
            return Err(ConfigError::InvalidClientId(format!(
                "'{}' is not a valid header value",
                self.client_id.escape_debug()
            )));
        }

        Ok(url)
    }

    /// 获取配置摘要 (用于日志,不记录令牌)
    ///
    /// # 示例
    /// ```
    /// use logging_middleware::models::EmitterConfig;
    ///
    /// let config = EmitterConfig::new("secret-token".to_string());
    /// let summary = config.summary_for_logging();
    /// assert!(!summary.contains("secret-token"));
    /// ```
    pub fn summary_for_logging(&self) -> String {
        format!(
            "{} as {} (token: {} chars)",
            self.endpoint,
            self.client_id,
            self.access_token.chars().count()
        )
    }
}

impl fmt::Debug for EmitterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmitterConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("context", &self.context)
            .finish()
    }
}
