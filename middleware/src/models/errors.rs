use thiserror::Error;

/// 日志投递相关错误
///
/// 仅在发射器内部流转: `emit` 会把它转换为 `delivered = false`
/// 加一条本地诊断,从不向调用方抛出。
#[derive(Debug, Error)]
pub enum EmitError {
    /// 网络请求失败
    ///
    /// 可能原因:
    /// - 网络连接中断
    /// - 收集端点不可达
    /// - DNS解析失败
    #[error("network request failed: {0}")]
    Network(String),

    /// 收集端点返回非成功状态码
    #[error("collection endpoint responded with HTTP {status}")]
    HttpStatus { status: u16 },

    /// 日志记录序列化失败
    #[error("failed to serialize log record: {0}")]
    Serialization(String),
}

/// 配置相关错误
///
/// 启动阶段的错误,由配置加载和发射器构造返回。
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 缺少必需的环境变量
    #[error("missing required environment variable: {0}")]
    MissingVar(String),

    /// 收集端点地址无效
    #[error("invalid collection endpoint: {0}")]
    InvalidEndpoint(String),

    /// 访问令牌无效 (为空或包含空白字符)
    #[error("invalid access token: {0}")]
    InvalidToken(String),

    /// 客户端标识无效
    #[error("invalid client id: {0}")]
    InvalidClientId(String),

    /// .env 文件读取或解析失败
    #[error("failed to read env file: {0}")]
    EnvFile(String),

    /// HTTP客户端构造失败
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// 实现从reqwest::Error到EmitError的转换
impl From<reqwest::Error> for EmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EmitError::Network("request timed out".to_string())
        } else if err.is_connect() {
            EmitError::Network(format!("could not connect to endpoint: {}", err))
        } else if let Some(status) = err.status() {
            EmitError::HttpStatus {
                status: status.as_u16(),
            }
        } else {
            EmitError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for EmitError {
    fn from(err: serde_json::Error) -> Self {
        EmitError::Serialization(err.to_string())
    }
}
