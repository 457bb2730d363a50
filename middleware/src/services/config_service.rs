use std::collections::HashMap;
use std::env;
use std::path::Path;

use crate::models::emitter_config::{DEFAULT_CLIENT_ID, DEFAULT_ENDPOINT};
use crate::models::{ClientContext, ConfigError, EmitterConfig};

/// 收集端点
pub const ENV_ENDPOINT: &str = "LOG_ENDPOINT";
/// Bearer 访问令牌 (必需)
pub const ENV_ACCESS_TOKEN: &str = "LOG_ACCESS_TOKEN";
/// 客户端标识
pub const ENV_CLIENT_ID: &str = "LOG_CLIENT_ID";

/// 配置服务
///
/// 从外部环境加载发射器配置,令牌永远不出现在源码中:
/// - 进程环境变量 (启动前可由 .env 文件补充)
/// - 指定的 .env 文件 (不修改进程环境)
pub struct ConfigService;

impl ConfigService {
    /// 从进程环境加载配置
    ///
    /// 如果当前目录或上层目录存在 .env 文件,先将其载入进程环境;
    /// 已存在的环境变量不会被覆盖。
    ///
    /// # 错误处理
    /// - .env 文件不存在时静默跳过
    /// - .env 文件格式错误时记录警告并继续使用进程环境
    /// - 缺少 `LOG_ACCESS_TOKEN` 时返回 `MissingVar`
    pub fn load_emitter_config() -> Result<EmitterConfig, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Loaded .env file");
            }
            Err(e) if e.not_found() => {
                tracing::debug!(".env file not found, using process environment only");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load .env file, using process environment only");
            }
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从指定的 .env 文件加载配置
    ///
    /// 只读取文件内容,不修改进程环境。
    pub fn load_from_env_file(path: &Path) -> Result<EmitterConfig, ConfigError> {
        let vars = dotenvy::from_path_iter(path)
            .map_err(|e| ConfigError::EnvFile(format!("{}: {}", path.display(), e)))?
            .collect::<Result<HashMap<String, String>, _>>()
            .map_err(|e| ConfigError::EnvFile(format!("{}: {}", path.display(), e)))?;

        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// 从任意键值来源构造配置
    ///
    /// 空白值视为未设置。
    pub fn from_lookup<F>(lookup: F) -> Result<EmitterConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let access_token =
            get(ENV_ACCESS_TOKEN).ok_or_else(|| ConfigError::MissingVar(ENV_ACCESS_TOKEN.to_string()))?;

        let endpoint = get(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let client_id = get(ENV_CLIENT_ID).unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string());
        let context = ClientContext::from_lookup(|key| get(key));

        let config = EmitterConfig::new(access_token)
            .with_endpoint(endpoint)
            .with_client_id(client_id)
            .with_context(context);

        config.validate()?;

        tracing::info!(
            config = %config.summary_for_logging(),
            "Loaded log emitter configuration"
        );

        Ok(config)
    }
}
