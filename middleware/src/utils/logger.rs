use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日志文件名前缀
const LOG_FILE_PREFIX: &str = "logging-middleware";

/// 日志初始化错误
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// 日志目录创建或日志文件打开失败
    #[error("failed to prepare log directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 全局订阅器已经设置过
    #[error("global tracing subscriber already set: {0}")]
    AlreadyInitialized(String),
}

/// 环境变量过滤器
///
/// 默认: INFO级别, 可通过 RUST_LOG=debug 覆盖
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// 初始化控制台日志
///
/// 人类可读格式,输出到标准错误,不占用标准输出。
/// 重复初始化返回 `AlreadyInitialized` 而不是panic。
pub fn init() -> Result<(), LoggerError> {
    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

/// 初始化控制台 + 文件日志
///
/// - 控制台: 人类可读格式
/// - 文件: JSON格式, 按天轮转 (`logging-middleware.2025-10-05.log`)
/// - non_blocking: 避免日志I/O阻塞调用方
///
/// # 重要提示
/// 返回的guard必须被调用者保存,直到应用退出。
/// 如果guard被drop,日志写入器将被关闭。
pub fn init_with_file(log_dir: &Path) -> Result<WorkerGuard, LoggerError> {
    std::fs::create_dir_all(log_dir).map_err(|source| LoggerError::Io {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(log_dir)
        .map_err(|e| LoggerError::Io {
            path: log_dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::Other, e),
        })?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // 文件层: JSON格式,便于日志分析工具解析
    let file_layer = fmt::layer()
        .json()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false);

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_level(true)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    Ok(guard)
}

/// 默认日志目录
///
/// 优先使用系统数据目录,回退到当前目录下的 `logs`
/// - Linux: `~/.local/share/logging-middleware/logs/`
/// - macOS: `~/Library/Application Support/logging-middleware/logs/`
/// - Windows: `C:\Users\<user>\AppData\Local\logging-middleware\logs\`
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join(LOG_FILE_PREFIX).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
