use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use logging_middleware::services::{ConfigService, LogEmitter};
use logging_middleware::utils::logger;

/// 向收集端点投递一条日志
///
/// 配置来自环境变量或 .env 文件 (LOG_ACCESS_TOKEN 必需)。
/// 退出码: 0 已送达, 1 未送达, 2 配置错误。
#[derive(Debug, Parser)]
#[command(name = "logging-middleware", version)]
struct Cli {
    /// backend | frontend
    stack: String,

    /// debug | info | warn | error | fatal
    level: String,

    /// cache | controller | cron_job | db | domain | handler | repository | route | service
    package: String,

    /// 日志内容
    message: String,

    /// 额外写入JSON日志文件 (目录未指定时使用系统数据目录)
    #[arg(long)]
    log_file: bool,

    /// JSON日志文件目录,指定即开启文件日志
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    /// 文件日志目录, `None` 表示只输出到控制台
    fn file_log_dir(&self) -> Option<PathBuf> {
        match &self.log_dir {
            Some(dir) => Some(dir.clone()),
            None if self.log_file => Some(logger::default_log_dir()),
            None => None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // guard 必须存活到进程退出
    let _guard = match cli.file_log_dir() {
        Some(dir) => match logger::init_with_file(&dir) {
            Ok(guard) => Some(guard),
            Err(e) => {
                eprintln!("日志系统初始化失败: {}", e);
                return ExitCode::from(2);
            }
        },
        None => {
            if let Err(e) = logger::init() {
                eprintln!("日志系统初始化失败: {}", e);
                return ExitCode::from(2);
            }
            None
        }
    };

    let emitter = match ConfigService::load_emitter_config().and_then(LogEmitter::new) {
        Ok(emitter) => emitter,
        Err(e) => {
            tracing::error!(error = %e, "Invalid log emitter configuration");
            return ExitCode::from(2);
        }
    };

    let outcome = emitter
        .emit(&cli.stack, &cli.level, &cli.package, &cli.message)
        .await;

    if outcome.delivered {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
