//! 服务层模块
//!
//! - `log_emitter`: 日志发射器,纠正输入、写本地输出、投递到收集端点
//! - `log_sink`: 可注入的日志能力接口及其测试替身
//! - `console`: 本地诊断输出通道
//! - `config_service`: 从环境/.env 加载发射器配置
//!
//! # 服务架构
//!
//! ```text
//! ┌────────────────────┐
//! │  Arc<dyn LogSink>  │  (调用方只依赖这个接口)
//! └─────────┬──────────┘
//!           │
//!           ▼
//! ┌──────────────────────────────────────┐
//! │            LogEmitter                │
//! │  coerce ─▶ LogRecord ─▶ Console      │
//! │                  │                   │
//! │                  ▼                   │
//! │           reqwest POST (一次)        │
//! └──────────────────────────────────────┘
//!                    │
//!                    ▼
//!             收集端点 (Bearer 认证)
//! ```
//!
//! # 使用示例
//!
//! ```no_run
//! use std::sync::Arc;
//! use logging_middleware::services::{ConfigService, LogEmitter, LogSink};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigService::load_emitter_config()?;
//! let sink: Arc<dyn LogSink> = Arc::new(LogEmitter::new(config)?);
//!
//! sink.log("frontend", "info", "controller", "Short URL created").await;
//! # Ok(())
//! # }
//! ```

pub mod config_service;
pub mod console;
pub mod log_emitter;
pub mod log_sink;

// 重导出常用类型,简化外部引用
pub use config_service::ConfigService;
pub use console::{Console, RecordingConsole, TracingConsole};
pub use log_emitter::{EmitOutcome, LogEmitter};
pub use log_sink::{LogSink, NoopSink, RecordingSink};
