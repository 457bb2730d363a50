//! 结构化日志转发中间件
//!
//! 把调用方的日志事件纠正为合法记录,写一行本地输出,
//! 再以 Bearer 认证 POST 到远程收集端点。投递是尽力而为的:
//! 失败只体现在返回值和本地诊断中,从不打断调用方。

pub mod models;
pub mod services;
pub mod utils;

pub use models::{ClientContext, EmitterConfig, Level, LogRecord, Package, Stack};
pub use services::{EmitOutcome, LogEmitter, LogSink};
