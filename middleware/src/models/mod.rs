//! 数据模型模块
//!
//! 包含所有核心数据结构:
//! - log_record: 日志记录及三个分类字段 (Stack / Level / Package)
//! - coercion: 分类字段的校验与默认值纠正策略
//! - client_context: 客户端上下文 (user agent / 来源地址)
//! - emitter_config: 发射器配置 (端点、令牌、客户端标识)
//! - errors: 错误类型定义 (投递错误、配置错误)

pub mod client_context;
pub mod coercion;
pub mod emitter_config;
pub mod errors;
pub mod log_record;

// 重导出常用类型,简化外部引用
pub use client_context::ClientContext;
pub use coercion::{coerce, Categorical, Coerced, Substitution};
pub use emitter_config::EmitterConfig;
pub use errors::{ConfigError, EmitError};
pub use log_record::{Level, LogRecord, Package, Stack};
