//! 可注入的日志能力
//!
//! 调用方 (如界面事件处理器) 只依赖 `Arc<dyn LogSink>`,
//! 生产环境注入 `LogEmitter`,测试中注入 `NoopSink` 或 `RecordingSink`。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{coerce, ClientContext, Level, LogRecord, Package, Stack};
use crate::services::log_emitter::LogEmitter;

/// 日志能力接口
///
/// 返回值表示是否送达,调用方可以忽略它。
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn log(&self, stack: &str, level: &str, package: &str, message: &str) -> bool;
}

#[async_trait]
impl LogSink for LogEmitter {
    async fn log(&self, stack: &str, level: &str, package: &str, message: &str) -> bool {
        self.emit(stack, level, package, message).await.delivered
    }
}

/// 丢弃所有日志
///
/// 没有任何日志被送达,因此总是返回 `false`。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

#[async_trait]
impl LogSink for NoopSink {
    async fn log(&self, _stack: &str, _level: &str, _package: &str, _message: &str) -> bool {
        false
    }
}

/// 在内存中保存纠正后的记录
///
/// 与 `LogEmitter` 使用同一纠正策略,但不做任何输出和网络调用。
#[derive(Debug, Default)]
pub struct RecordingSink {
    context: ClientContext,
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定的客户端上下文构造记录
    pub fn with_context(context: ClientContext) -> Self {
        Self {
            context,
            records: Mutex::new(Vec::new()),
        }
    }

    /// 已记录的全部日志
    pub async fn records(&self) -> Vec<LogRecord> {
        self.records.lock().await.clone()
    }

    /// 已记录的日志条数
    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl LogSink for RecordingSink {
    async fn log(&self, stack: &str, level: &str, package: &str, message: &str) -> bool {
        let record = LogRecord::new(
            coerce::<Stack>(stack).value,
            coerce::<Level>(level).value,
            coerce::<Package>(package).value,
            message,
            &self.context,
        );
        self.records.lock().await.push(record);
        true
    }
}
