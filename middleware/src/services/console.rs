//! 本地诊断输出
//!
//! 发射器的所有本地输出 (替换警告、日志行、投递结果) 都经过 `Console`,
//! 默认实现转发到 tracing,测试中可替换为记录型实现。

use std::sync::{Mutex, MutexGuard};

use crate::models::Level;

/// 本地诊断输出通道
pub trait Console: Send + Sync {
    /// 以指定严重程度写入一行
    fn write(&self, severity: Level, line: &str);
}

/// 转发到 tracing 的默认控制台
///
/// 事件的 target 为 `logging_middleware::console`,因此受订阅者的
/// `EnvFilter` 约束。发射器总是以 info 写入 `[ts] [LEVEL] [package] message`
/// 日志行 (与记录自身的级别无关),默认过滤级别 `info` 下必定可见;
/// `RUST_LOG=warn` 会丢弃日志行和投递成功确认,只留下替换警告和投递失败。
/// 需要在收紧全局级别的同时保留日志行时,单独放行该 target,
/// 例如 `RUST_LOG=warn,logging_middleware::console=info`。
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConsole;

impl Console for TracingConsole {
    fn write(&self, severity: Level, line: &str) {
        match severity {
            Level::Debug => tracing::debug!(target: "logging_middleware::console", "{}", line),
            Level::Info => tracing::info!(target: "logging_middleware::console", "{}", line),
            Level::Warn => tracing::warn!(target: "logging_middleware::console", "{}", line),
            Level::Error | Level::Fatal => {
                tracing::error!(target: "logging_middleware::console", "{}", line)
            }
        }
    }
}

/// 记录型控制台
///
/// 按写入顺序保存每一行,供调用方在测试中断言本地输出。
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Mutex<Vec<(Level, String)>>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已写入的全部行 (严重程度, 内容)
    pub fn lines(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    /// 指定严重程度的行
    pub fn lines_at(&self, severity: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// 第一条包含 `needle` 的行的位置
    pub fn position_of(&self, needle: &str) -> Option<usize> {
        self.lock().iter().position(|(_, line)| line.contains(needle))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Level, String)>> {
        // 写入方不会在持锁期间panic, 中毒时直接取回数据
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Console for RecordingConsole {
    fn write(&self, severity: Level, line: &str) {
        self.lock().push((severity, line.to_string()));
    }
}
