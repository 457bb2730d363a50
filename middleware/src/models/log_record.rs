//! 日志记录模型
//!
//! 定义投递到远程收集端点的日志数据结构。
//! 记录在每次调用时新建,立即序列化,投递后丢弃,不做任何保留。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::client_context::ClientContext;
use super::coercion::Categorical;
use crate::utils::time_utils;

/// 日志来源端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Backend,
    Frontend,
}

impl Categorical for Stack {
    const FIELD: &'static str = "stack";
    const DEFAULT: Self = Stack::Frontend;
    const ALL: &'static [Self] = &[Stack::Backend, Stack::Frontend];

    fn as_str(&self) -> &'static str {
        match self {
            Stack::Backend => "backend",
            Stack::Frontend => "frontend",
        }
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    /// 控制台输出使用的大写形式
    pub fn as_upper(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }
}

impl Categorical for Level {
    const FIELD: &'static str = "level";
    const DEFAULT: Self = Level::Info;
    const ALL: &'static [Self] = &[
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

/// 产生日志的逻辑子系统
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Package {
    Cache,
    Controller,
    CronJob,
    Db,
    Domain,
    Handler,
    Repository,
    Route,
    Service,
}

impl Categorical for Package {
    const FIELD: &'static str = "package";
    const DEFAULT: Self = Package::Controller;
    const ALL: &'static [Self] = &[
        Package::Cache,
        Package::Controller,
        Package::CronJob,
        Package::Db,
        Package::Domain,
        Package::Handler,
        Package::Repository,
        Package::Route,
        Package::Service,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Package::Cache => "cache",
            Package::Controller => "controller",
            Package::CronJob => "cron_job",
            Package::Db => "db",
            Package::Domain => "domain",
            Package::Handler => "handler",
            Package::Repository => "repository",
            Package::Route => "route",
            Package::Service => "service",
        }
    }
}

macro_rules! display_as_wire_name {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_wire_name!(Stack, Level, Package);

/// 投递到收集端点的日志记录
///
/// JSON字段: `stack, level, package, message, timestamp, userAgent, url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub stack: Stack,
    pub level: Level,
    pub package: Package,
    pub message: String,
    /// 毫秒精度的ISO-8601 UTC时间 (`2025-10-05T10:30:45.123Z`)
    #[serde(with = "time_utils::iso_millis")]
    pub timestamp: DateTime<Utc>,
    /// 客户端标识, 不可用时为 `"Unknown"`
    pub user_agent: String,
    /// 来源地址, 不可用时为 `"Unknown"`
    pub url: String,
}

impl LogRecord {
    /// 以当前时间创建记录
    pub fn new(
        stack: Stack,
        level: Level,
        package: Package,
        message: impl Into<String>,
        context: &ClientContext,
    ) -> Self {
        Self::at(time_utils::now_millis(), stack, level, package, message, context)
    }

    /// 以指定时间创建记录
    pub fn at(
        timestamp: DateTime<Utc>,
        stack: Stack,
        level: Level,
        package: Package,
        message: impl Into<String>,
        context: &ClientContext,
    ) -> Self {
        Self {
            stack,
            level,
            package,
            message: message.into(),
            timestamp,
            user_agent: context.resolved_user_agent(),
            url: context.resolved_url(),
        }
    }

    /// 本地控制台行: `[<timestamp>] [<LEVEL>] [<package>] <message>`
    pub fn console_line(&self) -> String {
        format!(
            "[{}] [{}] [{}] {}",
            time_utils::format_iso_millis(&self.timestamp),
            self.level.as_upper(),
            self.package,
            self.message
        )
    }
}
