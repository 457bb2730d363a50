//! 客户端上下文
//!
//! 对应浏览器环境中的 user agent 与当前页面地址。
//! 两者都是尽力而为: 运行环境不提供时以 `"Unknown"` 代替。

use serde::{Deserialize, Serialize};

/// 上下文不可用时的占位值
pub const UNKNOWN: &str = "Unknown";

/// 客户端上下文
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContext {
    /// 用户代理字符串
    pub user_agent: Option<String>,
    /// 来源地址
    pub url: Option<String>,
}

impl ClientContext {
    pub fn new(user_agent: Option<String>, url: Option<String>) -> Self {
        Self { user_agent, url }
    }

    /// 从任意键值来源读取上下文
    ///
    /// - `LOG_CLIENT_USER_AGENT`
    /// - `LOG_CLIENT_URL`
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            user_agent: lookup("LOG_CLIENT_USER_AGENT"),
            url: lookup("LOG_CLIENT_URL"),
        }
    }

    /// 设置用户代理 (构建器模式)
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// 设置来源地址 (构建器模式)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn resolved_user_agent(&self) -> String {
        resolve(self.user_agent.as_deref())
    }

    pub fn resolved_url(&self) -> String {
        resolve(self.url.as_deref())
    }
}

/// 空白值与缺失值同等对待
fn resolve(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => UNKNOWN.to_string(),
    }
}
