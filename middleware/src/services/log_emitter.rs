use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Url};
use std::fmt;
use std::sync::Arc;

use crate::models::{
    coerce, ClientContext, ConfigError, EmitError, EmitterConfig, Level, LogRecord, Package,
    Stack, Substitution,
};
use crate::services::console::{Console, TracingConsole};

/// 单次发射的结果
#[derive(Debug, Clone, PartialEq)]
pub struct EmitOutcome {
    /// 收集端点是否返回了成功状态码
    pub delivered: bool,
    /// 实际发送的记录 (已纠正)
    pub record: LogRecord,
    /// 本次调用发生的默认值替换
    pub substitutions: Vec<Substitution>,
}

/// 日志发射器
///
/// 职责:
/// - 校验并纠正 stack / level / package
/// - 构造带时间戳和客户端上下文的日志记录
/// - 写一行本地控制台输出
/// - 向收集端点 POST 一次 JSON,不重试、不批量
///
/// 发射器本身没有可变状态,`emit` 可以任意并发调用。
/// 任何失败都只体现在返回值和本地诊断中,从不向调用方抛出。
#[derive(Clone)]
pub struct LogEmitter {
    client: Client,
    endpoint: Url,
    access_token: String,
    client_id: String,
    context: ClientContext,
    console: Arc<dyn Console>,
}

impl LogEmitter {
    /// 创建发射器,本地输出转发到 tracing
    ///
    /// # 错误
    /// - `ConfigError::InvalidEndpoint` / `InvalidToken` / `InvalidClientId`: 配置无效
    /// - `ConfigError::HttpClient`: HTTP客户端构造失败
    pub fn new(config: EmitterConfig) -> Result<Self, ConfigError> {
        Self::with_console(config, Arc::new(TracingConsole))
    }

    /// 创建发射器并指定本地输出通道
    pub fn with_console(
        config: EmitterConfig,
        console: Arc<dyn Console>,
    ) -> Result<Self, ConfigError> {
        let endpoint = config.validate()?;

        let client = Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        tracing::info!(
            config = %config.summary_for_logging(),
            "Log emitter initialized"
        );

        Ok(Self {
            client,
            endpoint,
            access_token: config.access_token,
            client_id: config.client_id,
            context: config.context,
            console,
        })
    }

    /// 纠正输入并构造记录,不产生任何输出
    pub fn build_record(
        &self,
        stack: &str,
        level: &str,
        package: &str,
        message: &str,
    ) -> (LogRecord, Vec<Substitution>) {
        let stack = coerce::<Stack>(stack);
        let level = coerce::<Level>(level);
        let package = coerce::<Package>(package);

        let substitutions = [stack.substitution, level.substitution, package.substitution]
            .into_iter()
            .flatten()
            .collect();

        let record = LogRecord::new(
            stack.value,
            level.value,
            package.value,
            message,
            &self.context,
        );

        (record, substitutions)
    }

    /// 发射一条日志
    ///
    /// 每个非法分类输入产生一条本地警告,随后写本地日志行,最后投递一次。
    ///
    /// # 示例
    /// ```no_run
    /// use logging_middleware::models::EmitterConfig;
    /// use logging_middleware::services::LogEmitter;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let emitter = LogEmitter::new(EmitterConfig::new("token".to_string()))?;
    /// let outcome = emitter
    ///     .emit("frontend", "info", "controller", "User shortened a URL")
    ///     .await;
    /// if !outcome.delivered {
    ///     // 日志是尽力而为的,业务流程不受影响
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn emit(&self, stack: &str, level: &str, package: &str, message: &str) -> EmitOutcome {
        let (record, substitutions) = self.build_record(stack, level, package, message);

        for substitution in &substitutions {
            self.console.write(Level::Warn, &substitution.to_string());
        }

        let delivered = self.emit_record(&record).await;

        EmitOutcome {
            delivered,
            record,
            substitutions,
        }
    }

    /// 发射一条已构造好的记录
    ///
    /// 类型已经保证了分类字段合法,因此不会产生替换警告。
    pub async fn emit_record(&self, record: &LogRecord) -> bool {
        // 日志行固定为 info,记录级别只体现在行内的 [LEVEL]
        self.console.write(Level::Info, &record.console_line());

        match self.send(record).await {
            Ok(()) => {
                self.console
                    .write(Level::Info, "Log successfully sent to collection endpoint");
                true
            }
            Err(EmitError::HttpStatus { status }) => {
                self.console.write(
                    Level::Error,
                    &format!("Failed to send log to collection endpoint: {}", status),
                );
                false
            }
            Err(e) => {
                self.console.write(
                    Level::Error,
                    &format!("Error sending log to collection endpoint: {}", e),
                );
                false
            }
        }
    }

    /// 单次POST,非2xx状态视为失败
    async fn send(&self, record: &LogRecord) -> Result<(), EmitError> {
        let body = serde_json::to_vec(record)?;

        tracing::debug!(
            endpoint = %self.endpoint,
            level = %record.level,
            package = %record.package,
            bytes = body.len(),
            "Posting log record"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, self.client_id.as_str())
            .bearer_auth(&self.access_token)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::debug!(status = %status, "Collection endpoint rejected log record");
            Err(EmitError::HttpStatus {
                status: status.as_u16(),
            })
        }
    }
}

impl fmt::Debug for LogEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEmitter")
            .field("endpoint", &self.endpoint.as_str())
            .field("client_id", &self.client_id)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}
