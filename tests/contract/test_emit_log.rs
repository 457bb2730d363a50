//! 契约测试: emit
//!
//! 验证发往收集端点的请求格式,以及各种响应下的返回值和本地输出

use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;

use logging_middleware::models::{ClientContext, EmitterConfig, Level, Package, Stack};
use logging_middleware::services::{LogEmitter, RecordingConsole};
use logging_middleware::utils::time_utils;

const LOGS_PATH: &str = "/evaluation-service/logs";
const TEST_TOKEN: &str = "test-token-123";

/// 测试辅助函数: 创建指向给定端点的发射器
fn emitter_for(endpoint: String, context: ClientContext) -> (LogEmitter, Arc<RecordingConsole>) {
    let console = Arc::new(RecordingConsole::new());
    let config = EmitterConfig::new(TEST_TOKEN.to_string())
        .with_endpoint(endpoint)
        .with_context(context);
    let emitter = LogEmitter::with_console(config, console.clone()).expect("测试配置有效");
    (emitter, console)
}

#[tokio::test]
async fn test_scenario_a_success_returns_true() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", LOGS_PATH)
        .with_status(200)
        .with_body(r#"{"logID":"abc"}"#)
        .create_async()
        .await;

    let (emitter, console) = emitter_for(
        format!("{}{}", server.url(), LOGS_PATH),
        ClientContext::default(),
    );

    let outcome = emitter.emit("frontend", "info", "controller", "hello").await;

    assert!(outcome.delivered);
    assert!(outcome.substitutions.is_empty());
    assert!(console.position_of("[INFO] [controller] hello").is_some());
    assert!(console.lines_at(Level::Warn).is_empty());
    assert!(console.lines_at(Level::Error).is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_request_headers_and_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", LOGS_PATH)
        .match_header("content-type", "application/json")
        .match_header("authorization", format!("Bearer {}", TEST_TOKEN).as_str())
        .match_header("user-agent", "LoggingMiddleware/1.0.0")
        .match_body(Matcher::PartialJson(json!({
            "stack": "backend",
            "level": "error",
            "package": "cron_job",
            "message": "cleanup failed",
            "userAgent": "Mozilla/5.0 (X11)",
            "url": "http://localhost:3000/stats",
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let context = ClientContext::default()
        .with_user_agent("Mozilla/5.0 (X11)")
        .with_url("http://localhost:3000/stats");
    let (emitter, _console) = emitter_for(format!("{}{}", server.url(), LOGS_PATH), context);

    let outcome = emitter
        .emit("backend", "error", "cron_job", "cleanup failed")
        .await;

    assert!(outcome.delivered);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_body_contains_exactly_record_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", LOGS_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""timestamp":"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z""#.to_string()),
            Matcher::PartialJson(json!({"userAgent": "Unknown", "url": "Unknown"})),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let (emitter, _console) = emitter_for(
        format!("{}{}", server.url(), LOGS_PATH),
        ClientContext::default(),
    );

    let outcome = emitter.emit("frontend", "debug", "route", "navigated").await;

    // 任何2xx都算送达
    assert!(outcome.delivered);
    mock.assert_async().await;

    let body = serde_json::to_value(&outcome.record).unwrap();
    let keys: Vec<_> = body.as_object().unwrap().keys().cloned().collect();
    for key in ["stack", "level", "package", "message", "timestamp", "userAgent", "url"] {
        assert!(keys.iter().any(|k| k == key), "missing key {}", key);
    }
    assert_eq!(keys.len(), 7);
}

#[tokio::test]
async fn test_scenario_b_invalid_inputs_are_coerced() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", LOGS_PATH)
        .match_body(Matcher::PartialJson(json!({
            "stack": "frontend",
            "level": "info",
            "package": "controller",
            "message": "test",
        })))
        .with_status(200)
        .create_async()
        .await;

    let (emitter, console) = emitter_for(
        format!("{}{}", server.url(), LOGS_PATH),
        ClientContext::default(),
    );

    let outcome = emitter.emit("xyz", "critical", "nope", "test").await;

    assert!(outcome.delivered);
    assert_eq!(outcome.record.stack, Stack::Frontend);
    assert_eq!(outcome.record.level, Level::Info);
    assert_eq!(outcome.record.package, Package::Controller);
    assert_eq!(outcome.substitutions.len(), 3);

    let warnings = console.lines_at(Level::Warn);
    assert_eq!(
        warnings,
        vec![
            "Invalid stack: xyz. Using 'frontend' as default.",
            "Invalid level: critical. Using 'info' as default.",
            "Invalid package: nope. Using 'controller' as default.",
        ]
    );

    // 警告先于日志行
    let line_pos = console
        .position_of("[INFO] [controller] test")
        .expect("日志行必须存在");
    let last_warning_pos = console
        .position_of("Invalid package")
        .expect("package 警告必须存在");
    assert!(last_warning_pos < line_pos);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_scenario_c_unreachable_endpoint_returns_false() {
    // 端口1通常没有服务监听,连接会被拒绝
    let (emitter, console) = emitter_for(
        "http://127.0.0.1:1/evaluation-service/logs".to_string(),
        ClientContext::default(),
    );

    let outcome = emitter.emit("frontend", "warn", "handler", "offline").await;

    assert!(!outcome.delivered);
    assert!(console.position_of("[WARN] [handler] offline").is_some());
    let errors = console.lines_at(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Error sending log to collection endpoint"));
}

#[tokio::test]
async fn test_error_statuses_return_false() {
    for status in [400, 401, 404, 500, 503] {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", LOGS_PATH)
            .with_status(status)
            .create_async()
            .await;

        let (emitter, console) = emitter_for(
            format!("{}{}", server.url(), LOGS_PATH),
            ClientContext::default(),
        );

        let outcome = emitter.emit("frontend", "info", "service", "status check").await;

        assert!(!outcome.delivered, "HTTP {} 应视为未送达", status);
        assert_eq!(
            console.lines_at(Level::Error),
            vec![format!("Failed to send log to collection endpoint: {}", status)]
        );
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_local_line_written_even_when_delivery_fails() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", LOGS_PATH)
        .with_status(500)
        .create_async()
        .await;

    let (emitter, console) = emitter_for(
        format!("{}{}", server.url(), LOGS_PATH),
        ClientContext::default(),
    );

    emitter.emit("backend", "fatal", "db", "disk full").await;

    let lines = console.lines();
    assert!(lines[0].1.ends_with("[FATAL] [db] disk full"));
    assert_eq!(lines.len(), 2);
}

#[tokio::test]
async fn test_exactly_one_attempt_per_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", LOGS_PATH)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let (emitter, _console) = emitter_for(
        format!("{}{}", server.url(), LOGS_PATH),
        ClientContext::default(),
    );

    assert!(!emitter.emit("frontend", "error", "route", "no retry").await.delivered);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_timestamp_within_call_window() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", LOGS_PATH)
        .with_status(200)
        .create_async()
        .await;

    let (emitter, console) = emitter_for(
        format!("{}{}", server.url(), LOGS_PATH),
        ClientContext::default(),
    );

    // 传输格式只有毫秒精度,记录时间戳在创建时截断到毫秒,
    // 起点同样截断,窗口在该精度下成立
    let start = time_utils::now_millis();
    let outcome = emitter.emit("frontend", "info", "domain", "timed").await;
    let end = chrono::Utc::now();

    assert!(outcome.record.timestamp >= start);
    assert!(outcome.record.timestamp <= end);

    let stamp = time_utils::format_iso_millis(&outcome.record.timestamp);
    assert_eq!(time_utils::parse_iso(&stamp).unwrap(), outcome.record.timestamp);
    assert!(console.position_of(&format!("[{}] [INFO] [domain] timed", stamp)).is_some());
}
