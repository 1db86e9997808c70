#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::value::RawValue;
use serde_json::Value;
use tower::ServiceExt;

use nutrition_api::database::gateway::check_arity;
use nutrition_api::database::{FunctionCall, Gateway, GatewayError};
use nutrition_api::AppState;

pub const DEFAULT_REPLY: &str = r#"{"success":true,"data":[]}"#;

/// What the mock answers every invocation with
#[derive(Debug, Clone)]
pub enum Reply {
    Json(String),
    FunctionError(String),
    Unavailable,
    TimedOut,
}

/// In-memory gateway that records every call it receives
pub struct MockGateway {
    calls: Mutex<Vec<FunctionCall>>,
    reply: Mutex<Reply>,
    ping_fails: AtomicBool,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Self::with_reply(Reply::Json(DEFAULT_REPLY.to_string()))
    }

    pub fn replying(json: &str) -> Arc<Self> {
        Self::with_reply(Reply::Json(json.to_string()))
    }

    pub fn with_reply(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Mutex::new(reply),
            ping_fails: AtomicBool::new(false),
        })
    }

    pub fn fail_ping(&self) {
        self.ping_fails.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<FunctionCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The one call a single request should have produced
    pub fn only_call(&self) -> FunctionCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one gateway call, got {:?}", calls);
        calls.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn invoke(&self, call: FunctionCall) -> Result<Box<RawValue>, GatewayError> {
        // same contract check as the real gateway, so route param lists are verified
        check_arity(&call)?;
        let function = call.function.name();
        self.calls.lock().unwrap().push(call);

        match self.reply.lock().unwrap().clone() {
            Reply::Json(json) => Ok(RawValue::from_string(json).expect("mock reply must be JSON")),
            Reply::FunctionError(message) => Err(GatewayError::Function { message }),
            Reply::Unavailable => Err(GatewayError::Unavailable(sqlx::Error::PoolTimedOut)),
            Reply::TimedOut => Err(GatewayError::TimedOut {
                function,
                after: Duration::from_secs(30),
            }),
        }
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        if self.ping_fails.load(Ordering::SeqCst) {
            Err(GatewayError::Unavailable(sqlx::Error::PoolClosed))
        } else {
            Ok(())
        }
    }
}

pub fn test_app(gateway: Arc<MockGateway>) -> Router {
    nutrition_api::app(AppState::new(gateway), nutrition_api::config::config())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, self.body))
    }
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    TestResponse {
        status,
        content_type,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

/// Request builder with optional caller headers and raw body
pub fn request(method: &str, uri: &str, headers: &[(&str, &str)], body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let body = match body {
        Some(text) => {
            builder = builder.header("content-type", "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

pub fn admin() -> [(&'static str, &'static str); 2] {
    [("x-user-id", "1"), ("x-user-role", "app_admin")]
}

pub fn user() -> [(&'static str, &'static str); 2] {
    [("x-user-id", "7"), ("x-user-role", "app_user")]
}
