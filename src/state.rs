use serde_json::Value;
use std::sync::Arc;

use crate::database::{FunctionCall, Gateway, StoredFunction};
use crate::middleware::{ApiResult, PassThrough};
use crate::types::CallerContext;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Invoke `function` for the caller and hand its result straight back
    pub async fn call(&self, function: StoredFunction, params: Vec<Value>, context: CallerContext) -> ApiResult {
        let call = FunctionCall::new(function, params, context);
        let raw = self.gateway.invoke(call).await?;
        Ok(PassThrough(raw))
    }

    /// Same, without identity settings
    pub async fn call_anonymous(&self, function: StoredFunction, params: Vec<Value>) -> ApiResult {
        self.call(function, params, CallerContext::anonymous()).await
    }
}
