use async_trait::async_trait;
use serde_json::value::RawValue;
use serde_json::Value;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::database::functions::StoredFunction;
use crate::types::CallerContext;

/// One stored-function invocation: what to call, with which positional
/// arguments, on whose behalf.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub function: StoredFunction,
    pub params: Vec<Value>,
    pub context: CallerContext,
}

impl FunctionCall {
    pub fn new(function: StoredFunction, params: Vec<Value>, context: CallerContext) -> Self {
        Self { function, params, context }
    }

    pub fn anonymous(function: StoredFunction, params: Vec<Value>) -> Self {
        Self::new(function, params, CallerContext::anonymous())
    }
}

/// Gateway failures, split by what the caller can do about them
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Pool exhausted or closed, lost connection, TLS or protocol trouble
    #[error("Database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("{function} did not finish within {after:?}")]
    TimedOut { function: &'static str, after: Duration },

    /// Raised inside the database: validation, constraint, missing function
    #[error("{message}")]
    Function { message: String },

    #[error("{function} expects {expected} parameters, got {got}")]
    ArityMismatch {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{function} returned a malformed result: {reason}")]
    MalformedResult { function: &'static str, reason: String },
}

impl From<sqlx::Error> for GatewayError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db) => {
                let class = db
                    .code()
                    .map(|code| classify_sqlstate(&code))
                    .unwrap_or(ServerFailure::Function);
                match class {
                    ServerFailure::Infrastructure => GatewayError::Unavailable(sqlx::Error::Database(db)),
                    // raised by the statement_timeout set on every call
                    ServerFailure::Cancelled => GatewayError::TimedOut {
                        function: "stored function",
                        after: Duration::ZERO,
                    },
                    ServerFailure::Function => GatewayError::Function {
                        message: db.message().to_string(),
                    },
                }
            }
            sqlx::Error::RowNotFound => GatewayError::MalformedResult {
                function: "stored function",
                reason: "no row returned".to_string(),
            },
            sqlx::Error::ColumnDecode { source, .. } | sqlx::Error::Decode(source) => {
                GatewayError::MalformedResult {
                    function: "stored function",
                    reason: source.to_string(),
                }
            }
            other => GatewayError::Unavailable(other),
        }
    }
}

/// What a server-raised SQLSTATE means for the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerFailure {
    /// Connection, authentication, resources, shutdown: the function never judged the call
    Infrastructure,
    /// query_canceled
    Cancelled,
    /// Anything the function itself raised or tripped over
    Function,
}

pub fn classify_sqlstate(code: &str) -> ServerFailure {
    const INFRASTRUCTURE_CLASSES: &[&str] = &["08", "28", "53", "58", "57P0"];

    match code {
        "57014" => ServerFailure::Cancelled,
        "3D000" => ServerFailure::Infrastructure,
        _ if INFRASTRUCTURE_CLASSES.iter().any(|class| code.starts_with(class)) => {
            ServerFailure::Infrastructure
        }
        _ => ServerFailure::Function,
    }
}

impl GatewayError {
    /// Attach the call's name and deadline to errors converted from sqlx
    fn for_call(self, name: &'static str, timeout: Duration) -> Self {
        match self {
            GatewayError::MalformedResult { reason, .. } => GatewayError::MalformedResult {
                function: name,
                reason,
            },
            GatewayError::TimedOut { .. } => GatewayError::TimedOut {
                function: name,
                after: timeout,
            },
            other => other,
        }
    }
}

/// The seam between route handlers and the database
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Run one stored function inside its own transaction and return its
    /// single JSON result verbatim
    async fn invoke(&self, call: FunctionCall) -> Result<Box<RawValue>, GatewayError>;

    /// Connectivity check for /health
    async fn ping(&self) -> Result<(), GatewayError>;
}

/// Postgres-backed gateway
pub struct PgGateway {
    pool: PgPool,
    schema: String,
    query_timeout: Duration,
}

impl PgGateway {
    /// `schema` must already be a validated identifier; it is spliced into SQL.
    pub fn new(pool: PgPool, schema: impl Into<String>, query_timeout: Duration) -> Self {
        Self {
            pool,
            schema: schema.into(),
            query_timeout,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn run(&self, call: &FunctionCall) -> Result<Option<String>, GatewayError> {
        let sql = render_call(&self.schema, call.function);
        let mut tx = self.pool.begin().await?;

        match self.execute(&mut tx, &sql, call).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(
                        "Rollback of {} failed: {}",
                        call.function.name(),
                        rollback_err
                    );
                }
                Err(err.into())
            }
        }
    }

    async fn execute(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sql: &str,
        call: &FunctionCall,
    ) -> Result<Option<String>, sqlx::Error> {
        // is_local = true: settings vanish at COMMIT/ROLLBACK, so a reused
        // pooled connection never carries a previous caller's identity
        if let Some(user_id) = &call.context.user_id {
            sqlx::query("SELECT set_config('app.current_user_id', $1, true)")
                .bind(user_id)
                .execute(&mut **tx)
                .await?;
        }
        if let Some(role) = call.context.role {
            sqlx::query("SELECT set_config('app.current_user_role', $1, true)")
                .bind(role.as_str())
                .execute(&mut **tx)
                .await?;
        }

        sqlx::query("SELECT set_config('statement_timeout', $1, true)")
            .bind(format!("{}ms", self.query_timeout.as_millis()))
            .execute(&mut **tx)
            .await?;

        let mut query = sqlx::query_scalar::<Postgres, Option<String>>(sql);
        for param in &call.params {
            query = query.bind(bind_text(param));
        }
        query.fetch_one(&mut **tx).await
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn invoke(&self, call: FunctionCall) -> Result<Box<RawValue>, GatewayError> {
        let name = call.function.name();
        check_arity(&call)?;

        debug!(
            function = name,
            params = call.params.len(),
            has_user = call.context.user_id.is_some(),
            role = ?call.context.role,
            "invoking stored function"
        );

        let text = tokio::time::timeout(self.query_timeout, self.run(&call))
            .await
            .map_err(|_| GatewayError::TimedOut {
                function: name,
                after: self.query_timeout,
            })?
            .map_err(|e| e.for_call(name, self.query_timeout))?;

        into_raw(name, text)
    }

    async fn ping(&self) -> Result<(), GatewayError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Positional order is the only binding there is, so a count mismatch can
/// never be right
pub fn check_arity(call: &FunctionCall) -> Result<(), GatewayError> {
    let expected = call.function.arity();
    if call.params.len() != expected {
        return Err(GatewayError::ArityMismatch {
            function: call.function.name(),
            expected,
            got: call.params.len(),
        });
    }
    Ok(())
}

/// `SELECT nutrition.create_product($1::text, $2::numeric, ...)::text`
///
/// Arguments travel as text and are cast to the declared type server-side,
/// so a value that does not fit fails inside the database like any other
/// validation error.
pub fn render_call(schema: &str, function: StoredFunction) -> String {
    let args = function
        .signature()
        .iter()
        .enumerate()
        .map(|(i, ty)| format!("${}::{}", i + 1, ty.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("SELECT {}.{}({})::text", schema, function.name(), args)
}

/// Text form of a JSON parameter; `null` binds SQL NULL
pub fn bind_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn into_raw(function: &'static str, text: Option<String>) -> Result<Box<RawValue>, GatewayError> {
    let text = text.unwrap_or_else(|| "null".to_string());
    RawValue::from_string(text).map_err(|e| GatewayError::MalformedResult {
        function,
        reason: e.to_string(),
    })
}
