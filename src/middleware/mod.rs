pub mod context;
pub mod response;
pub mod role;

pub use context::{caller_context_middleware, context_from_headers, USER_ID_HEADER, USER_ROLE_HEADER};
pub use response::{method_not_allowed_envelope, ApiResult, PassThrough};
pub use role::require_admin;
