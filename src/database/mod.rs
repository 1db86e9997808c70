pub mod functions;
pub mod gateway;
pub mod manager;

pub use functions::{ProductMutation, SqlType, StoredFunction};
pub use gateway::{FunctionCall, Gateway, GatewayError, PgGateway};
pub use manager::{DatabaseError, DatabaseManager};
