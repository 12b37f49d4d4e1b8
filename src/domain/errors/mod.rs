//! Domain error types.

mod api_error;
mod flow_error;
mod storage_error;

pub use api_error::{ApiError, ErrorCategory, FALLBACK_MESSAGE, NETWORK_MESSAGE, PARSE_MESSAGE};
pub use flow_error::FlowError;
pub use storage_error::StorageError;
