//! Domain layer with core entities, booking flows and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Multi-step booking flows.
pub mod flow;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Transient user-facing messages.
pub mod toast;

pub use entities::{Role, Session, UserId};
pub use errors::{ApiError, ErrorCategory, FlowError, StorageError};
pub use ports::{AuthPort, CarePort, FamilyPort, ServicesPort, SessionStoragePort};
pub use toast::{Toast, ToastLevel};
