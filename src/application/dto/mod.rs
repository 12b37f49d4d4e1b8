//! Data transfer objects for the application layer.

mod auth_dto;
mod emergency_dto;

pub use auth_dto::{LoginRequest, LoginResponse, SessionSource};
pub use emergency_dto::EmergencyInput;
