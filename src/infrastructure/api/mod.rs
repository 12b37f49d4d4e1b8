//! HTTP adapter for the VaidyaCare PHP backend.

mod client;
mod dto;
pub mod endpoints;
mod envelope;

pub use client::ApiClient;
pub use endpoints::{Encoding, Endpoint, Method};
pub use envelope::Envelope;
