//! VaidyaCare - patient and doctor client for the VaidyaCare telemedicine backend.
//!
//! The crate talks to the backend's PHP endpoints through a single
//! `{success, message, data}` envelope, keeps the signed-in account in a local
//! session file, and exposes accounts, doctor directory, family members,
//! appointment and home-service booking, emergency requests and medical
//! records both as a library and as the `vaidyacare` command.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the command-line interface.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "vaidyacare";
