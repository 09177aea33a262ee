//! Open Library dump loader
//!
//! Streams the Open Library authors and works dumps into a keyed store,
//! resolving each work's author references to display names at load time.

pub mod config;
pub mod dump;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, RecordError};
