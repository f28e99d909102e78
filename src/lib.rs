//! MPS batch order builder
//!
//! Resolves AWM call numbers against the LibraryCloud catalog and turns the
//! matching MODS records into audio digitization inventory rows, together
//! with the batch name and batch metadata of the order.

pub mod config;
pub mod error;
pub mod models;
pub mod mods;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult, ErrorCode};
