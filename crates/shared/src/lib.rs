//! Shared types, errors, and configuration for CapexView.
//!
//! This crate provides common types used across all other crates:
//! - Amount rounding and display formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CacheConfig, SheetsConfig};
pub use error::AppError;
