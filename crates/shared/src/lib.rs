//! Shared types, errors, and configuration for Procura.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Item identity normalization (trimmed, case-insensitive)
//! - Lenient quantity parsing for loosely-typed API payloads
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, CacheConfig, ProrationMode, ReconciliationConfig};
pub use error::AppError;
