//! Core business logic for Procura.
//!
//! This crate contains the fulfillment reconciliation engine with ZERO web or
//! database dependencies. Storage is reached through the `FulfillmentRepository`
//! trait only.
//!
//! # Modules
//!
//! - `fulfillment` - Order lines, receipt and return history, aggregation
//! - `shortfall` - Leftover, under-receipt and over-receipt checks
//! - `returns` - Return-note validation and suggestions
//! - `status` - Order fulfillment status derivation
//! - `allocation` - Proration of note totals and holdback across lines
//! - `repository` - Storage seam, in-memory store and cache
//! - `service` - Orchestration over a repository

pub mod allocation;
pub mod error;
pub mod fulfillment;
pub mod repository;
pub mod returns;
pub mod service;
pub mod shortfall;
pub mod status;

pub use error::ReconciliationError;
