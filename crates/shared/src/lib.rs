//! Shared types and configuration for Moneta.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Engine configuration management

pub mod config;
pub mod types;

pub use config::EngineConfig;
