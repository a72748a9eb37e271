//! guardian - maintenance toolkit for the GUARDIAN policy-document store
//!
//! This crate provides:
//! - Keyword-heuristic topic classification (AI / Quantum / Cybersecurity / Both)
//! - Framework scoring (four 0-100 maturity scores per document)
//! - Metadata sanitization for HTML-polluted fields
//! - Declarative record corrections replayed against the row store
//! - A small HTTP API serving document scores

pub mod classify;
pub mod commands;
pub mod config;
pub mod corrections;
pub mod error;
pub mod patterns;
pub mod sanitize;
pub mod score;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
