//! Error types for the pure decision/personality/memory model.
//!
//! Mirrors the workspace's `BrainError`/`BrainResult` idiom: a flat
//! `thiserror`-derived enum with one variant per caller-visible failure
//! mode, no catch-all `Other(String)`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("invalid personality: {0}")]
    InvalidPersonality(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
