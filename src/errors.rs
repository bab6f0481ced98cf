//! Unified application error type.
//! Every layer (db, profile, core, cli) returns AppError so that the
//! validation / state-conflict / transient-query split stays visible to callers.

use crate::models::claim_status::ClaimStatus;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Submission errors
    // ---------------------------
    #[error("Invalid field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("An offer has already been claimed from this profile")]
    AlreadyClaimed,

    #[error("Not eligible yet: {visits} visits, {threshold} required")]
    NotEligible { visits: u64, threshold: u64 },

    // ---------------------------
    // Review errors
    // ---------------------------
    #[error("Claim {id} is '{current}', cannot move it to '{target}'")]
    StateConflict {
        id: String,
        current: ClaimStatus,
        target: ClaimStatus,
    },

    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Invalid claim status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Reconciliation errors
    // ---------------------------
    #[error("Claim query failed: {0}")]
    TransientQuery(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
