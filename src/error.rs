// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! Validation outcomes (insufficient credits, bad promo codes, missing
//! profile) are *values* returned by the store, not errors. The variants
//! here cover the infrastructure: storage, providers, bad input.

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for transient provider failures worth retrying (network or
    /// upstream 5xx), as opposed to a malformed request or payload.
    pub fn is_transient_provider_error(&self) -> bool {
        match self {
            AppError::Provider(msg) => {
                msg.contains("timed out") || msg.contains("connection") || msg.contains("status 5")
            }
            _ => false,
        }
    }
}

/// Result type alias for fallible operations
pub type Result<T> = std::result::Result<T, AppError>;
