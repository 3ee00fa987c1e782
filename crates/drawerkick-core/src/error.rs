// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Error types for drawerkick.
//
// Failures of the drawer pipeline itself are reported as `OperationResult`
// values carrying an `ErrorCode`. The types here cover everything around it:
// caller misuse, safety-gate rejections, and plumbing failures.

use thiserror::Error;

use crate::types::{ErrorCode, OperationResult};

/// Top-level error type for operations outside the `OperationResult` contract.
#[derive(Debug, Error)]
pub enum DrawerError {
    #[error("invalid call: {0}")]
    Usage(#[from] UsageError),

    #[error("printer enumeration failed: {0}")]
    Enumeration(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DrawerError>;

/// Caller misuse detected before any work is scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("printer name is {len} characters; the maximum is {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("option {field} must be 0-255, got {value}")]
    OptionOutOfRange { field: &'static str, value: i64 },
}

impl UsageError {
    /// Result shape for hosts that cannot surface a thrown error.
    pub fn to_operation_result(&self) -> OperationResult {
        OperationResult::failure(ErrorCode::InvalidArgument, self.to_string())
    }
}

/// Rejection from the safety gate; never involves an OS call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GateError {
    pub code: ErrorCode,
    pub message: String,
}

impl GateError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<GateError> for OperationResult {
    fn from(err: GateError) -> Self {
        OperationResult::failure(err.code, err.message)
    }
}
