// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language explanations for drawer failures, shown at the till.
//
// Every error code maps to a short message and a concrete suggestion. The
// `retriable` hint is advisory: nothing in drawerkick retries on its own.

use crate::error::DrawerError;
use crate::types::{ErrorCode, OperationResult};

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Printer busy or briefly unreachable; trying again may work.
    Transient,
    /// Someone must do something (pick another printer, fix the cable).
    ActionRequired,
    /// Cannot be fixed by retrying.
    Permanent,
}

/// A human-readable error with plain message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    pub message: String,
    pub suggestion: String,
    pub retriable: bool,
    pub severity: Severity,
}

impl HumanError {
    fn new(message: &str, suggestion: &str, retriable: bool, severity: Severity) -> Self {
        Self {
            message: message.into(),
            suggestion: suggestion.into(),
            retriable,
            severity,
        }
    }
}

/// Explain a failed `OperationResult`. Returns `None` for successes.
pub fn humanize_result(result: &OperationResult) -> Option<HumanError> {
    if result.success {
        return None;
    }
    Some(humanize_code(result.error_code))
}

/// Explain an error code.
pub fn humanize_code(code: ErrorCode) -> HumanError {
    match code {
        ErrorCode::Success => HumanError::new(
            "The drawer opened.",
            "Nothing to do.",
            false,
            Severity::Permanent,
        ),
        ErrorCode::InvalidArgument | ErrorCode::InvalidName => HumanError::new(
            "The printer name or drawer settings are not valid.",
            "Pick the receipt printer from the printer list and keep pulse settings between 0 and 255.",
            false,
            Severity::ActionRequired,
        ),
        ErrorCode::OpenError => HumanError::new(
            "We couldn't reach that printer.",
            "Check the printer is installed under exactly this name, switched on, and connected.",
            true,
            Severity::ActionRequired,
        ),
        ErrorCode::StartDocError | ErrorCode::StartPageError => HumanError::new(
            "The printer wouldn't accept the drawer command.",
            "The print queue may be paused or full. Clear stuck jobs and try again.",
            true,
            Severity::Transient,
        ),
        ErrorCode::WriteError | ErrorCode::IncompleteWrite => HumanError::new(
            "The drawer command didn't get through.",
            "Check the printer cable or network link, then try again.",
            true,
            Severity::Transient,
        ),
        ErrorCode::OtherError => HumanError::new(
            "Something went wrong while opening the drawer.",
            "Try again. If it keeps happening, restart the till software.",
            true,
            Severity::Transient,
        ),
        ErrorCode::VirtualBlocked => HumanError::new(
            "That isn't a real printer.",
            "PDF, XPS, fax and OneNote printers have no cash drawer. Choose the receipt printer instead.",
            false,
            Severity::Permanent,
        ),
    }
}

/// Explain an error raised outside the drawer pipeline.
pub fn humanize_error(err: &DrawerError) -> HumanError {
    match err {
        DrawerError::Usage(usage) => humanize_result(&usage.to_operation_result())
            .unwrap_or_else(|| humanize_code(ErrorCode::InvalidArgument)),
        DrawerError::Enumeration(_) => HumanError::new(
            "We couldn't list the printers.",
            "Make sure the Windows print spooler or CUPS is running, then try again.",
            true,
            Severity::Transient,
        ),
        DrawerError::Io(io_err) if io_err.kind() == std::io::ErrorKind::PermissionDenied => {
            HumanError::new(
                "drawerkick doesn't have permission to write its files.",
                "Check the permissions on the data and spool directories.",
                false,
                Severity::ActionRequired,
            )
        }
        DrawerError::Io(_) | DrawerError::Serialization(_) => HumanError::new(
            "drawerkick had a problem reading or writing its settings.",
            "Try again. If this keeps happening, delete config.json to restore the defaults.",
            true,
            Severity::Transient,
        ),
    }
}
