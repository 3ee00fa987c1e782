// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Safety gate: printer-name checks that run before any native call.
//
// Sending a drawer pulse to a PDF writer or fax queue produces a stray
// document (or a save dialog on the user's desk), so names that look like
// virtual devices are refused outright.

use crate::error::GateError;
use crate::types::ErrorCode;

/// Longest printer name accepted, in characters.
pub const MAX_PRINTER_NAME_LENGTH: usize = 256;

/// Lower-case fragments identifying virtual printers.
pub const BLOCKED_VIRTUAL_PRINTERS: &[&str] = &[
    "microsoft print to pdf",
    "microsoft xps document writer",
    "onenote",
    "fax",
    "send to onenote",
    "adobe pdf",
    "cute pdf",
    "cutepdf",
    "bullzip pdf",
    "foxit pdf",
    "pdf24",
    "dopdf",
    "pdfcreator",
];

/// Whether `name` contains any deny-list fragment, ignoring case.
pub fn is_blocked_virtual_printer(name: &str) -> bool {
    let lower = name.to_lowercase();
    BLOCKED_VIRTUAL_PRINTERS
        .iter()
        .any(|blocked| lower.contains(blocked))
}

/// Validate a printer name for a drawer kick.
pub fn validate_printer_name(name: &str) -> Result<(), GateError> {
    if name.is_empty() {
        return Err(GateError::new(
            ErrorCode::InvalidArgument,
            "Printer name cannot be empty",
        ));
    }

    if name.chars().count() > MAX_PRINTER_NAME_LENGTH {
        return Err(GateError::new(
            ErrorCode::InvalidArgument,
            format!(
                "Printer name too long. Maximum length is {MAX_PRINTER_NAME_LENGTH} characters"
            ),
        ));
    }

    if is_blocked_virtual_printer(name) {
        return Err(GateError::new(
            ErrorCode::VirtualBlocked,
            format!(
                "Cannot open cash drawer on virtual printer '{name}'. Please use a physical receipt printer."
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_invalid_argument() {
        let err = validate_printer_name("").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }

    #[test]
    fn name_length_limit() {
        let exact = "a".repeat(MAX_PRINTER_NAME_LENGTH);
        assert!(validate_printer_name(&exact).is_ok());

        let over = "a".repeat(MAX_PRINTER_NAME_LENGTH + 1);
        let err = validate_printer_name(&over).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("256"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 256 two-byte characters
        let name = "é".repeat(MAX_PRINTER_NAME_LENGTH);
        assert!(validate_printer_name(&name).is_ok());
    }

    #[test]
    fn virtual_printers_are_blocked() {
        for name in [
            "Microsoft Print to PDF",
            "Microsoft Print to PDF (redirected 2)",
            "MICROSOFT XPS DOCUMENT WRITER",
            "Fax",
            "Send To OneNote 2016",
            "CutePDF Writer",
            "PDF24",
            "Bullzip PDF Printer",
        ] {
            let err = validate_printer_name(name).unwrap_err();
            assert_eq!(err.code, ErrorCode::VirtualBlocked, "{name}");
            assert!(err.message.contains(name));
        }
    }

    #[test]
    fn receipt_printers_pass() {
        for name in ["EPSON TM-T20II Receipt", "Star TSP100", "POS-80C", "\\\\server\\receipt"] {
            assert!(validate_printer_name(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn substring_match_is_permissive() {
        // "fax" anywhere in the name trips the gate
        assert!(is_blocked_virtual_printer("Office Faxmaster 3000"));
    }
}
