// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native printer status -> `PrinterStatus`.

use drawerkick_core::types::PrinterStatus;

// Spooler `PRINTER_STATUS_*` bits.
pub const STATUS_PAUSED: u32 = 0x0000_0001;
pub const STATUS_ERROR: u32 = 0x0000_0002;
pub const STATUS_PAPER_JAM: u32 = 0x0000_0008;
pub const STATUS_PAPER_OUT: u32 = 0x0000_0010;
pub const STATUS_OFFLINE: u32 = 0x0000_0080;
pub const STATUS_BUSY: u32 = 0x0000_0200;
pub const STATUS_PRINTING: u32 = 0x0000_0400;
pub const STATUS_NOT_AVAILABLE: u32 = 0x0000_1000;
pub const STATUS_PROCESSING: u32 = 0x0000_4000;

// Spooler `PRINTER_ATTRIBUTE_*` bits.
pub const ATTRIBUTE_NETWORK: u32 = 0x0000_0010;
pub const ATTRIBUTE_LOCAL: u32 = 0x0000_0040;
pub const ATTRIBUTE_WORK_OFFLINE: u32 = 0x0000_0400;

/// CUPS `printer-type` bit for a queue hosted on another server.
pub const CUPS_PRINTER_REMOTE: u32 = 0x0000_0002;

/// Map spooler status and attribute bits, highest priority first.
pub fn spooler_status(status: u32, attributes: u32) -> PrinterStatus {
    if attributes & ATTRIBUTE_WORK_OFFLINE != 0 || status & STATUS_OFFLINE != 0 {
        PrinterStatus::Offline
    } else if status & (STATUS_PAPER_JAM | STATUS_PAPER_OUT | STATUS_ERROR) != 0 {
        PrinterStatus::Error
    } else if status & STATUS_NOT_AVAILABLE != 0 {
        PrinterStatus::Offline
    } else if status & STATUS_PAUSED != 0 {
        PrinterStatus::Paused
    } else if status & STATUS_BUSY != 0 {
        PrinterStatus::Busy
    } else if status & STATUS_PRINTING != 0 {
        PrinterStatus::Printing
    } else if status & STATUS_PROCESSING != 0 {
        PrinterStatus::Processing
    } else if status == 0 {
        PrinterStatus::Idle
    } else {
        PrinterStatus::Unknown
    }
}

/// Map a CUPS `printer-state` value and its comma-separated reasons.
///
/// Reasons take precedence over the state: a queue can be "idle" while its
/// device reports `offline-report`.
pub fn cups_status(state: Option<&str>, reasons: Option<&str>) -> PrinterStatus {
    let reasons: Vec<&str> = reasons
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty() && *r != "none")
        .collect();

    if reasons.iter().any(|r| r.contains("offline")) {
        return PrinterStatus::Offline;
    }
    if reasons
        .iter()
        .any(|r| r.contains("media-jam") || r.contains("media-empty") || r.ends_with("-error"))
    {
        return PrinterStatus::Error;
    }

    match state.map(str::trim) {
        None => PrinterStatus::Ok,
        Some("3") => PrinterStatus::Idle,
        // A queue that is processing a job is still usable.
        Some("4") => PrinterStatus::Ok,
        Some("5") => PrinterStatus::Offline,
        Some(_) => PrinterStatus::Unknown,
    }
}
