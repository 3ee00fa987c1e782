// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Call contracts for the native printing subsystems.
//
// These traits mirror the OS primitives one-to-one so that the submission
// drivers in `drawerkick-print` can be exercised against fakes. Native errors
// are carried verbatim: the OS error number and/or its last-error text.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

/// Error reported by a native print call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct NativeError {
    /// OS error number (`GetLastError`, errno, or process exit status).
    pub code: i64,
    /// Subsystem error text.
    pub message: String,
}

impl NativeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error for a target with no print subsystem.
    pub fn unavailable() -> Self {
        Self::new(-1, "printing is not available on this platform")
    }
}

// ---------------------------------------------------------------------------
// Spooler-handle model (Windows)
// ---------------------------------------------------------------------------

/// Opaque printer handle issued by [`SpoolerApi::open_printer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpoolHandle(pub usize);

/// One record from the spooler's printer listing (level-2 info).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpoolerPrinter {
    pub name: String,
    pub port_name: String,
    /// `PRINTER_STATUS_*` bit-field.
    pub status: u32,
    /// `PRINTER_ATTRIBUTE_*` bit-field.
    pub attributes: u32,
}

/// Handle-based spooler primitives.
///
/// Every successful `open_printer`/`start_doc`/`start_page` must be balanced
/// by `close_printer`/`end_doc`/`end_page`; the release calls cannot fail
/// from the caller's point of view.
pub trait SpoolerApi: Send + Sync {
    fn open_printer(&self, name: &str) -> Result<SpoolHandle, NativeError>;

    /// Start a document; returns the spooler job id.
    fn start_doc(&self, handle: SpoolHandle, doc_name: &str, datatype: &str)
    -> Result<u32, NativeError>;

    fn start_page(&self, handle: SpoolHandle) -> Result<(), NativeError>;

    /// Write bytes to the current page; returns how many were accepted.
    fn write(&self, handle: SpoolHandle, data: &[u8]) -> Result<u32, NativeError>;

    fn end_page(&self, handle: SpoolHandle);

    fn end_doc(&self, handle: SpoolHandle);

    fn close_printer(&self, handle: SpoolHandle);

    /// Local and connected printers, in spooler order.
    fn enum_printers(&self) -> Result<Vec<SpoolerPrinter>, NativeError>;

    /// Name of the user's default printer, if one is set.
    fn default_printer(&self) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Destination-list model (CUPS)
// ---------------------------------------------------------------------------

/// Destination option holding the device URI.
pub const OPT_DEVICE_URI: &str = "device-uri";
/// Destination option holding the IPP printer state (3 idle, 4 processing, 5 stopped).
pub const OPT_PRINTER_STATE: &str = "printer-state";
/// Destination option holding comma-separated state reasons.
pub const OPT_PRINTER_STATE_REASONS: &str = "printer-state-reasons";
/// Destination option holding the `CUPS_PRINTER_*` type bits.
pub const OPT_PRINTER_TYPE: &str = "printer-type";

/// One CUPS destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CupsDest {
    pub name: String,
    pub is_default: bool,
    pub options: BTreeMap<String, String>,
}

impl CupsDest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_option(mut self, key: &str, value: impl Into<String>) -> Self {
        self.options.insert(key.to_owned(), value.into());
        self
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// CUPS destination and job primitives.
pub trait CupsApi: Send + Sync {
    /// All destinations, in CUPS order.
    fn get_dests(&self) -> Result<Vec<CupsDest>, NativeError>;

    /// Queue `path` on `dest`; returns the job id (never 0 on success).
    ///
    /// On failure the error message is the subsystem's last-error text.
    fn print_file(&self, dest: &str, path: &Path, title: &str, raw: bool)
    -> Result<u32, NativeError>;
}
