// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spooler-handle submission driver (Windows model).
//
// A drawer kick is four stages: open the printer, start a RAW document,
// start a page, write the five command bytes. Each stage runs only if the
// one before succeeded. Whatever was acquired is released in reverse order
// by `PrinterSession`'s `Drop`, so an early return at any stage leaks
// nothing.

use drawerkick_bridge::{NativeError, SpoolHandle, SpoolerApi};
use drawerkick_core::error::Result;
use drawerkick_core::{DrawerCommand, DrawerError, ErrorCode, OperationResult, PrinterInfo};
use tracing::{debug, info};

use crate::driver::{JOB_TITLE, PrintSubmissionDriver, RAW_DATATYPE};
use crate::enumerate;

/// An open printer handle plus whichever document/page is in progress.
pub struct PrinterSession<'a, S: SpoolerApi + ?Sized> {
    api: &'a S,
    handle: SpoolHandle,
    doc_started: bool,
    page_started: bool,
}

impl<'a, S: SpoolerApi + ?Sized> PrinterSession<'a, S> {
    pub fn open(api: &'a S, printer: &str) -> std::result::Result<Self, NativeError> {
        let handle = api.open_printer(printer)?;
        Ok(Self {
            api,
            handle,
            doc_started: false,
            page_started: false,
        })
    }

    pub fn start_doc(&mut self, doc_name: &str, datatype: &str) -> std::result::Result<u32, NativeError> {
        let job_id = self.api.start_doc(self.handle, doc_name, datatype)?;
        self.doc_started = true;
        Ok(job_id)
    }

    pub fn start_page(&mut self) -> std::result::Result<(), NativeError> {
        self.api.start_page(self.handle)?;
        self.page_started = true;
        Ok(())
    }

    pub fn write(&self, data: &[u8]) -> std::result::Result<u32, NativeError> {
        self.api.write(self.handle, data)
    }
}

impl<S: SpoolerApi + ?Sized> Drop for PrinterSession<'_, S> {
    fn drop(&mut self) {
        if self.page_started {
            self.api.end_page(self.handle);
        }
        if self.doc_started {
            self.api.end_doc(self.handle);
        }
        self.api.close_printer(self.handle);
    }
}

/// Drawer kicks through a handle-based spooler.
pub struct SpoolerDriver<S> {
    api: S,
}

impl<S: SpoolerApi> SpoolerDriver<S> {
    pub fn new(api: S) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &S {
        &self.api
    }
}

impl<S: SpoolerApi> PrintSubmissionDriver for SpoolerDriver<S> {
    fn name(&self) -> &'static str {
        "spooler"
    }

    fn submit(&self, printer: &str, command: &DrawerCommand) -> OperationResult {
        let mut session = match PrinterSession::open(&self.api, printer) {
            Ok(session) => session,
            Err(e) => {
                return OperationResult::failure(
                    ErrorCode::OpenError,
                    format!(
                        "Failed to open printer '{printer}'. Windows Error: {}. Make sure the printer is installed and accessible.",
                        e.code
                    ),
                );
            }
        };
        debug!(printer, "printer handle open");

        let job_id = match session.start_doc(JOB_TITLE, RAW_DATATYPE) {
            Ok(id) => id,
            Err(e) => {
                return OperationResult::failure(
                    ErrorCode::StartDocError,
                    format!("Failed to start print job. Windows Error: {}", e.code),
                );
            }
        };
        debug!(printer, job_id, "document started");

        if let Err(e) = session.start_page() {
            return OperationResult::failure(
                ErrorCode::StartPageError,
                format!("Failed to start page. Windows Error: {}", e.code),
            );
        }

        let bytes = command.as_bytes();
        let written = match session.write(bytes) {
            Ok(n) => n,
            Err(e) => {
                return OperationResult::failure(
                    ErrorCode::WriteError,
                    format!("Failed to write to printer. Windows Error: {}", e.code),
                );
            }
        };
        if written as usize != bytes.len() {
            return OperationResult::failure(
                ErrorCode::IncompleteWrite,
                format!(
                    "Not all bytes were written to printer. Expected: {}, Written: {written}",
                    bytes.len()
                ),
            );
        }

        info!(printer, job_id, "drawer command spooled");
        OperationResult::new()
    }

    fn enumerate(&self) -> Result<Vec<PrinterInfo>> {
        let records = self
            .api
            .enum_printers()
            .map_err(|e| DrawerError::Enumeration(e.to_string()))?;
        let default = self.api.default_printer();
        Ok(enumerate::from_spooler(&records, default.as_deref()))
    }
}
