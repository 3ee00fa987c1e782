// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File-spool submission driver (CUPS model).
//
// The command bytes are written to a uniquely named temp file which is then
// queued as a raw job. The file is a `NamedTempFile`, so it is unlinked on
// every return path.

use std::io::Write;
use std::path::PathBuf;

use drawerkick_bridge::{CupsApi, NativeError};
use drawerkick_core::error::Result;
use drawerkick_core::{DrawerCommand, DrawerError, ErrorCode, OperationResult, PrinterInfo};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::driver::{JOB_TITLE, PrintSubmissionDriver};
use crate::enumerate;

/// Prefix of the spooled command file.
pub const SPOOL_FILE_PREFIX: &str = "drawer_cmd_";

/// Drawer kicks through a CUPS-style destination list.
pub struct CupsDriver<C> {
    api: C,
    /// Where temp files go; the system temp dir when `None`.
    spool_dir: Option<PathBuf>,
}

impl<C: CupsApi> CupsDriver<C> {
    pub fn new(api: C, spool_dir: Option<PathBuf>) -> Self {
        Self { api, spool_dir }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    fn spool_file(&self) -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SPOOL_FILE_PREFIX);
        match &self.spool_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
    }

    /// Case-insensitive destination lookup; returns the name CUPS knows it by.
    fn resolve(&self, printer: &str) -> std::result::Result<Option<String>, NativeError> {
        let dests = self.api.get_dests()?;
        Ok(dests
            .into_iter()
            .find(|dest| dest.name.eq_ignore_ascii_case(printer))
            .map(|dest| dest.name))
    }
}

impl<C: CupsApi> PrintSubmissionDriver for CupsDriver<C> {
    fn name(&self) -> &'static str {
        "cups"
    }

    fn submit(&self, printer: &str, command: &DrawerCommand) -> OperationResult {
        let dest = match self.resolve(printer) {
            Ok(Some(dest)) => dest,
            Ok(None) => {
                return OperationResult::failure(
                    ErrorCode::OpenError,
                    format!("Printer not found: '{printer}'. Check printer name and installation."),
                );
            }
            Err(e) => {
                return OperationResult::failure(
                    ErrorCode::OpenError,
                    format!("Failed to look up printer '{printer}': {}", e.message),
                );
            }
        };
        debug!(printer, dest = %dest, "destination resolved");

        let mut file = match self.spool_file() {
            Ok(file) => file,
            Err(e) => {
                return OperationResult::failure(
                    ErrorCode::WriteError,
                    format!("Failed to create temporary file: {e}"),
                );
            }
        };

        let bytes = command.as_bytes();
        let written = file.write(bytes).and_then(|n| file.flush().map(|()| n));
        match written {
            Ok(n) if n == bytes.len() => {}
            Ok(n) => {
                return OperationResult::failure(
                    ErrorCode::WriteError,
                    format!(
                        "Failed to write command to temporary file: wrote {n} of {} bytes",
                        bytes.len()
                    ),
                );
            }
            Err(e) => {
                return OperationResult::failure(
                    ErrorCode::WriteError,
                    format!("Failed to write command to temporary file: {e}"),
                );
            }
        }

        let submitted = self.api.print_file(&dest, file.path(), JOB_TITLE, true);
        drop(file);

        match submitted {
            Ok(job_id) if job_id != 0 => {
                info!(printer, job_id, "drawer command queued");
                OperationResult::new()
            }
            Ok(_) => OperationResult::failure(
                ErrorCode::StartDocError,
                format!("Failed to send print job to '{printer}': no job id returned"),
            ),
            Err(e) => OperationResult::failure(
                ErrorCode::StartDocError,
                format!("Failed to send print job to '{printer}': {}", e.message),
            ),
        }
    }

    fn enumerate(&self) -> Result<Vec<PrinterInfo>> {
        let dests = self
            .api
            .get_dests()
            .map_err(|e| DrawerError::Enumeration(e.to_string()))?;
        Ok(enumerate::from_cups(&dests))
    }
}
