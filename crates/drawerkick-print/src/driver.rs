// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The print-submission capability and its per-platform selection.

use std::sync::Arc;

use drawerkick_core::error::Result;
use drawerkick_core::{AppConfig, DrawerCommand, OperationResult, PrinterInfo};

/// Document name given to every drawer-kick job.
pub const JOB_TITLE: &str = "Open Cash Drawer";

/// Spooler datatype for jobs whose bytes go to the device untouched.
pub const RAW_DATATYPE: &str = "RAW";

/// Something that can deliver a drawer command to a named printer and list
/// the installed printers.
///
/// Implementations block the calling thread on native calls; the async
/// wrapper in [`crate::dispatch::DrawerService`] moves them onto a blocking
/// worker.
pub trait PrintSubmissionDriver: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Deliver `command` to `printer`. Every failure is reported in the
    /// returned result; nothing is retried.
    fn submit(&self, printer: &str, command: &DrawerCommand) -> OperationResult;

    /// List installed printers in OS order.
    fn enumerate(&self) -> Result<Vec<PrinterInfo>>;
}

/// The driver for the platform this binary was built for.
pub fn platform_driver(config: &AppConfig) -> Arc<dyn PrintSubmissionDriver> {
    #[cfg(windows)]
    {
        // Windows: handle-based spooler.
        let _ = config;
        Arc::new(crate::spooler::SpoolerDriver::new(
            drawerkick_bridge::win32::WinSpool::new(),
        ))
    }
    #[cfg(unix)]
    {
        // Linux/macOS: CUPS destination list plus a spooled temp file.
        Arc::new(crate::cups::CupsDriver::new(
            drawerkick_bridge::cups::CupsCli::new(),
            config.spool_dir.clone(),
        ))
    }
    #[cfg(not(any(windows, unix)))]
    {
        // No print subsystem; every call fails with a native error.
        Arc::new(crate::cups::CupsDriver::new(
            drawerkick_bridge::stub::StubBridge,
            config.spool_dir.clone(),
        ))
    }
}
