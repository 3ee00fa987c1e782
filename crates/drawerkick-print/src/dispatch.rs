// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Open-drawer pipeline and the async service hosts call into.
//
// `open_drawer` is the synchronous pipeline: safety gate, command build,
// driver submission. `DrawerService` validates caller input up front, then
// runs each request as its own blocking task. Requests are not serialised
// against each other, even for the same printer.

use std::sync::Arc;

use drawerkick_core::safety::{self, MAX_PRINTER_NAME_LENGTH};
use drawerkick_core::{
    AppConfig, DrawerCommand, DrawerConfig, DrawerOptions, ErrorCode, OperationResult, PrinterInfo,
    UsageError,
};
use tracing::{debug, info, instrument, warn};

use crate::driver::{PrintSubmissionDriver, platform_driver};

/// Gate, encode and submit one drawer kick.
///
/// Gate rejections come back as failed results without touching the driver.
#[instrument(skip(driver, config), fields(backend = driver.name()))]
pub fn open_drawer(
    driver: &dyn PrintSubmissionDriver,
    printer: &str,
    config: &DrawerConfig,
) -> OperationResult {
    if let Err(rejection) = safety::validate_printer_name(printer) {
        warn!(code = %rejection.code, "printer name rejected: {}", rejection.message);
        return rejection.into();
    }

    let command = DrawerCommand::build(config);
    debug!(bytes = ?command.as_bytes(), "submitting drawer command");

    let result = driver.submit(printer, &command);
    if result.success {
        info!("cash drawer opened");
    } else {
        warn!(code = %result.error_code, "failed to open cash drawer: {}", result.error_message);
    }
    result
}

/// Caller-level name check, applied before any task is scheduled.
pub fn check_printer_name(printer: &str) -> Result<(), UsageError> {
    let len = printer.chars().count();
    if len > MAX_PRINTER_NAME_LENGTH {
        return Err(UsageError::NameTooLong {
            len,
            max: MAX_PRINTER_NAME_LENGTH,
        });
    }
    Ok(())
}

/// Async entry points for hosts.
#[derive(Clone)]
pub struct DrawerService {
    driver: Arc<dyn PrintSubmissionDriver>,
    defaults: DrawerConfig,
}

impl DrawerService {
    pub fn new(driver: Arc<dyn PrintSubmissionDriver>) -> Self {
        Self {
            driver,
            defaults: DrawerConfig::default(),
        }
    }

    /// Pulse parameters used for options the caller leaves out.
    pub fn with_defaults(mut self, defaults: DrawerConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Service backed by this platform's driver and `config`'s defaults.
    pub fn platform(config: &AppConfig) -> Self {
        Self::new(platform_driver(config)).with_defaults(config.drawer)
    }

    pub fn driver_name(&self) -> &'static str {
        self.driver.name()
    }

    /// Kick the drawer attached to `printer`.
    ///
    /// Returns `Err` only for caller misuse, before anything is scheduled.
    /// Everything after that, including a failed worker task, is an
    /// `OperationResult`.
    pub async fn open_cash_drawer(
        &self,
        printer: &str,
        options: Option<DrawerOptions>,
    ) -> Result<OperationResult, UsageError> {
        check_printer_name(printer)?;
        let config = options.unwrap_or_default().resolve(self.defaults)?;

        let driver = Arc::clone(&self.driver);
        let printer = printer.to_owned();
        let task = tokio::task::spawn_blocking(move || open_drawer(driver.as_ref(), &printer, &config));

        Ok(task.await.unwrap_or_else(|e| {
            warn!(error = %e, "open-drawer task failed");
            OperationResult::failure(
                ErrorCode::OtherError,
                format!("Failed to open Cash Drawer: {e}"),
            )
        }))
    }

    /// Installed printers in OS order. Failures are logged and yield an
    /// empty list.
    pub async fn get_available_printers(&self) -> Vec<PrinterInfo> {
        let driver = Arc::clone(&self.driver);
        match tokio::task::spawn_blocking(move || driver.enumerate()).await {
            Ok(Ok(printers)) => {
                debug!(count = printers.len(), "printers enumerated");
                printers
            }
            Ok(Err(e)) => {
                warn!(error = %e, "printer enumeration failed");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "enumeration task failed");
                Vec::new()
            }
        }
    }
}
