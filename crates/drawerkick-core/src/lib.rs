// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drawerkick — core types, error codes, the ESC/POS pulse command and the
// printer-name safety gate shared across all crates.

pub mod command;
pub mod config;
pub mod error;
pub mod human_errors;
pub mod safety;
pub mod types;

pub use command::DrawerCommand;
pub use config::AppConfig;
pub use error::{DrawerError, GateError, UsageError};
pub use types::*;
