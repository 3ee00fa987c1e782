// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drawerkick Print — submission drivers for the Windows spooler and CUPS,
// printer enumeration, topology classification and the async service that
// hosts call into.

pub mod classify;
pub mod cups;
pub mod dispatch;
pub mod driver;
pub mod enumerate;
pub mod spooler;
pub mod status;

#[cfg(test)]
mod testing;

pub use classify::{classify_port, classify_uri};
pub use cups::CupsDriver;
pub use dispatch::{DrawerService, open_drawer};
pub use driver::{PrintSubmissionDriver, platform_driver};
pub use spooler::SpoolerDriver;
