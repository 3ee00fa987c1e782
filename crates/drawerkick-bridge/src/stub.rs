// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for targets with neither the Windows spooler nor CUPS.
//
// Every call fails; real implementations live in the `win32` and `cups`
// modules.

use std::path::Path;

use crate::traits::{CupsApi, CupsDest, NativeError};

/// No-op bridge returned on unsupported platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubBridge;

impl CupsApi for StubBridge {
    fn get_dests(&self) -> Result<Vec<CupsDest>, NativeError> {
        tracing::warn!("CupsApi::get_dests called on stub bridge");
        Err(NativeError::unavailable())
    }

    fn print_file(
        &self,
        _dest: &str,
        _path: &Path,
        _title: &str,
        _raw: bool,
    ) -> Result<u32, NativeError> {
        tracing::warn!("CupsApi::print_file called on stub bridge");
        Err(NativeError::unavailable())
    }
}
