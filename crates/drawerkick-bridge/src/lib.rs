// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drawerkick — native print subsystem bridges.
//
// Two structurally different OS printing models sit behind the traits in
// `traits`: the handle-based Windows spooler and the destination-list CUPS
// model. Exactly one native implementation is compiled per target; other
// targets get the stub, which refuses every call.

pub mod traits;

#[cfg(windows)]
pub mod win32;

#[cfg(unix)]
pub mod cups;

#[cfg(not(any(windows, unix)))]
pub mod stub;

pub use traits::*;
