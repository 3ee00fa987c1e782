// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-user data directory resolution.

use std::path::{Path, PathBuf};

/// The drawerkick data directory. Nothing is created here; see [`ensure`].
pub fn data_dir() -> PathBuf {
    base_dir().join("drawerkick")
}

/// Create `dir` and its parents. Called once logging is up so a failure can
/// be reported.
pub fn ensure(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}

fn base_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(xdg);
    }
    if let Some(home) = std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Windows shells rarely set HOME.
    if let Some(appdata) = std::env::var_os("APPDATA").filter(|v| !v.is_empty()) {
        return PathBuf::from(appdata);
    }
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_creates_nested_directories() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("a").join("drawerkick");
        ensure(&dir).unwrap();
        assert!(dir.is_dir());
        // Already there is fine.
        ensure(&dir).unwrap();
    }

    #[test]
    fn ensure_reports_a_blocked_path() {
        let root = tempfile::tempdir().unwrap();
        let file = root.path().join("occupied");
        std::fs::write(&file, b"x").unwrap();
        assert!(ensure(&file.join("drawerkick")).is_err());
    }

    #[test]
    fn data_dir_is_named_after_the_tool() {
        assert!(data_dir().ends_with("drawerkick"));
    }
}
