// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// CUPS bridge over the standard command-line clients.
//
// `lpstat` supplies the destination list (device URIs, default destination,
// queue state and alerts), `lpoptions` the per-destination `printer-type`
// flags, and `lp` submits jobs. All run under `LC_ALL=C` so their output can
// be parsed reliably.

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::traits::{
    CupsApi, CupsDest, NativeError, OPT_DEVICE_URI, OPT_PRINTER_STATE, OPT_PRINTER_STATE_REASONS,
    OPT_PRINTER_TYPE,
};

/// IPP printer-state values.
const STATE_IDLE: &str = "3";
const STATE_PROCESSING: &str = "4";
const STATE_STOPPED: &str = "5";

/// CUPS reached through `lpstat`, `lpoptions` and `lp`.
#[derive(Debug, Clone)]
pub struct CupsCli {
    lpstat: String,
    lpoptions: String,
    lp: String,
}

impl Default for CupsCli {
    fn default() -> Self {
        Self {
            lpstat: "lpstat".into(),
            lpoptions: "lpoptions".into(),
            lp: "lp".into(),
        }
    }
}

impl CupsCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use alternative client binaries (e.g. a different CUPS install prefix).
    pub fn with_programs(
        lpstat: impl Into<String>,
        lpoptions: impl Into<String>,
        lp: impl Into<String>,
    ) -> Self {
        Self {
            lpstat: lpstat.into(),
            lpoptions: lpoptions.into(),
            lp: lp.into(),
        }
    }

    /// `printer-type` of one destination; `None` when `lpoptions` fails.
    fn printer_type(&self, dest: &str) -> Option<u32> {
        match self.run(&self.lpoptions, &["-p", dest]) {
            Ok(text) => parse_printer_type(&text),
            Err(e) => {
                debug!(dest, error = %e, "lpoptions failed; printer-type unknown");
                None
            }
        }
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<String, NativeError> {
        debug!(program, ?args, "running CUPS client");
        let output = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .output()
            .map_err(|e| {
                NativeError::new(
                    i64::from(e.raw_os_error().unwrap_or(-1)),
                    format!("{program}: {e}"),
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
            let message = if stderr.is_empty() {
                format!("{program} exited with {}", output.status)
            } else {
                stderr
            };
            return Err(NativeError::new(
                i64::from(output.status.code().unwrap_or(-1)),
                message,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl CupsApi for CupsCli {
    fn get_dests(&self) -> Result<Vec<CupsDest>, NativeError> {
        let devices = match self.run(&self.lpstat, &["-v"]) {
            Ok(text) => parse_devices(&text),
            Err(e) if e.message.to_ascii_lowercase().contains("no destinations") => {
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let default = self
            .run(&self.lpstat, &["-d"])
            .ok()
            .and_then(|text| parse_default(&text));

        let states = match self.run(&self.lpstat, &["-l", "-p"]) {
            Ok(text) => parse_printer_states(&text),
            Err(e) => {
                warn!(error = %e, "lpstat -p failed; printer states unknown");
                HashMap::new()
            }
        };

        let types: HashMap<String, u32> = devices
            .iter()
            .filter_map(|(name, _)| Some((name.clone(), self.printer_type(name)?)))
            .collect();

        Ok(assemble_dests(devices, default.as_deref(), &states, &types))
    }

    fn print_file(
        &self,
        dest: &str,
        path: &Path,
        title: &str,
        raw: bool,
    ) -> Result<u32, NativeError> {
        let path_str = path.to_string_lossy();
        let mut args = vec!["-d", dest, "-t", title];
        if raw {
            args.extend(["-o", "raw"]);
        }
        args.push(path_str.as_ref());

        let stdout = self.run(&self.lp, &args)?;
        parse_job_id(&stdout).ok_or_else(|| {
            NativeError::new(0, format!("lp did not report a job id: {}", stdout.trim()))
        })
    }
}

/// Merge the per-command listings into destinations, in `lpstat -v` order.
fn assemble_dests(
    devices: Vec<(String, String)>,
    default: Option<&str>,
    states: &HashMap<String, QueueState>,
    types: &HashMap<String, u32>,
) -> Vec<CupsDest> {
    devices
        .into_iter()
        .map(|(name, uri)| {
            let mut dest = CupsDest::new(name.clone()).with_option(OPT_DEVICE_URI, uri);
            dest.is_default = default == Some(name.as_str());
            if let Some(state) = states.get(&name) {
                dest = dest
                    .with_option(OPT_PRINTER_STATE, state.state)
                    .with_option(OPT_PRINTER_STATE_REASONS, state.reasons.join(","));
            }
            if let Some(flags) = types.get(&name) {
                dest = dest.with_option(OPT_PRINTER_TYPE, flags.to_string());
            }
            dest
        })
        .collect()
}

// -- output parsers ----------------------------------------------------------

/// `device for NAME: URI` lines, in listing order.
fn parse_devices(text: &str) -> Vec<(String, String)> {
    text.lines()
        .filter_map(|line| line.strip_prefix("device for "))
        .filter_map(|rest| rest.split_once(": "))
        .map(|(name, uri)| (name.trim().to_owned(), uri.trim().to_owned()))
        .collect()
}

/// `system default destination: NAME`, or nothing.
fn parse_default(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| line.strip_prefix("system default destination: "))
        .map(|name| name.trim().to_owned())
        .filter(|name| !name.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueueState {
    state: &'static str,
    reasons: Vec<String>,
}

/// Parse `lpstat -l -p`: a `printer NAME ...` header per queue, followed by
/// indented detail lines, one of which may be `Alerts: reason reason ...`.
fn parse_printer_states(text: &str) -> HashMap<String, QueueState> {
    let mut states = HashMap::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("printer ") {
            let Some((name, summary)) = rest.split_once(' ') else {
                continue;
            };
            let state = if summary.starts_with("is idle") {
                STATE_IDLE
            } else if summary.starts_with("now printing") {
                STATE_PROCESSING
            } else if summary.starts_with("disabled") {
                STATE_STOPPED
            } else {
                continue;
            };
            states.insert(
                name.to_owned(),
                QueueState {
                    state,
                    reasons: Vec::new(),
                },
            );
            current = Some(name.to_owned());
        } else if let Some(alerts) = line.trim_start().strip_prefix("Alerts:") {
            let Some(entry) = current.as_ref().and_then(|name| states.get_mut(name)) else {
                continue;
            };
            entry.reasons = alerts
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|r| !r.is_empty() && *r != "none")
                .map(str::to_owned)
                .collect();
        }
    }

    states
}

/// The `printer-type=N` token of an `lpoptions -p NAME` line.
fn parse_printer_type(text: &str) -> Option<u32> {
    text.split_whitespace()
        .find_map(|token| token.strip_prefix("printer-type="))
        .and_then(|value| value.trim_matches('\'').parse().ok())
}

/// `request id is NAME-123 (1 file(s))` → 123.
fn parse_job_id(text: &str) -> Option<u32> {
    let rest = text
        .lines()
        .find_map(|line| line.trim().strip_prefix("request id is "))?;
    let request = rest.split_whitespace().next()?;
    let (_, id) = request.rsplit_once('-')?;
    id.parse().ok().filter(|id| *id != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_device_lines_in_order() {
        let text = "device for Receipt: usb://EPSON/TM-T20II?serial=123\n\
                    device for Kitchen: socket://192.168.1.50:9100\n\
                    device for PDF: cups-pdf:/\n";
        let devices = parse_devices(text);
        assert_eq!(devices.len(), 3);
        assert_eq!(devices[0].0, "Receipt");
        assert_eq!(devices[1].1, "socket://192.168.1.50:9100");
        assert_eq!(devices[2], ("PDF".to_owned(), "cups-pdf:/".to_owned()));
    }

    #[test]
    fn parses_default_destination() {
        assert_eq!(
            parse_default("system default destination: Receipt\n"),
            Some("Receipt".to_owned())
        );
        assert_eq!(parse_default("no system default destination\n"), None);
    }

    #[test]
    fn parses_queue_states_and_alerts() {
        let text = "printer Receipt is idle.  enabled since Mon 01 Jan 2024\n\
                    \tForm mounted:\n\
                    \tAlerts: none\n\
                    printer Kitchen now printing Kitchen-42.  enabled since Mon 01 Jan 2024\n\
                    \tAlerts: cups-waiting-for-job-completed\n\
                    printer Bar disabled since Mon 01 Jan 2024 -\n\
                    \tPaused\n\
                    \tAlerts: offline-report media-empty-error\n";
        let states = parse_printer_states(text);
        assert_eq!(states["Receipt"].state, STATE_IDLE);
        assert!(states["Receipt"].reasons.is_empty());
        assert_eq!(states["Kitchen"].state, STATE_PROCESSING);
        assert_eq!(states["Bar"].state, STATE_STOPPED);
        assert_eq!(
            states["Bar"].reasons,
            vec!["offline-report".to_owned(), "media-empty-error".to_owned()]
        );
    }

    #[test]
    fn parses_printer_type() {
        let text = "copies=1 device-uri=hp:/net/OfficeJet?ip=10.0.0.9 \
                    printer-info='Office Jet' printer-is-shared=false \
                    printer-type=8425476 printer-uri-supported=ipp://localhost/printers/OfficeJet\n";
        assert_eq!(parse_printer_type(text), Some(8_425_476));
        assert_eq!(parse_printer_type("printer-type='6'"), Some(6));
        assert_eq!(parse_printer_type("copies=1 printer-info=Receipt"), None);
        assert_eq!(parse_printer_type("printer-type=remote"), None);
    }

    #[test]
    fn assembled_dests_carry_printer_type() {
        let devices = vec![
            ("OfficeJet".to_owned(), "hp:/net/OfficeJet?ip=10.0.0.9".to_owned()),
            ("Shared".to_owned(), "implicitclass://Shared/".to_owned()),
            ("Receipt".to_owned(), "usb://EPSON/TM-T20II".to_owned()),
        ];
        let states = parse_printer_states("printer Receipt is idle.  enabled since Mon\n");
        let types = HashMap::from([("OfficeJet".to_owned(), 4), ("Shared".to_owned(), 6)]);

        let dests = assemble_dests(devices, Some("Receipt"), &states, &types);

        let names: Vec<&str> = dests.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["OfficeJet", "Shared", "Receipt"]);
        assert_eq!(dests[0].option(OPT_PRINTER_TYPE), Some("4"));
        assert_eq!(dests[1].option(OPT_PRINTER_TYPE), Some("6"));
        assert_eq!(dests[2].option(OPT_PRINTER_TYPE), None);
        assert_eq!(dests[2].option(OPT_PRINTER_STATE), Some(STATE_IDLE));
        assert!(dests[2].is_default);
        assert!(!dests[0].is_default);
    }

    #[test]
    fn parses_job_id() {
        assert_eq!(parse_job_id("request id is Receipt-123 (1 file(s))\n"), Some(123));
        assert_eq!(parse_job_id("request id is my-printer-7 (0 file(s))"), Some(7));
        assert_eq!(parse_job_id("lp: error - no default destination"), None);
        assert_eq!(parse_job_id("request id is Receipt-0 (1 file(s))"), None);
    }

    #[test]
    fn missing_program_is_a_native_error() {
        let cli = CupsCli::with_programs(
            "/nonexistent/lpstat",
            "/nonexistent/lpoptions",
            "/nonexistent/lp",
        );
        let err = cli.get_dests().unwrap_err();
        assert!(err.message.contains("/nonexistent/lpstat"));
    }
}
