// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory bridges and drivers for unit tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use drawerkick_bridge::{CupsApi, CupsDest, NativeError, SpoolHandle, SpoolerApi, SpoolerPrinter};
use drawerkick_core::error::Result;
use drawerkick_core::{DrawerCommand, DrawerError, OperationResult, PrinterInfo};

use crate::driver::PrintSubmissionDriver;

// ---------------------------------------------------------------------------
// Spooler
// ---------------------------------------------------------------------------

/// Spooler stage a [`FakeSpooler`] can be told to fail at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Open,
    StartDoc,
    StartPage,
    Write,
    Enumerate,
}

#[derive(Default)]
struct SpoolerLog {
    calls: Vec<String>,
    written: Vec<Vec<u8>>,
    handles: usize,
    docs: usize,
    pages: usize,
}

/// Records every call and tracks outstanding handles, documents and pages.
pub struct FakeSpooler {
    fail: Option<(Stage, i64)>,
    accept: Option<u32>,
    printers: Vec<SpoolerPrinter>,
    default: Option<String>,
    log: Mutex<SpoolerLog>,
}

impl FakeSpooler {
    pub fn new() -> Self {
        Self {
            fail: None,
            accept: None,
            printers: Vec::new(),
            default: None,
            log: Mutex::new(SpoolerLog::default()),
        }
    }

    pub fn failing_at(stage: Stage, code: i64) -> Self {
        Self {
            fail: Some((stage, code)),
            ..Self::new()
        }
    }

    pub fn with_printers(printers: Vec<SpoolerPrinter>, default: Option<&str>) -> Self {
        Self {
            printers,
            default: default.map(str::to_owned),
            ..Self::new()
        }
    }

    pub fn printer(name: &str, port: &str, status: u32, attributes: u32) -> SpoolerPrinter {
        SpoolerPrinter {
            name: name.into(),
            port_name: port.into(),
            status,
            attributes,
        }
    }

    /// Accept at most `n` bytes per write.
    pub fn accepting(mut self, n: u32) -> Self {
        self.accept = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn written(&self) -> Vec<Vec<u8>> {
        self.log.lock().unwrap().written.clone()
    }

    /// `(handles, documents, pages)` acquired but not yet released.
    pub fn outstanding(&self) -> (usize, usize, usize) {
        let log = self.log.lock().unwrap();
        (log.handles, log.docs, log.pages)
    }

    fn check(&self, stage: Stage) -> std::result::Result<(), NativeError> {
        match self.fail {
            Some((failing, code)) if failing == stage => {
                Err(NativeError::new(code, format!("Windows Error: {code}")))
            }
            _ => Ok(()),
        }
    }
}

impl SpoolerApi for FakeSpooler {
    fn open_printer(&self, name: &str) -> std::result::Result<SpoolHandle, NativeError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push(format!("open {name}"));
        self.check(Stage::Open)?;
        log.handles += 1;
        Ok(SpoolHandle(0x1000 + log.handles))
    }

    fn start_doc(
        &self,
        _handle: SpoolHandle,
        doc_name: &str,
        datatype: &str,
    ) -> std::result::Result<u32, NativeError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push(format!("start_doc {doc_name} {datatype}"));
        self.check(Stage::StartDoc)?;
        log.docs += 1;
        Ok(42)
    }

    fn start_page(&self, _handle: SpoolHandle) -> std::result::Result<(), NativeError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("start_page".into());
        self.check(Stage::StartPage)?;
        log.pages += 1;
        Ok(())
    }

    fn write(&self, _handle: SpoolHandle, data: &[u8]) -> std::result::Result<u32, NativeError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push(format!("write {}", data.len()));
        self.check(Stage::Write)?;
        let n = self.accept.map_or(data.len(), |max| data.len().min(max as usize));
        log.written.push(data[..n].to_vec());
        Ok(n as u32)
    }

    fn end_page(&self, _handle: SpoolHandle) {
        let mut log = self.log.lock().unwrap();
        log.calls.push("end_page".into());
        log.pages -= 1;
    }

    fn end_doc(&self, _handle: SpoolHandle) {
        let mut log = self.log.lock().unwrap();
        log.calls.push("end_doc".into());
        log.docs -= 1;
    }

    fn close_printer(&self, _handle: SpoolHandle) {
        let mut log = self.log.lock().unwrap();
        log.calls.push("close".into());
        log.handles -= 1;
    }

    fn enum_printers(&self) -> std::result::Result<Vec<SpoolerPrinter>, NativeError> {
        self.check(Stage::Enumerate)?;
        Ok(self.printers.clone())
    }

    fn default_printer(&self) -> Option<String> {
        self.default.clone()
    }
}

// ---------------------------------------------------------------------------
// CUPS
// ---------------------------------------------------------------------------

/// One job handed to [`FakeCups::print_file`].
#[derive(Debug, Clone)]
pub struct SubmittedJob {
    pub dest: String,
    pub path: PathBuf,
    pub title: String,
    pub raw: bool,
    /// File contents at submission time.
    pub contents: Vec<u8>,
}

pub struct FakeCups {
    dests: Option<Vec<CupsDest>>,
    reject: Option<String>,
    job_id: u32,
    jobs: Mutex<Vec<SubmittedJob>>,
}

impl FakeCups {
    pub fn new(dests: Vec<CupsDest>) -> Self {
        Self {
            dests: Some(dests),
            reject: None,
            job_id: 7,
            jobs: Mutex::new(Vec::new()),
        }
    }

    /// Destination listing fails.
    pub fn unreachable() -> Self {
        Self {
            dests: None,
            ..Self::new(Vec::new())
        }
    }

    /// `print_file` fails with `message` as the last-error text.
    pub fn rejecting(mut self, message: &str) -> Self {
        self.reject = Some(message.to_owned());
        self
    }

    pub fn returning_job(mut self, job_id: u32) -> Self {
        self.job_id = job_id;
        self
    }

    pub fn jobs(&self) -> Vec<SubmittedJob> {
        self.jobs.lock().unwrap().clone()
    }
}

impl CupsApi for FakeCups {
    fn get_dests(&self) -> std::result::Result<Vec<CupsDest>, NativeError> {
        self.dests
            .clone()
            .ok_or_else(|| NativeError::new(1, "scheduler is not running"))
    }

    fn print_file(
        &self,
        dest: &str,
        path: &Path,
        title: &str,
        raw: bool,
    ) -> std::result::Result<u32, NativeError> {
        if let Some(message) = &self.reject {
            return Err(NativeError::new(1, message.clone()));
        }
        let contents = std::fs::read(path).map_err(|e| NativeError::new(2, e.to_string()))?;
        self.jobs.lock().unwrap().push(SubmittedJob {
            dest: dest.to_owned(),
            path: path.to_owned(),
            title: title.to_owned(),
            raw,
            contents,
        });
        Ok(self.job_id)
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Driver that counts submissions and returns canned results.
pub struct CountingDriver {
    submits: AtomicUsize,
    result: OperationResult,
    printers: Option<Vec<PrinterInfo>>,
    last_command: Mutex<Option<DrawerCommand>>,
}

impl CountingDriver {
    pub fn new() -> Self {
        Self::returning(OperationResult::new())
    }

    pub fn returning(result: OperationResult) -> Self {
        Self {
            submits: AtomicUsize::new(0),
            result,
            printers: Some(Vec::new()),
            last_command: Mutex::new(None),
        }
    }

    pub fn with_printers(printers: Vec<PrinterInfo>) -> Self {
        Self {
            printers: Some(printers),
            ..Self::new()
        }
    }

    /// Enumeration always fails.
    pub fn broken_enumeration() -> Self {
        Self {
            printers: None,
            ..Self::new()
        }
    }

    pub fn submits(&self) -> usize {
        self.submits.load(Ordering::SeqCst)
    }

    pub fn last_command(&self) -> Option<DrawerCommand> {
        *self.last_command.lock().unwrap()
    }
}

impl PrintSubmissionDriver for CountingDriver {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn submit(&self, _printer: &str, command: &DrawerCommand) -> OperationResult {
        self.submits.fetch_add(1, Ordering::SeqCst);
        *self.last_command.lock().unwrap() = Some(*command);
        self.result.clone()
    }

    fn enumerate(&self) -> Result<Vec<PrinterInfo>> {
        self.printers
            .clone()
            .ok_or_else(|| DrawerError::Enumeration("spooler not running".into()))
    }
}
