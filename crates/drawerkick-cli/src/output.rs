// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text rendering of command results.

use std::fmt::Write as _;

use drawerkick_core::human_errors::{HumanError, humanize_result};
use drawerkick_core::{ErrorCode, OperationResult, PrinterInfo};
use serde::Serialize;

/// One row of the published error-code table.
#[derive(Debug, Serialize)]
pub struct CodeRow {
    pub code: u16,
    pub name: &'static str,
}

pub fn code_rows() -> Vec<CodeRow> {
    ErrorCode::table()
        .iter()
        .map(|c| CodeRow {
            code: c.code(),
            name: c.name(),
        })
        .collect()
}

pub fn render_codes() -> String {
    let mut out = String::new();
    for row in code_rows() {
        let _ = writeln!(out, "{:>5}  {}", row.code, row.name);
    }
    out
}

pub fn render_result(printer: &str, result: &OperationResult) -> String {
    match humanize_result(result) {
        None => format!("Cash drawer opened on '{printer}'.\n"),
        Some(human) => render_failure(result, &human),
    }
}

fn render_failure(result: &OperationResult, human: &HumanError) -> String {
    format!(
        "{} ({}): {}\n{}\n{}\n",
        result.error_code.name(),
        result.error_code.code(),
        result.error_message,
        human.message,
        human.suggestion,
    )
}

pub fn render_printers(printers: &[PrinterInfo]) -> String {
    if printers.is_empty() {
        return "No printers found.\n".into();
    }

    let width = printers.iter().map(|p| p.name.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for p in printers {
        let marker = if p.is_default { '*' } else { ' ' };
        let _ = write!(
            out,
            "{marker} {:<width$}  {:<10}  {:<9}",
            p.name,
            p.status.as_str(),
            p.kind.as_str(),
        );
        match (&p.ip_address, p.port, &p.bluetooth_address) {
            (Some(ip), Some(port), _) => {
                let _ = write!(out, "  {ip}:{port}");
            }
            (_, _, Some(bt)) => {
                let _ = write!(out, "  {bt}");
            }
            _ => {}
        }
        out.push('\n');
    }
    out
}
