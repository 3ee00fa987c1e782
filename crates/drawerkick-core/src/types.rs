// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for drawerkick: drawer pulse configuration, the published
// error-code table, operation results, and printer inventory records.

use serde::{Deserialize, Serialize};

use crate::error::UsageError;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Stable numeric error codes returned to hosts.
///
/// The numbers are a published contract; they are serialised as plain
/// integers so they survive any host boundary unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    InvalidArgument = 1000,
    OpenError = 1001,
    StartDocError = 1002,
    StartPageError = 1003,
    WriteError = 1004,
    IncompleteWrite = 1005,
    /// Host passed something other than a string as the printer name.
    InvalidName = 1006,
    /// Catch-all for failures outside the submission pipeline.
    OtherError = 1007,
    /// Target printer is a known virtual (PDF, XPS, fax) device.
    VirtualBlocked = 1008,
}

impl ErrorCode {
    const ALL: [ErrorCode; 10] = [
        Self::Success,
        Self::InvalidArgument,
        Self::OpenError,
        Self::StartDocError,
        Self::StartPageError,
        Self::WriteError,
        Self::IncompleteWrite,
        Self::InvalidName,
        Self::OtherError,
        Self::VirtualBlocked,
    ];

    /// Numeric value of this code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Published constant name, as exported to hosts.
    pub fn name(self) -> &'static str {
        match self {
            Self::Success => "PRINTER_SUCCESS",
            Self::InvalidArgument => "PRINTER_INVALID_ARGUMENT",
            Self::OpenError => "PRINTER_OPEN_ERROR",
            Self::StartDocError => "PRINTER_START_DOC_ERROR",
            Self::StartPageError => "PRINTER_START_PAGE_ERROR",
            Self::WriteError => "PRINTER_WRITE_ERROR",
            Self::IncompleteWrite => "PRINTER_INCOMPLETE_WRITE",
            Self::InvalidName => "PRINTER_INVALID_NAME",
            Self::OtherError => "PRINTER_OTHER_ERROR",
            Self::VirtualBlocked => "PRINTER_VIRTUAL_BLOCKED",
        }
    }

    /// The full code table in ascending numeric order.
    pub fn table() -> &'static [ErrorCode] {
        &Self::ALL
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.code() == value)
            .ok_or_else(|| format!("unknown printer error code {value}"))
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}

// ---------------------------------------------------------------------------
// Operation result
// ---------------------------------------------------------------------------

/// Outcome of one open-drawer attempt.
///
/// Starts out successful. The first recorded error is final: later calls to
/// [`OperationResult::set_error`] leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult {
    pub success: bool,
    pub error_code: ErrorCode,
    pub error_message: String,
}

impl OperationResult {
    pub fn new() -> Self {
        Self {
            success: true,
            error_code: ErrorCode::Success,
            error_message: String::new(),
        }
    }

    /// Shorthand for a result that has already failed.
    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.set_error(code, message);
        result
    }

    /// Record the error for this attempt. No-op if one is already recorded.
    pub fn set_error(&mut self, code: ErrorCode, message: impl Into<String>) {
        if !self.success {
            return;
        }
        self.success = false;
        self.error_code = code;
        self.error_message = message.into();
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl Default for OperationResult {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Drawer configuration
// ---------------------------------------------------------------------------

/// Drawer connector pin (0x00 = pin 2; some drawers are wired to 0x01 = pin 5).
pub const DEFAULT_DRAWER_PIN: u8 = 0x00;
/// Pulse on time, ~100ms.
pub const DEFAULT_PULSE_ON_TIME: u8 = 0x32;
/// Pulse off time, ~500ms.
pub const DEFAULT_PULSE_OFF_TIME: u8 = 0xFA;

/// Payload of the ESC/POS pulse command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerConfig {
    pub pin: u8,
    pub pulse_on_time: u8,
    pub pulse_off_time: u8,
}

impl DrawerConfig {
    pub fn new(pin: u8, pulse_on_time: u8, pulse_off_time: u8) -> Self {
        Self {
            pin,
            pulse_on_time,
            pulse_off_time,
        }
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_DRAWER_PIN,
            DEFAULT_PULSE_ON_TIME,
            DEFAULT_PULSE_OFF_TIME,
        )
    }
}

/// Caller-supplied drawer options as they arrive from a host.
///
/// Values are wide integers so that out-of-range input can be rejected
/// instead of silently truncated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerOptions {
    pub pin: Option<i64>,
    pub pulse_on_time: Option<i64>,
    pub pulse_off_time: Option<i64>,
}

impl DrawerOptions {
    /// Overlay these options on `base`, rejecting any value outside 0..=255.
    pub fn resolve(&self, base: DrawerConfig) -> std::result::Result<DrawerConfig, UsageError> {
        Ok(DrawerConfig {
            pin: pick("pin", self.pin, base.pin)?,
            pulse_on_time: pick("pulseOnTime", self.pulse_on_time, base.pulse_on_time)?,
            pulse_off_time: pick("pulseOffTime", self.pulse_off_time, base.pulse_off_time)?,
        })
    }
}

fn pick(field: &'static str, value: Option<i64>, fallback: u8) -> std::result::Result<u8, UsageError> {
    match value {
        None => Ok(fallback),
        Some(v) => u8::try_from(v).map_err(|_| UsageError::OptionOutOfRange { field, value: v }),
    }
}

// ---------------------------------------------------------------------------
// Printer inventory
// ---------------------------------------------------------------------------

/// Normalised printer status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrinterStatus {
    Idle,
    Ok,
    Processing,
    Printing,
    Busy,
    Paused,
    Offline,
    Error,
    Unknown,
}

impl PrinterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Ok => "OK",
            Self::Processing => "PROCESSING",
            Self::Printing => "PRINTING",
            Self::Busy => "BUSY",
            Self::Paused => "PAUSED",
            Self::Offline => "OFFLINE",
            Self::Error => "ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Physical connection medium inferred for a printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionType {
    Usb,
    Network,
    Bluetooth,
    Serial,
    Parallel,
    Virtual,
    Local,
    Unknown,
}

impl ConnectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usb => "USB",
            Self::Network => "NETWORK",
            Self::Bluetooth => "BLUETOOTH",
            Self::Serial => "SERIAL",
            Self::Parallel => "PARALLEL",
            Self::Virtual => "VIRTUAL",
            Self::Local => "LOCAL",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Connection type plus whatever addressing could be extracted for it.
///
/// Constructors keep addressing tied to the matching kind: an IP address and
/// port only ever accompany `Network`, a Bluetooth address only `Bluetooth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    kind: ConnectionType,
    ip_address: Option<String>,
    port: Option<u16>,
    bluetooth_address: Option<String>,
}

impl Topology {
    /// A topology with no addressing data.
    pub fn of(kind: ConnectionType) -> Self {
        Self {
            kind,
            ip_address: None,
            port: None,
            bluetooth_address: None,
        }
    }

    pub fn unknown() -> Self {
        Self::of(ConnectionType::Unknown)
    }

    pub fn network(ip_address: impl Into<String>, port: u16) -> Self {
        Self {
            ip_address: Some(ip_address.into()),
            port: Some(port),
            ..Self::of(ConnectionType::Network)
        }
    }

    pub fn bluetooth(address: Option<String>) -> Self {
        Self {
            bluetooth_address: address,
            ..Self::of(ConnectionType::Bluetooth)
        }
    }

    pub fn kind(&self) -> ConnectionType {
        self.kind
    }

    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn bluetooth_address(&self) -> Option<&str> {
        self.bluetooth_address.as_deref()
    }
}

/// One installed printer as reported by a single enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterInfo {
    pub name: String,
    #[serde(rename = "default")]
    pub is_default: bool,
    pub status: PrinterStatus,
    #[serde(rename = "type")]
    pub kind: ConnectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bluetooth_address: Option<String>,
}

impl PrinterInfo {
    pub fn new(
        name: impl Into<String>,
        is_default: bool,
        status: PrinterStatus,
        topology: Topology,
    ) -> Self {
        Self {
            name: name.into(),
            is_default,
            status,
            kind: topology.kind,
            ip_address: topology.ip_address,
            port: topology.port,
            bluetooth_address: topology.bluetooth_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_published_table() {
        let pairs: Vec<(u16, &str)> = ErrorCode::table()
            .iter()
            .map(|c| (c.code(), c.name()))
            .collect();
        assert_eq!(pairs[0], (0, "PRINTER_SUCCESS"));
        assert_eq!(pairs[1], (1000, "PRINTER_INVALID_ARGUMENT"));
        assert_eq!(pairs[3], (1002, "PRINTER_START_DOC_ERROR"));
        assert_eq!(pairs[9], (1008, "PRINTER_VIRTUAL_BLOCKED"));
        assert_eq!(pairs.len(), 10);
    }

    #[test]
    fn error_code_serialises_as_number() {
        let json = serde_json::to_string(&ErrorCode::StartPageError).unwrap();
        assert_eq!(json, "1003");
        let back: ErrorCode = serde_json::from_str("1008").unwrap();
        assert_eq!(back, ErrorCode::VirtualBlocked);
        assert!(serde_json::from_str::<ErrorCode>("999").is_err());
    }

    #[test]
    fn first_error_wins() {
        let mut result = OperationResult::new();
        assert!(result.is_success());
        result.set_error(ErrorCode::OpenError, "first");
        result.set_error(ErrorCode::WriteError, "second");
        assert!(!result.success);
        assert_eq!(result.error_code, ErrorCode::OpenError);
        assert_eq!(result.error_message, "first");
    }

    #[test]
    fn operation_result_wire_shape() {
        let result = OperationResult::failure(ErrorCode::VirtualBlocked, "nope");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"success": false, "errorCode": 1008, "errorMessage": "nope"})
        );
    }

    #[test]
    fn drawer_defaults() {
        let config = DrawerConfig::default();
        assert_eq!(config, DrawerConfig::new(0x00, 0x32, 0xFA));
    }

    #[test]
    fn options_overlay_and_range_check() {
        let opts = DrawerOptions {
            pin: Some(1),
            pulse_on_time: None,
            pulse_off_time: Some(255),
        };
        let config = opts.resolve(DrawerConfig::default()).unwrap();
        assert_eq!(config, DrawerConfig::new(1, 0x32, 255));

        let bad = DrawerOptions {
            pulse_on_time: Some(256),
            ..Default::default()
        };
        assert!(matches!(
            bad.resolve(DrawerConfig::default()),
            Err(UsageError::OptionOutOfRange { field: "pulseOnTime", value: 256 })
        ));

        let negative = DrawerOptions {
            pin: Some(-1),
            ..Default::default()
        };
        assert!(negative.resolve(DrawerConfig::default()).is_err());
    }

    #[test]
    fn printer_info_omits_absent_addressing() {
        let usb = PrinterInfo::new("Receipt", true, PrinterStatus::Idle, Topology::of(ConnectionType::Usb));
        let value = serde_json::to_value(&usb).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "Receipt", "default": true, "status": "IDLE", "type": "USB"})
        );

        let net = PrinterInfo::new(
            "Kitchen",
            false,
            PrinterStatus::Printing,
            Topology::network("192.168.1.50", 9100),
        );
        let value = serde_json::to_value(&net).unwrap();
        assert_eq!(value["type"], "NETWORK");
        assert_eq!(value["ipAddress"], "192.168.1.50");
        assert_eq!(value["port"], 9100);
        assert!(value.get("bluetoothAddress").is_none());
    }
}
