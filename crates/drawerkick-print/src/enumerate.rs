// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native printer records -> `PrinterInfo`, one pass, OS order preserved.

use drawerkick_bridge::{
    CupsDest, OPT_DEVICE_URI, OPT_PRINTER_STATE, OPT_PRINTER_STATE_REASONS, OPT_PRINTER_TYPE,
    SpoolerPrinter,
};
use drawerkick_core::PrinterInfo;
use tracing::debug;

use crate::classify::{classify_port, classify_uri};
use crate::status::{cups_status, spooler_status};

/// Build the inventory from spooler records.
pub fn from_spooler(records: &[SpoolerPrinter], default: Option<&str>) -> Vec<PrinterInfo> {
    let printers: Vec<PrinterInfo> = records
        .iter()
        .map(|record| {
            PrinterInfo::new(
                record.name.clone(),
                default == Some(record.name.as_str()),
                spooler_status(record.status, record.attributes),
                classify_port(&record.port_name, record.attributes),
            )
        })
        .collect();
    debug!(count = printers.len(), "spooler printers enumerated");
    printers
}

/// Build the inventory from CUPS destinations.
pub fn from_cups(dests: &[CupsDest]) -> Vec<PrinterInfo> {
    let printers: Vec<PrinterInfo> = dests
        .iter()
        .map(|dest| {
            let printer_type = dest
                .option(OPT_PRINTER_TYPE)
                .and_then(|bits| bits.trim().parse::<u32>().ok());
            PrinterInfo::new(
                dest.name.clone(),
                dest.is_default,
                cups_status(
                    dest.option(OPT_PRINTER_STATE),
                    dest.option(OPT_PRINTER_STATE_REASONS),
                ),
                classify_uri(dest.option(OPT_DEVICE_URI).unwrap_or_default(), printer_type),
            )
        })
        .collect();
    debug!(count = printers.len(), "CUPS destinations enumerated");
    printers
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawerkick_core::{ConnectionType, PrinterStatus};

    fn record(name: &str, port: &str, status: u32, attributes: u32) -> SpoolerPrinter {
        SpoolerPrinter {
            name: name.into(),
            port_name: port.into(),
            status,
            attributes,
        }
    }

    #[test]
    fn empty_listing_is_empty() {
        assert!(from_spooler(&[], None).is_empty());
        assert!(from_cups(&[]).is_empty());
    }

    #[test]
    fn spooler_order_is_preserved() {
        let records = [
            record("Zeta", "COM1:", 0, 0x40),
            record("Alpha", "LPT1:", 0x1, 0x40),
            record("Mid", "BTH 00:11:22:33:44:55", 0x400, 0x40),
        ];
        let printers = from_spooler(&records, Some("Alpha"));
        let names: Vec<&str> = printers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);

        assert_eq!(printers[0].kind, ConnectionType::Serial);
        assert_eq!(printers[1].kind, ConnectionType::Parallel);
        assert_eq!(printers[1].status, PrinterStatus::Paused);
        assert!(printers[1].is_default);
        assert_eq!(printers[2].kind, ConnectionType::Bluetooth);
        assert_eq!(printers[2].status, PrinterStatus::Printing);
        assert_eq!(printers[2].bluetooth_address.as_deref(), Some("00:11:22:33:44:55"));
    }

    #[test]
    fn default_match_is_exact() {
        let printers = from_spooler(&[record("Receipt", "USB001", 0, 0)], Some("receipt"));
        assert!(!printers[0].is_default);
    }

    #[test]
    fn cups_destinations() {
        let dests = [
            CupsDest::new("Receipt")
                .with_option(OPT_DEVICE_URI, "usb://EPSON/TM-T20II")
                .with_option(OPT_PRINTER_STATE, "3"),
            CupsDest {
                is_default: true,
                ..CupsDest::new("Kitchen")
                    .with_option(OPT_DEVICE_URI, "socket://192.168.1.60")
                    .with_option(OPT_PRINTER_STATE, "3")
                    .with_option(OPT_PRINTER_STATE_REASONS, "offline-report")
            },
            CupsDest::new("Remote")
                .with_option(OPT_DEVICE_URI, "")
                .with_option(OPT_PRINTER_TYPE, "2"),
        ];
        let printers = from_cups(&dests);

        assert_eq!(printers[0].kind, ConnectionType::Usb);
        assert_eq!(printers[0].status, PrinterStatus::Idle);
        assert!(!printers[0].is_default);

        assert!(printers[1].is_default);
        assert_eq!(printers[1].status, PrinterStatus::Offline);
        assert_eq!(printers[1].ip_address.as_deref(), Some("192.168.1.60"));
        assert_eq!(printers[1].port, Some(9100));

        // Empty URI wins over the printer-type fallback.
        assert_eq!(printers[2].kind, ConnectionType::Unknown);
        assert_eq!(printers[2].status, PrinterStatus::Ok);
    }

    #[test]
    fn backend_uris_fall_back_to_printer_type() {
        let dests = [
            CupsDest::new("OfficeJet")
                .with_option(OPT_DEVICE_URI, "hp:/usb/OfficeJet_Pro?serial=CN123")
                .with_option(OPT_PRINTER_TYPE, "8425476"),
            CupsDest::new("Upstairs")
                .with_option(OPT_DEVICE_URI, "implicitclass://Upstairs/")
                .with_option(OPT_PRINTER_TYPE, "8425478"),
            CupsDest::new("Label").with_option(OPT_DEVICE_URI, "dymo:/LabelWriter"),
        ];
        let kinds: Vec<ConnectionType> = from_cups(&dests).iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            [ConnectionType::Local, ConnectionType::Network, ConnectionType::Unknown]
        );
    }

    #[test]
    fn missing_device_uri_uses_printer_type() {
        let dests = [CupsDest::new("Shared").with_option(OPT_PRINTER_TYPE, "2")];
        // No device-uri option at all behaves like an empty locator.
        assert_eq!(from_cups(&dests)[0].kind, ConnectionType::Unknown);
    }
}
