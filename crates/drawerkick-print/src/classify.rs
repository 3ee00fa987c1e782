// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Printer topology classification.
//
// Infers how a printer is physically attached from the loosely structured
// strings the OS hands back: spooler port names on Windows ("USB001",
// "IP_192.168.1.50", "COM3:") and device URIs under CUPS
// ("socket://10.0.0.7:9100", "usb://EPSON/TM-T20II"). Each variant is an
// ordered table of rules; the first rule that matches decides the result,
// so the order of the tables is significant.

use std::sync::LazyLock;

use drawerkick_core::types::{ConnectionType, Topology};
use regex::Regex;
use tracing::trace;

use crate::status::{ATTRIBUTE_LOCAL, ATTRIBUTE_NETWORK, CUPS_PRINTER_REMOTE};

/// Standard raw (JetDirect) printing port.
pub const RAW_PORT: u16 = 9100;

/// Four dot-separated 1-3 digit groups with an optional `:port`. Octet
/// ranges are deliberately not checked.
static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:\.\d{1,3}){3})(?::(\d+))?").expect("IPv4 pattern compiles")
});

/// Six colon- or dash-separated hex pairs.
static BT_SEPARATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5}").expect("MAC pattern compiles")
});

/// Twelve hex digits with no separators.
static BT_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9A-Fa-f]{12}").expect("bare MAC pattern compiles"));

/// An IPv4 address found in a locator, with its explicit port if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Match {
    pub address: String,
    /// `None` when no `:port` suffix was present or it does not fit a u16.
    pub port: Option<u16>,
}

/// First IPv4-looking address in `s`.
pub fn extract_ipv4(s: &str) -> Option<Ipv4Match> {
    let caps = IPV4.captures(s)?;
    Some(Ipv4Match {
        address: caps[1].to_owned(),
        port: caps.get(2).and_then(|m| m.as_str().parse().ok()),
    })
}

/// First Bluetooth address in `s`, normalised to colon-separated pairs.
///
/// Letter case is kept as found.
pub fn extract_bluetooth_address(s: &str) -> Option<String> {
    if let Some(m) = BT_SEPARATED.find(s) {
        return Some(m.as_str().replace('-', ":"));
    }
    let bare = BT_BARE.find(s)?.as_str();
    let pairs: Vec<&str> = (0..bare.len())
        .step_by(2)
        .map(|i| &bare[i..i + 2])
        .collect();
    Some(pairs.join(":"))
}

// ---------------------------------------------------------------------------
// Rule machinery
// ---------------------------------------------------------------------------

/// The string being classified, pre-lowered once.
struct Locator<'a> {
    raw: &'a str,
    lower: String,
    /// Spooler attribute bits or CUPS printer-type bits, when known.
    attributes: Option<u32>,
}

impl<'a> Locator<'a> {
    fn new(raw: &'a str, attributes: Option<u32>) -> Self {
        Self {
            raw,
            lower: raw.trim().to_lowercase(),
            attributes,
        }
    }
}

/// A rule yields a topology when it recognises the locator.
type Rule = fn(&Locator<'_>) -> Option<Topology>;

fn evaluate(rules: &[(&'static str, Rule)], locator: &Locator<'_>) -> Topology {
    for (name, rule) in rules {
        if let Some(topology) = rule(locator) {
            trace!(rule = name, locator = locator.raw, kind = topology.kind().as_str(), "classified");
            return topology;
        }
    }
    Topology::unknown()
}

/// Address/port topology from an IPv4 match, defaulting the port.
fn network_from(m: Ipv4Match, default_port: u16) -> Topology {
    Topology::network(m.address, m.port.unwrap_or(default_port))
}

// -- rules shared by both variants ---------------------------------------------

fn empty(loc: &Locator<'_>) -> Option<Topology> {
    loc.lower.is_empty().then(Topology::unknown)
}

fn ipv4_anywhere(loc: &Locator<'_>) -> Option<Topology> {
    extract_ipv4(loc.raw).map(|m| network_from(m, RAW_PORT))
}

// ---------------------------------------------------------------------------
// Port-name variant (Windows spooler)
// ---------------------------------------------------------------------------

const PORT_RULES: &[(&str, Rule)] = &[
    ("empty", empty),
    ("usb", usb_port),
    ("bluetooth", bluetooth_port),
    ("ipv4", ipv4_anywhere),
    ("unc", unc_path),
    ("wsd", wsd_port),
    ("serial", com_port),
    ("parallel", lpt_port),
    ("virtual", virtual_port),
    ("attributes", spooler_attributes),
];

/// Classify a spooler port name, falling back on the printer's attribute bits.
pub fn classify_port(port_name: &str, attributes: u32) -> Topology {
    evaluate(PORT_RULES, &Locator::new(port_name, Some(attributes)))
}

fn usb_port(loc: &Locator<'_>) -> Option<Topology> {
    loc.lower
        .contains("usb")
        .then(|| Topology::of(ConnectionType::Usb))
}

fn bluetooth_port(loc: &Locator<'_>) -> Option<Topology> {
    (loc.lower.contains("bth") || loc.lower.contains("bluetooth"))
        .then(|| Topology::bluetooth(extract_bluetooth_address(loc.raw)))
}

/// `\\server\share` or `//server/share`; the server is tested for an address.
fn unc_path(loc: &Locator<'_>) -> Option<Topology> {
    let trimmed = loc.raw.trim();
    let rest = trimmed
        .strip_prefix(r"\\")
        .or_else(|| trimmed.strip_prefix("//"))?;
    let server = rest.split(['\\', '/']).next().unwrap_or_default();
    Some(match extract_ipv4(server) {
        Some(m) => network_from(m, RAW_PORT),
        None => Topology::of(ConnectionType::Network),
    })
}

fn wsd_port(loc: &Locator<'_>) -> Option<Topology> {
    (loc.lower.contains("wsd-") || loc.lower.contains("ws-"))
        .then(|| Topology::of(ConnectionType::Network))
}

/// `COM1`, `COM12:`: at most five characters once the colon is dropped.
fn com_port(loc: &Locator<'_>) -> Option<Topology> {
    let token = loc.lower.trim_end_matches(':');
    (token.starts_with("com") && token.chars().count() <= 5)
        .then(|| Topology::of(ConnectionType::Serial))
}

fn lpt_port(loc: &Locator<'_>) -> Option<Topology> {
    loc.lower
        .starts_with("lpt")
        .then(|| Topology::of(ConnectionType::Parallel))
}

fn virtual_port(loc: &Locator<'_>) -> Option<Topology> {
    ["file:", "nul", "portprompt"]
        .iter()
        .any(|needle| loc.lower.contains(needle))
        .then(|| Topology::of(ConnectionType::Virtual))
}

fn spooler_attributes(loc: &Locator<'_>) -> Option<Topology> {
    let attrs = loc.attributes?;
    if attrs & ATTRIBUTE_NETWORK != 0 {
        Some(Topology::of(ConnectionType::Network))
    } else if attrs & ATTRIBUTE_LOCAL != 0 {
        Some(Topology::of(ConnectionType::Local))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Device-URI variant (CUPS)
// ---------------------------------------------------------------------------

const URI_RULES: &[(&str, Rule)] = &[
    ("empty", empty),
    ("usb", usb_uri),
    ("bluetooth", bluetooth_uri),
    ("network-scheme", network_uri),
    ("ipv4", ipv4_anywhere),
    ("serial", serial_uri),
    ("parallel", parallel_uri),
    ("virtual", virtual_uri),
    ("printer-type", cups_printer_type),
];

/// Network URI schemes and the port assumed when none is given. `None`
/// marks service-discovery schemes that never carry a literal address.
const NETWORK_SCHEMES: &[(&str, Option<u16>)] = &[
    ("socket", Some(RAW_PORT)),
    ("ipp", Some(631)),
    ("ipps", Some(631)),
    ("http", Some(80)),
    ("https", Some(443)),
    ("lpd", Some(RAW_PORT)),
    ("smb", Some(RAW_PORT)),
    ("dnssd", None),
    ("mdns", None),
];

/// Classify a CUPS device URI, falling back on the `printer-type` bits.
pub fn classify_uri(device_uri: &str, printer_type: Option<u32>) -> Topology {
    evaluate(URI_RULES, &Locator::new(device_uri, printer_type))
}

fn scheme<'a>(loc: &'a Locator<'_>) -> Option<&'a str> {
    loc.lower.split_once("://").map(|(scheme, _)| scheme)
}

/// Host part of a URI authority, without user info.
fn uri_host(raw: &str) -> &str {
    let after = raw.trim().split_once("://").map_or("", |(_, rest)| rest);
    let authority = after.split(['/', '?', '#']).next().unwrap_or_default();
    authority.rsplit_once('@').map_or(authority, |(_, host)| host)
}

fn usb_uri(loc: &Locator<'_>) -> Option<Topology> {
    loc.lower
        .starts_with("usb:")
        .then(|| Topology::of(ConnectionType::Usb))
}

fn bluetooth_uri(loc: &Locator<'_>) -> Option<Topology> {
    matches!(scheme(loc), Some("bluetooth" | "bth"))
        .then(|| Topology::bluetooth(extract_bluetooth_address(loc.raw)))
}

fn network_uri(loc: &Locator<'_>) -> Option<Topology> {
    let scheme = scheme(loc)?;
    let (_, default_port) = NETWORK_SCHEMES.iter().find(|(s, _)| *s == scheme)?;
    let topology = default_port
        .and_then(|port| extract_ipv4(uri_host(loc.raw)).map(|m| network_from(m, port)));
    Some(topology.unwrap_or_else(|| Topology::of(ConnectionType::Network)))
}

fn serial_uri(loc: &Locator<'_>) -> Option<Topology> {
    loc.lower
        .starts_with("serial:")
        .then(|| Topology::of(ConnectionType::Serial))
}

fn parallel_uri(loc: &Locator<'_>) -> Option<Topology> {
    loc.lower
        .starts_with("parallel:")
        .then(|| Topology::of(ConnectionType::Parallel))
}

fn virtual_uri(loc: &Locator<'_>) -> Option<Topology> {
    (loc.lower.starts_with("file:") || loc.lower.contains("cups-pdf"))
        .then(|| Topology::of(ConnectionType::Virtual))
}

fn cups_printer_type(loc: &Locator<'_>) -> Option<Topology> {
    let bits = loc.attributes?;
    Some(if bits & CUPS_PRINTER_REMOTE != 0 {
        Topology::of(ConnectionType::Network)
    } else {
        Topology::of(ConnectionType::Local)
    })
}
