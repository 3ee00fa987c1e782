// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ESC/POS "generate pulse" command (ESC p m t1 t2).

use crate::types::DrawerConfig;

/// ESC
pub const ESC: u8 = 0x1B;
/// 'p', the pulse generation opcode.
pub const PULSE_OPCODE: u8 = 0x70;
/// Length of the encoded command.
pub const COMMAND_LEN: usize = 5;

/// The fixed five-byte drawer kick command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawerCommand([u8; COMMAND_LEN]);

impl DrawerCommand {
    /// Encode `config` as `[ESC, 'p', pin, on, off]`.
    pub fn build(config: &DrawerConfig) -> Self {
        Self([
            ESC,
            PULSE_OPCODE,
            config.pin,
            config.pulse_on_time,
            config.pulse_off_time,
        ])
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        COMMAND_LEN
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Recover the payload a command was built from.
    pub fn config(&self) -> DrawerConfig {
        DrawerConfig::new(self.0[2], self.0[3], self.0[4])
    }

    /// Parse raw bytes back into a command, if they carry the pulse opcode.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let raw: [u8; COMMAND_LEN] = bytes.try_into().ok()?;
        (raw[0] == ESC && raw[1] == PULSE_OPCODE).then_some(Self(raw))
    }
}

impl From<DrawerConfig> for DrawerCommand {
    fn from(config: DrawerConfig) -> Self {
        Self::build(&config)
    }
}

impl AsRef<[u8]> for DrawerCommand {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
