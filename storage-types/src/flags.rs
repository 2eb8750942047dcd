// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// Flags argument accepted by every plugin operation.
///
/// No flag bits are defined yet; [`Flags::NONE`] is the only accepted value
/// and anything else is rejected before a request is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flags(u64);

impl Flags {
    pub const NONE: Flags = Flags(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}
