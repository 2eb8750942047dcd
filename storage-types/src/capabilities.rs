// SPDX-License-Identifier: GPL-3.0-only

//! Array capability table
//!
//! A plugin reports what an array supports as a flat table of one byte per
//! capability index. Indices are stable across plugins; the table is
//! transferred as a lowercase hex string.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::common::coded_enum;

/// Number of entries in a freshly allocated capability table
pub const CAPABILITY_TABLE_LEN: usize = 512;

coded_enum! {
    /// Support level recorded for one capability
    pub enum CapabilityValue {
        Unsupported = 0,
        Supported = 1,
        SupportedOffline = 2,
        NotImplemented = 3,
        Unknown = 4,
    }
}

coded_enum! {
    /// Capability index into the table
    pub enum Capability {
        BlockSupport = 0,
        FsSupport = 1,

        Volumes = 20,
        VolumeCreate = 21,
        VolumeResize = 22,
        VolumeReplicate = 23,
        VolumeReplicateClone = 24,
        VolumeReplicateCopy = 25,
        VolumeReplicateMirrorAsync = 26,
        VolumeReplicateMirrorSync = 27,
        VolumeCopyRangeBlockSize = 28,
        VolumeCopyRange = 29,
        VolumeCopyRangeClone = 30,
        VolumeCopyRangeCopy = 31,
        VolumeDelete = 33,
        VolumeOnline = 34,
        VolumeOffline = 35,
        AccessGroupGrant = 36,
        AccessGroupRevoke = 37,
        AccessGroupList = 38,
        AccessGroupCreate = 39,
        AccessGroupDelete = 40,
        AccessGroupAddInitiator = 41,
        AccessGroupDelInitiator = 42,
        VolumesAccessibleByAccessGroup = 43,
        AccessGroupsGrantedToVolume = 44,
        VolumeChildDependency = 45,
        VolumeChildDependencyRm = 46,

        Fs = 100,
        FsDelete = 101,
        FsResize = 102,
        FsCreate = 103,
        FsClone = 104,
        FileClone = 105,
        Snapshots = 106,
        SnapshotCreate = 107,
        SnapshotCreateSpecificFiles = 108,
        SnapshotDelete = 109,
        SnapshotRevert = 110,
        SnapshotRevertSpecificFiles = 111,
        FsChildDependency = 112,
        FsChildDependencyRm = 113,
        FsChildDependencyRmSpecificFiles = 114,

        ExportAuth = 120,
        Exports = 121,
        ExportFs = 122,
        ExportRemove = 123,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CapabilityParseError {
    #[error("capability table has odd length {0}")]
    OddLength(usize),

    #[error("invalid hex digit '{found}' at offset {index}")]
    InvalidDigit { found: char, index: usize },
}

/// Capability table for one system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    table: Vec<u8>,
}

impl Capabilities {
    /// A table with every capability marked unsupported
    pub fn new() -> Self {
        Self {
            table: vec![CapabilityValue::Unsupported.code() as u8; CAPABILITY_TABLE_LEN],
        }
    }

    pub fn from_hex(text: &str) -> Result<Self, CapabilityParseError> {
        let table = hex::decode(text).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                CapabilityParseError::InvalidDigit { found: c, index }
            }
            hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => {
                CapabilityParseError::OddLength(text.len())
            }
        })?;
        Ok(Self { table })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.table)
    }

    /// Look up a capability; indices past the table and unrecognised bytes
    /// read as [`CapabilityValue::Unknown`]
    pub fn get(&self, capability: Capability) -> CapabilityValue {
        usize::try_from(capability.code())
            .ok()
            .and_then(|index| self.table.get(index))
            .and_then(|raw| CapabilityValue::try_from(i32::from(*raw)).ok())
            .unwrap_or(CapabilityValue::Unknown)
    }

    pub fn set(&mut self, capability: Capability, value: CapabilityValue) {
        let Ok(index) = usize::try_from(capability.code()) else {
            return;
        };
        if index >= self.table.len() {
            self.table.resize(index + 1, CapabilityValue::Unsupported.code() as u8);
        }
        self.table[index] = value.code() as u8;
    }

    pub fn is_supported(&self, capability: Capability) -> bool {
        self.get(capability) == CapabilityValue::Supported
    }

    pub fn enable_all(&mut self) {
        self.table
            .iter_mut()
            .for_each(|entry| *entry = CapabilityValue::Supported.code() as u8);
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}
