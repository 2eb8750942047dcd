// SPDX-License-Identifier: GPL-3.0-only

//! Block volume models

use serde::{Deserialize, Serialize};

use crate::common::{bytes_to_pretty, coded_enum};

/// A block volume (LUN) exposed by the array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    pub id: String,
    pub name: String,

    /// SCSI VPD page 0x83 identifier
    pub vpd83: String,

    pub block_size: u64,
    pub num_of_blocks: u64,

    /// Bitmask of `Volume::STATUS_*` values
    pub status: u32,

    pub system_id: String,
}

impl Volume {
    pub const STATUS_UNKNOWN: u32 = 0x0;
    pub const STATUS_OK: u32 = 0x1;
    pub const STATUS_DEGRADED: u32 = 0x2;
    pub const STATUS_ERR: u32 = 0x4;
    pub const STATUS_STARTING: u32 = 0x8;
    pub const STATUS_DORMANT: u32 = 0x10;

    pub fn size_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.num_of_blocks)
    }

    /// Number of whole blocks `size_bytes` occupies at this volume's block
    /// size, or `None` when the block size is zero
    pub fn blocks_for(&self, size_bytes: u64) -> Option<u64> {
        size_bytes.checked_div(self.block_size)
    }

    pub fn has_status(&self, flag: u32) -> bool {
        self.status & flag == flag
    }
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, bytes_to_pretty(self.size_bytes(), false))
    }
}

/// A contiguous run of blocks to copy between two volumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    pub src_block: u64,
    pub dest_block: u64,
    pub block_count: u64,
}

impl BlockRange {
    pub fn new(src_block: u64, dest_block: u64, block_count: u64) -> Self {
        Self {
            src_block,
            dest_block,
            block_count,
        }
    }
}

coded_enum! {
    /// Provisioning policy for a new volume
    pub enum ProvisionType {
        Unknown = -1,
        Thin = 1,
        Full = 2,
        Default = 3,
    }
}

coded_enum! {
    /// Replication relationship between a source and target volume
    pub enum ReplicationType {
        Unknown = -1,
        Snapshot = 1,
        Clone = 2,
        Copy = 3,
        MirrorSync = 4,
        MirrorAsync = 5,
    }
}

coded_enum! {
    /// Access level granted to an initiator or access group
    pub enum AccessType {
        ReadOnly = 1,
        ReadWrite = 2,
        None = 3,
    }
}

impl std::str::FromStr for ProvisionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "THIN" => Ok(ProvisionType::Thin),
            "FULL" => Ok(ProvisionType::Full),
            "DEFAULT" => Ok(ProvisionType::Default),
            _ => Err(format!("Invalid provisioning type: {}", s)),
        }
    }
}

impl std::str::FromStr for ReplicationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SNAPSHOT" => Ok(ReplicationType::Snapshot),
            "CLONE" => Ok(ReplicationType::Clone),
            "COPY" => Ok(ReplicationType::Copy),
            "MIRROR_SYNC" => Ok(ReplicationType::MirrorSync),
            "MIRROR_ASYNC" => Ok(ReplicationType::MirrorAsync),
            _ => Err(format!("Invalid replication type: {}", s)),
        }
    }
}

impl std::str::FromStr for AccessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RW" => Ok(AccessType::ReadWrite),
            "RO" => Ok(AccessType::ReadOnly),
            _ => Err(format!("Invalid access type: {}", s)),
        }
    }
}
