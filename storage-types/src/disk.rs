// SPDX-License-Identifier: GPL-3.0-only

//! Physical disk models

use serde::{Deserialize, Serialize};

use crate::common::{bytes_to_pretty, coded_enum};

/// A physical disk known to the array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
    pub id: String,
    pub name: String,
    pub disk_type: DiskType,
    pub block_size: u64,
    pub num_of_blocks: u64,

    /// Bitmask of `Disk::STATUS_*` values
    pub status: u64,

    pub system_id: String,
}

impl Disk {
    pub const STATUS_UNKNOWN: u64 = 0x1;
    pub const STATUS_OK: u64 = 0x2;
    pub const STATUS_OTHER: u64 = 0x4;
    pub const STATUS_PREDICTIVE_FAILURE: u64 = 0x8;
    pub const STATUS_ERROR: u64 = 0x10;
    pub const STATUS_REMOVED: u64 = 0x20;
    pub const STATUS_STARTING: u64 = 0x40;
    pub const STATUS_STOPPING: u64 = 0x80;
    pub const STATUS_STOPPED: u64 = 0x100;
    pub const STATUS_INITIALIZING: u64 = 0x200;
    pub const STATUS_MAINTENANCE_MODE: u64 = 0x400;
    pub const STATUS_SPARE_DISK: u64 = 0x800;
    pub const STATUS_RECONSTRUCT: u64 = 0x1000;
    pub const STATUS_FREE: u64 = 0x2000;

    pub fn size_bytes(&self) -> u64 {
        self.block_size.saturating_mul(self.num_of_blocks)
    }

    pub fn is_free(&self) -> bool {
        self.status & Self::STATUS_FREE != 0
    }
}

impl std::fmt::Display for Disk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] ({})",
            self.name,
            self.disk_type,
            bytes_to_pretty(self.size_bytes(), false)
        )
    }
}

coded_enum! {
    /// Disk interface / media classification
    pub enum DiskType {
        Unknown = 0,
        Other = 1,
        NotApplicable = 2,
        Ata = 3,
        Sata = 4,
        Sas = 5,
        Fc = 6,
        Sop = 7,
        Scsi = 8,
        Lun = 9,
        NlSas = 51,
        Hdd = 52,
        Ssd = 53,
        Hybrid = 54,
    }
}

impl std::fmt::Display for DiskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DiskType::Unknown => "Unknown",
            DiskType::Other => "Other",
            DiskType::NotApplicable => "N/A",
            DiskType::Ata => "ATA",
            DiskType::Sata => "SATA",
            DiskType::Sas => "SAS",
            DiskType::Fc => "FC",
            DiskType::Sop => "SOP",
            DiskType::Scsi => "SCSI",
            DiskType::Lun => "LUN",
            DiskType::NlSas => "NL-SAS",
            DiskType::Hdd => "HDD",
            DiskType::Ssd => "SSD",
            DiskType::Hybrid => "Hybrid",
        };
        f.write_str(label)
    }
}
