// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

use crate::common::{bytes_to_pretty, coded_enum};

/// A storage pool that volumes and file systems are carved from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub name: String,

    /// Total capacity in bytes
    pub total_space: u64,

    /// Unallocated capacity in bytes
    pub free_space: u64,

    pub system_id: String,
}

impl Pool {
    pub fn used_space(&self) -> u64 {
        self.total_space.saturating_sub(self.free_space)
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} free of {})",
            self.name,
            bytes_to_pretty(self.free_space, false),
            bytes_to_pretty(self.total_space, false)
        )
    }
}

coded_enum! {
    /// RAID layout requested for a new pool
    pub enum RaidType {
        Raid0 = 0,
        Raid1 = 1,
        Raid3 = 3,
        Raid4 = 4,
        Raid5 = 5,
        Raid6 = 6,
        Raid10 = 10,
        Raid15 = 15,
        Raid16 = 16,
        Raid50 = 50,
        Raid60 = 60,
        Raid51 = 51,
        Raid61 = 61,
        Jbod = 20,
        Unknown = 21,
        NotApplicable = 22,
        Mixed = 23,
    }
}

coded_enum! {
    /// Kind of member a new pool is built from
    pub enum MemberType {
        Unknown = 0,
        Disk = 1,
        Pool = 2,
        Volume = 3,
        DiskMix = 10,
        DiskAta = 11,
        DiskSata = 12,
        DiskSas = 13,
        DiskFc = 14,
        DiskSop = 15,
        DiskScsi = 16,
        DiskNlSas = 17,
        DiskHdd = 18,
        DiskSsd = 19,
        DiskHybrid = 110,
    }
}
