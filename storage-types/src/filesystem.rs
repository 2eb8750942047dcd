// SPDX-License-Identifier: GPL-3.0-only

//! File system and snapshot models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::bytes_to_pretty;

/// A file system hosted on an array pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSystem {
    pub id: String,
    pub name: String,
    pub total_space: u64,
    pub free_space: u64,
    pub pool_id: String,
    pub system_id: String,
}

impl std::fmt::Display for FileSystem {
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

/// A point-in-time snapshot of a file system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub name: String,

    /// Creation time, seconds since the Unix epoch
    pub ts: u64,
}

impl Snapshot {
    /// Creation time, or `None` when `ts` is out of chrono's range
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.ts).ok()?;
        DateTime::<Utc>::from_timestamp(secs, 0)
    }
}
