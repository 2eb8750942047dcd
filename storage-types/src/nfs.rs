// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// An NFS export of a file system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfsExport {
    /// Empty until the array assigns one on export
    pub id: String,
    pub fs_id: String,
    pub export_path: String,
    pub auth: String,
    pub root: Vec<String>,
    pub rw: Vec<String>,
    pub ro: Vec<String>,
    pub anonuid: u64,
    pub anongid: u64,
    pub options: String,
}

impl NfsExport {
    /// Anonymous uid/gid is not applicable to this export
    pub const ANON_UID_GID_NA: u64 = u64::MAX;

    /// Anonymous uid/gid could not be determined
    pub const ANON_UID_GID_ERROR: u64 = u64::MAX - 1;

    pub fn has_anon_uid(&self) -> bool {
        self.anonuid != Self::ANON_UID_GID_NA && self.anonuid != Self::ANON_UID_GID_ERROR
    }

    pub fn has_anon_gid(&self) -> bool {
        self.anongid != Self::ANON_UID_GID_NA && self.anongid != Self::ANON_UID_GID_ERROR
    }
}
