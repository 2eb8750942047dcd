// SPDX-License-Identifier: GPL-3.0-only

//! Entity models for storage array management
//!
//! These are the typed values a plugin hands back to the client: systems,
//! pools, volumes, disks, access groups, initiators, file systems, snapshots
//! and NFS exports, plus the closed enums and capability table that go with
//! them. Every numeric enum carries its wire code and rejects codes it does
//! not know about.
//!
//! The wire codec itself lives in `storage-contracts`; nothing here knows
//! about the transport.

mod common;

pub mod access;
pub mod capabilities;
pub mod disk;
pub mod filesystem;
pub mod flags;
pub mod job;
pub mod nfs;
pub mod pool;
pub mod system;
pub mod volume;

pub use access::{AccessGroup, Initiator, InitiatorType};
pub use capabilities::{
    CAPABILITY_TABLE_LEN, Capabilities, Capability, CapabilityParseError, CapabilityValue,
};
pub use common::{UnknownCode, bytes_to_pretty};
pub use disk::{Disk, DiskType};
pub use filesystem::{FileSystem, Snapshot};
pub use flags::Flags;
pub use job::JobStatus;
pub use nfs::NfsExport;
pub use pool::{MemberType, Pool, RaidType};
pub use system::System;
pub use volume::{AccessType, BlockRange, ProvisionType, ReplicationType, Volume};
