// SPDX-License-Identifier: GPL-3.0-only

//! Checks run before anything is sent to the plugin

use storage_types::{
    AccessGroup, Disk, FileSystem, Flags, Initiator, NfsExport, Pool, RaidType, Snapshot, System,
    Volume,
};

use super::Result;
use crate::protocol::{ErrorNumber, LsmError};

/// An entity that can be passed back to the plugin as an argument.
///
/// A handle with an empty identifier did not come from a plugin and is
/// rejected with the kind's own error number.
pub trait Handle {
    const KIND: &'static str;
    const INVALID: ErrorNumber;

    fn handle_id(&self) -> &str;
}

macro_rules! handle {
    ($ty:ty, $kind:literal, $invalid:ident) => {
        impl Handle for $ty {
            const KIND: &'static str = $kind;
            const INVALID: ErrorNumber = ErrorNumber::$invalid;

            fn handle_id(&self) -> &str {
                &self.id
            }
        }
    };
}

handle!(System, "system", InvalidSystem);
handle!(Pool, "pool", InvalidPool);
handle!(Volume, "volume", InvalidVol);
handle!(Disk, "disk", InvalidArgument);
handle!(FileSystem, "file system", InvalidFs);
handle!(Snapshot, "snapshot", InvalidSs);
handle!(AccessGroup, "access group", InvalidAccessGroup);
handle!(Initiator, "initiator", InvalidInit);
handle!(NfsExport, "nfs export", InvalidNfs);

pub(crate) fn handle<H: Handle>(handle: &H) -> Result<()> {
    if handle.handle_id().is_empty() {
        return Err(LsmError::new(
            H::INVALID,
            format!("invalid {} handle", H::KIND),
        ));
    }
    Ok(())
}

pub(crate) fn optional_handle<H: Handle>(handle: Option<&H>) -> Result<()> {
    handle.map_or(Ok(()), self::handle)
}

pub(crate) fn handles<H: Handle>(handles: &[H]) -> Result<()> {
    handles.iter().try_for_each(handle)
}

pub(crate) fn flags(flags: Flags) -> Result<()> {
    if !flags.is_none() {
        return Err(LsmError::invalid_argument(format!(
            "unsupported flags {:#x}",
            flags.bits()
        )));
    }
    Ok(())
}

pub(crate) fn non_empty(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(LsmError::invalid_argument(format!("{what} must not be empty")));
    }
    Ok(())
}

pub(crate) fn non_zero(what: &str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(LsmError::invalid_argument(format!("{what} must be non-zero")));
    }
    Ok(())
}

pub(crate) fn non_empty_list<T>(what: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        return Err(LsmError::invalid_argument(format!("{what} must not be empty")));
    }
    Ok(())
}

/// RAID levels a new pool may be requested with. RAID 4 is reportable but
/// not creatable.
pub(crate) fn raid_type(raid_type: RaidType) -> Result<()> {
    if raid_type == RaidType::Raid4 {
        return Err(LsmError::invalid_argument(format!(
            "raid type {raid_type:?} cannot be used to create a pool"
        )));
    }
    Ok(())
}

/// Reject a resize that would leave the volume with the same block count.
///
/// The comparison is on whole blocks: any target that truncates to the
/// current number of blocks counts as the same size.
pub(crate) fn resize_target(volume: &Volume, new_size_bytes: u64) -> Result<()> {
    non_zero("new size", new_size_bytes)?;
    let Some(blocks) = volume.blocks_for(new_size_bytes) else {
        return Err(LsmError::new(
            ErrorNumber::InvalidVol,
            format!("volume {} reports a zero block size", volume.id),
        ));
    };
    if blocks == volume.num_of_blocks {
        return Err(LsmError::new(
            ErrorNumber::VolumeSameSize,
            format!("volume {} is already {} blocks", volume.id, blocks),
        ));
    }
    Ok(())
}
