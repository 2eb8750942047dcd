// SPDX-License-Identifier: GPL-3.0-only

//! Sample entities as a simulator plugin would report them

use storage_contracts::{ConnectConfig, Connection, LsmError};
use storage_types::{
    AccessGroup, Disk, DiskType, FileSystem, Flags, Initiator, InitiatorType, NfsExport, Pool,
    Snapshot, System, Volume,
};

use crate::logging;
use crate::transport::ScriptedTransport;

pub const SYSTEM_ID: &str = "SIM-01";
pub const URI: &str = "sim://";

pub fn system() -> System {
    System::new(SYSTEM_ID, "LSM simulated storage plug-in")
}

pub fn pool() -> Pool {
    Pool {
        id: "POO1".to_string(),
        name: "Pool 1".to_string(),
        total_space: 2 * 1024 * 1024 * 1024 * 1024,
        free_space: 1024 * 1024 * 1024 * 1024,
        system_id: SYSTEM_ID.to_string(),
    }
}

/// 100 MiB volume made of 512-byte blocks
pub fn volume() -> Volume {
    Volume {
        id: "VOL-1".to_string(),
        name: "lun-data".to_string(),
        vpd83: "600508b1001c4d8b3e1f2a9c7d6e5f40".to_string(),
        block_size: 512,
        num_of_blocks: 204_800,
        status: Volume::STATUS_OK,
        system_id: SYSTEM_ID.to_string(),
    }
}

pub fn disk(id: &str) -> Disk {
    Disk {
        id: id.to_string(),
        name: format!("Sim disk {id}"),
        disk_type: DiskType::Sas,
        block_size: 512,
        num_of_blocks: 1_953_525_168,
        status: Disk::STATUS_OK | Disk::STATUS_FREE,
        system_id: SYSTEM_ID.to_string(),
    }
}

pub fn file_system() -> FileSystem {
    FileSystem {
        id: "FS-1".to_string(),
        name: "home".to_string(),
        total_space: 100 * 1024 * 1024 * 1024,
        free_space: 60 * 1024 * 1024 * 1024,
        pool_id: pool().id,
        system_id: SYSTEM_ID.to_string(),
    }
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        id: "SS-1".to_string(),
        name: "nightly".to_string(),
        ts: 1_700_000_000,
    }
}

pub fn initiator() -> Initiator {
    Initiator {
        id: "iqn.1994-05.com.example:host1".to_string(),
        init_type: InitiatorType::Iscsi,
        name: "host1".to_string(),
    }
}

pub fn access_group() -> AccessGroup {
    AccessGroup {
        id: "AG-1".to_string(),
        name: "cluster".to_string(),
        initiators: vec![initiator().id],
        system_id: SYSTEM_ID.to_string(),
    }
}

pub fn nfs_export() -> NfsExport {
    NfsExport {
        id: "EXP-1".to_string(),
        fs_id: file_system().id,
        export_path: "/exports/home".to_string(),
        auth: "sys".to_string(),
        root: vec![],
        rw: vec!["10.0.0.0/24".to_string()],
        ro: vec![],
        anonuid: NfsExport::ANON_UID_GID_NA,
        anongid: NfsExport::ANON_UID_GID_NA,
        options: String::new(),
    }
}

/// Open a connection to `plugin`, scripting the `startup` handshake first.
///
/// Also installs test logging.
pub async fn connect(plugin: &ScriptedTransport) -> Result<Connection, LsmError> {
    logging::init();
    plugin.reply("startup", storage_contracts::Value::Null);
    Connection::connect(plugin.boxed(), &ConnectConfig::new(URI), Flags::NONE).await
}
