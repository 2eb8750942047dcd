// SPDX-License-Identifier: GPL-3.0-only

use storage_types::{FileSystem, Flags, Pool, Snapshot};

use super::connection::{Connection, Params};
use super::job::Submission;
use super::{Result, validate};
use crate::protocol::{Value, WireEntity, optional_string_list_to_value};

impl Connection {
    pub async fn fs_list(&mut self, flags: Flags) -> Result<Vec<FileSystem>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("fs", Params::new(flags)).await
    }

    pub async fn fs_create(
        &mut self,
        pool: &Pool,
        name: &str,
        size_bytes: u64,
        flags: Flags,
    ) -> Result<Submission<FileSystem>> {
        self.gate(|| {
            validate::handle(pool)?;
            validate::non_empty("file system name", name)?;
            validate::non_zero("file system size", size_bytes)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("pool", pool.to_value())
            .with("name", name)
            .with("size_bytes", size_bytes);
        self.submit("fs_create", params).await
    }

    pub async fn fs_delete(&mut self, fs: &FileSystem, flags: Flags) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("fs", fs.to_value());
        self.submit_job("fs_delete", params).await
    }

    pub async fn fs_resize(
        &mut self,
        fs: &FileSystem,
        new_size_bytes: u64,
        flags: Flags,
    ) -> Result<Submission<FileSystem>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::non_zero("new size", new_size_bytes)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs", fs.to_value())
            .with("new_size_bytes", new_size_bytes);
        self.submit("fs_resize", params).await
    }

    /// Clone a file system, optionally from one of its snapshots
    pub async fn fs_clone(
        &mut self,
        src_fs: &FileSystem,
        dest_fs_name: &str,
        snapshot: Option<&Snapshot>,
        flags: Flags,
    ) -> Result<Submission<FileSystem>> {
        self.gate(|| {
            validate::handle(src_fs)?;
            validate::optional_handle(snapshot)?;
            validate::non_empty("clone name", dest_fs_name)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("src_fs", src_fs.to_value())
            .with("dest_fs_name", dest_fs_name)
            .with("snapshot", snapshot.map_or(Value::Null, WireEntity::to_value));
        self.submit("fs_clone", params).await
    }

    /// Clone a single file within a file system
    pub async fn file_clone(
        &mut self,
        fs: &FileSystem,
        src_file_name: &str,
        dest_file_name: &str,
        snapshot: Option<&Snapshot>,
        flags: Flags,
    ) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::optional_handle(snapshot)?;
            validate::non_empty("source file name", src_file_name)?;
            validate::non_empty("destination file name", dest_file_name)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs", fs.to_value())
            .with("src_file_name", src_file_name)
            .with("dest_file_name", dest_file_name)
            .with("snapshot", snapshot.map_or(Value::Null, WireEntity::to_value));
        self.submit_job("file_clone", params).await
    }

    /// Whether snapshots or clones depend on `fs` (or on the listed files)
    pub async fn fs_child_dependency(
        &mut self,
        fs: &FileSystem,
        files: Option<&[String]>,
        flags: Flags,
    ) -> Result<bool> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs", fs.to_value())
            .with("files", optional_string_list_to_value(files));
        self.call_bool("fs_child_dependency", params).await
    }

    pub async fn fs_child_dependency_rm(
        &mut self,
        fs: &FileSystem,
        files: Option<&[String]>,
        flags: Flags,
    ) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs", fs.to_value())
            .with("files", optional_string_list_to_value(files));
        self.submit_job("fs_child_dependency_rm", params).await
    }

    pub async fn fs_snapshot_list(&mut self, fs: &FileSystem, flags: Flags) -> Result<Vec<Snapshot>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("fs", fs.to_value());
        self.call_list("fs_snapshots", params).await
    }

    pub async fn fs_snapshot_create(
        &mut self,
        fs: &FileSystem,
        snapshot_name: &str,
        files: Option<&[String]>,
        flags: Flags,
    ) -> Result<Submission<Snapshot>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::non_empty("snapshot name", snapshot_name)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs", fs.to_value())
            .with("snapshot_name", snapshot_name)
            .with("files", optional_string_list_to_value(files));
        self.submit("fs_snapshot_create", params).await
    }

    pub async fn fs_snapshot_delete(
        &mut self,
        fs: &FileSystem,
        snapshot: &Snapshot,
        flags: Flags,
    ) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::handle(snapshot)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs", fs.to_value())
            .with("snapshot", snapshot.to_value());
        self.submit_job("fs_snapshot_delete", params).await
    }

    /// Roll `fs` (or only `files`) back to `snapshot`. `restore_files`
    /// renames the restored files when given.
    pub async fn fs_snapshot_revert(
        &mut self,
        fs: &FileSystem,
        snapshot: &Snapshot,
        files: Option<&[String]>,
        restore_files: Option<&[String]>,
        all_files: bool,
        flags: Flags,
    ) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(fs)?;
            validate::handle(snapshot)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs", fs.to_value())
            .with("snapshot", snapshot.to_value())
            .with("files", optional_string_list_to_value(files))
            .with("restore_files", optional_string_list_to_value(restore_files))
            .with("all_files", all_files);
        self.submit_job("fs_snapshot_revert", params).await
    }
}
