// SPDX-License-Identifier: GPL-3.0-only

use storage_types::{Flags, NfsExport};

use super::connection::{Connection, Params};
use super::{Result, validate};
use crate::protocol::{LsmError, WireEntity, optional_string_list_to_value};

/// Arguments for [`Connection::export_fs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub fs_id: String,
    /// Let the array pick a path when unset
    pub export_path: Option<String>,
    pub root: Option<Vec<String>>,
    pub rw: Option<Vec<String>>,
    pub ro: Option<Vec<String>>,
    pub anon_uid: u64,
    pub anon_gid: u64,
    pub auth_type: Option<String>,
    pub options: Option<String>,
}

impl ExportRequest {
    pub fn new(fs_id: impl Into<String>) -> Self {
        Self {
            fs_id: fs_id.into(),
            export_path: None,
            root: None,
            rw: None,
            ro: None,
            anon_uid: NfsExport::ANON_UID_GID_NA,
            anon_gid: NfsExport::ANON_UID_GID_NA,
            auth_type: None,
            options: None,
        }
    }

    pub fn export_path(mut self, path: impl Into<String>) -> Self {
        self.export_path = Some(path.into());
        self
    }

    pub fn root_hosts(mut self, hosts: Vec<String>) -> Self {
        self.root = Some(hosts);
        self
    }

    pub fn rw_hosts(mut self, hosts: Vec<String>) -> Self {
        self.rw = Some(hosts);
        self
    }

    pub fn ro_hosts(mut self, hosts: Vec<String>) -> Self {
        self.ro = Some(hosts);
        self
    }

    pub fn anon_ids(mut self, uid: u64, gid: u64) -> Self {
        self.anon_uid = uid;
        self.anon_gid = gid;
        self
    }

    pub fn auth_type(mut self, auth: impl Into<String>) -> Self {
        self.auth_type = Some(auth.into());
        self
    }

    pub fn options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    fn validate(&self) -> Result<()> {
        validate::non_empty("file system id", &self.fs_id)?;
        if self.root.is_none() && self.rw.is_none() && self.ro.is_none() {
            return Err(LsmError::invalid_argument(
                "at least one of the root, rw or ro host lists is required",
            ));
        }
        Ok(())
    }
}

impl Connection {
    pub async fn nfs_list(&mut self, flags: Flags) -> Result<Vec<NfsExport>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("exports", Params::new(flags)).await
    }

    /// Export a file system over NFS and return the export the array created
    pub async fn export_fs(&mut self, request: &ExportRequest, flags: Flags) -> Result<NfsExport> {
        self.gate(|| {
            request.validate()?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("fs_id", &request.fs_id)
            .with("export_path", request.export_path.as_deref())
            .with("root_list", optional_string_list_to_value(request.root.as_deref()))
            .with("rw_list", optional_string_list_to_value(request.rw.as_deref()))
            .with("ro_list", optional_string_list_to_value(request.ro.as_deref()))
            .with("anon_uid", request.anon_uid)
            .with("anon_gid", request.anon_gid)
            .with("auth_type", request.auth_type.as_deref())
            .with("options", request.options.as_deref());
        self.call_entity("export_fs", params).await
    }

    pub async fn export_remove(&mut self, export: &NfsExport, flags: Flags) -> Result<()> {
        self.gate(|| {
            validate::handle(export)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("export", export.to_value());
        self.call_unit("export_remove", params).await
    }
}
