// SPDX-License-Identifier: GPL-3.0-only

//! Host access: initiators, access groups and volume masking

use storage_types::{AccessGroup, AccessType, Flags, Initiator, InitiatorType, Volume};

use super::connection::{Connection, Params};
use super::{Result, validate};
use crate::protocol::WireEntity;

impl Connection {
    pub async fn initiator_list(&mut self, flags: Flags) -> Result<Vec<Initiator>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("initiators", Params::new(flags)).await
    }

    /// Configure iSCSI CHAP credentials for `initiator`. Unset credentials
    /// travel as null.
    pub async fn iscsi_chap_auth(
        &mut self,
        initiator: &Initiator,
        in_user: Option<&str>,
        in_password: Option<&str>,
        out_user: Option<&str>,
        out_password: Option<&str>,
        flags: Flags,
    ) -> Result<()> {
        self.gate(|| {
            validate::handle(initiator)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("initiator", initiator.to_value())
            .with("in_user", in_user)
            .with("in_password", in_password)
            .with("out_user", out_user)
            .with("out_password", out_password);
        self.call_unit("iscsi_chap_auth", params).await
    }

    pub async fn initiator_grant(
        &mut self,
        initiator_id: &str,
        initiator_type: InitiatorType,
        volume: &Volume,
        access: AccessType,
        flags: Flags,
    ) -> Result<()> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::non_empty("initiator id", initiator_id)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("initiator_id", initiator_id)
            .with("initiator_type", initiator_type.code())
            .with("volume", volume.to_value())
            .with("access", access.code());
        self.call_unit("initiator_grant", params).await
    }

    pub async fn initiator_revoke(
        &mut self,
        initiator: &Initiator,
        volume: &Volume,
        flags: Flags,
    ) -> Result<()> {
        self.gate(|| {
            validate::handle(initiator)?;
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("initiator", initiator.to_value())
            .with("volume", volume.to_value());
        self.call_unit("initiator_revoke", params).await
    }

    pub async fn volumes_accessible_by_initiator(
        &mut self,
        initiator: &Initiator,
        flags: Flags,
    ) -> Result<Vec<Volume>> {
        self.gate(|| {
            validate::handle(initiator)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("initiator", initiator.to_value());
        self.call_list("volumes_accessible_by_initiator", params).await
    }

    pub async fn initiators_granted_to_volume(
        &mut self,
        volume: &Volume,
        flags: Flags,
    ) -> Result<Vec<Initiator>> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("volume", volume.to_value());
        self.call_list("initiators_granted_to_volume", params).await
    }

    pub async fn access_group_list(&mut self, flags: Flags) -> Result<Vec<AccessGroup>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("access_group_list", Params::new(flags)).await
    }

    /// Create an access group seeded with one initiator
    pub async fn access_group_create(
        &mut self,
        name: &str,
        initiator_id: &str,
        id_type: InitiatorType,
        system_id: &str,
        flags: Flags,
    ) -> Result<AccessGroup> {
        self.gate(|| {
            validate::non_empty("access group name", name)?;
            validate::non_empty("initiator id", initiator_id)?;
            validate::non_empty("system id", system_id)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("name", name)
            .with("initiator_id", initiator_id)
            .with("id_type", id_type.code())
            .with("system_id", system_id);
        self.call_entity("access_group_create", params).await
    }

    pub async fn access_group_delete(&mut self, group: &AccessGroup, flags: Flags) -> Result<()> {
        self.gate(|| {
            validate::handle(group)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("group", group.to_value());
        self.call_unit("access_group_del", params).await
    }

    pub async fn access_group_add_initiator(
        &mut self,
        group: &AccessGroup,
        initiator_id: &str,
        id_type: InitiatorType,
        flags: Flags,
    ) -> Result<()> {
        self.gate(|| {
            validate::handle(group)?;
            validate::non_empty("initiator id", initiator_id)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("group", group.to_value())
            .with("initiator_id", initiator_id)
            .with("id_type", id_type.code());
        self.call_unit("access_group_add_initiator", params).await
    }

    pub async fn access_group_del_initiator(
        &mut self,
        group: &AccessGroup,
        initiator_id: &str,
        flags: Flags,
    ) -> Result<()> {
        self.gate(|| {
            validate::handle(group)?;
            validate::non_empty("initiator id", initiator_id)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("group", group.to_value())
            .with("initiator_id", initiator_id);
        self.call_unit("access_group_del_initiator", params).await
    }

    pub async fn access_group_grant(
        &mut self,
        group: &AccessGroup,
        volume: &Volume,
        access: AccessType,
        flags: Flags,
    ) -> Result<()> {
        self.gate(|| {
            validate::handle(group)?;
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("group", group.to_value())
            .with("volume", volume.to_value())
            .with("access", access.code());
        self.call_unit("access_group_grant", params).await
    }

    pub async fn access_group_revoke(
        &mut self,
        group: &AccessGroup,
        volume: &Volume,
        flags: Flags,
    ) -> Result<()> {
        self.gate(|| {
            validate::handle(group)?;
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("group", group.to_value())
            .with("volume", volume.to_value());
        self.call_unit("access_group_revoke", params).await
    }

    pub async fn volumes_accessible_by_access_group(
        &mut self,
        group: &AccessGroup,
        flags: Flags,
    ) -> Result<Vec<Volume>> {
        self.gate(|| {
            validate::handle(group)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("group", group.to_value());
        self.call_list("volumes_accessible_by_access_group", params).await
    }

    pub async fn access_groups_granted_to_volume(
        &mut self,
        volume: &Volume,
        flags: Flags,
    ) -> Result<Vec<AccessGroup>> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("volume", volume.to_value());
        self.call_list("access_groups_granted_to_volume", params).await
    }
}
