// SPDX-License-Identifier: GPL-3.0-only

use storage_types::{Disk, Flags, MemberType, Pool, RaidType, System, Volume};

use super::connection::{Connection, Params};
use super::job::Submission;
use super::{Result, validate};
use crate::protocol::{WireEntity, entity_list_to_value};

impl Connection {
    pub async fn pool_list(&mut self, flags: Flags) -> Result<Vec<Pool>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("pools", Params::new(flags)).await
    }

    pub async fn pool_create(
        &mut self,
        system: &System,
        pool_name: &str,
        size_bytes: u64,
        raid_type: RaidType,
        member_type: MemberType,
        flags: Flags,
    ) -> Result<Submission<Pool>> {
        self.gate(|| {
            validate::handle(system)?;
            validate::non_empty("pool name", pool_name)?;
            validate::non_zero("pool size", size_bytes)?;
            validate::raid_type(raid_type)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("system", system.to_value())
            .with("pool_name", pool_name)
            .with("size_bytes", size_bytes)
            .with("raid_type", raid_type.code())
            .with("member_type", member_type.code());
        self.submit("pool_create", params).await
    }

    pub async fn pool_create_from_disks(
        &mut self,
        system: &System,
        pool_name: &str,
        disks: &[Disk],
        raid_type: RaidType,
        flags: Flags,
    ) -> Result<Submission<Pool>> {
        self.gate(|| {
            validate::non_empty_list("disk list", disks)?;
            validate::handles(disks)?;
            validate::handle(system)?;
            validate::non_empty("pool name", pool_name)?;
            validate::raid_type(raid_type)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("system", system.to_value())
            .with("pool_name", pool_name)
            .with("disks", entity_list_to_value(disks))
            .with("raid_type", raid_type.code());
        self.submit("pool_create_from_disks", params).await
    }

    pub async fn pool_create_from_volumes(
        &mut self,
        system: &System,
        pool_name: &str,
        volumes: &[Volume],
        raid_type: RaidType,
        flags: Flags,
    ) -> Result<Submission<Pool>> {
        self.gate(|| {
            validate::non_empty_list("volume list", volumes)?;
            validate::handles(volumes)?;
            validate::handle(system)?;
            validate::non_empty("pool name", pool_name)?;
            validate::raid_type(raid_type)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("system", system.to_value())
            .with("pool_name", pool_name)
            .with("volumes", entity_list_to_value(volumes))
            .with("raid_type", raid_type.code());
        self.submit("pool_create_from_volumes", params).await
    }

    /// Carve a new pool out of an existing one
    pub async fn pool_create_from_pool(
        &mut self,
        system: &System,
        pool_name: &str,
        pool: &Pool,
        size_bytes: u64,
        flags: Flags,
    ) -> Result<Submission<Pool>> {
        self.gate(|| {
            validate::handle(system)?;
            validate::handle(pool)?;
            validate::non_empty("pool name", pool_name)?;
            validate::non_zero("pool size", size_bytes)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("system", system.to_value())
            .with("pool_name", pool_name)
            .with("size_bytes", size_bytes)
            .with("pool", pool.to_value());
        self.submit("pool_create_from_pool", params).await
    }

    pub async fn pool_delete(&mut self, pool: &Pool, flags: Flags) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(pool)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("pool", pool.to_value());
        self.submit_job("pool_delete", params).await
    }
}
