// SPDX-License-Identifier: GPL-3.0-only

use storage_types::{
    BlockRange, Disk, Flags, Pool, ProvisionType, ReplicationType, System, Volume,
};

use super::connection::{Connection, Params};
use super::job::Submission;
use super::{Result, validate};
use crate::protocol::{Value, WireEntity, entity_list_to_value};

impl Connection {
    pub async fn volume_list(&mut self, flags: Flags) -> Result<Vec<Volume>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("volumes", Params::new(flags)).await
    }

    pub async fn disk_list(&mut self, flags: Flags) -> Result<Vec<Disk>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("disks", Params::new(flags)).await
    }

    pub async fn volume_create(
        &mut self,
        pool: &Pool,
        volume_name: &str,
        size_bytes: u64,
        provisioning: ProvisionType,
        flags: Flags,
    ) -> Result<Submission<Volume>> {
        self.gate(|| {
            validate::handle(pool)?;
            validate::non_empty("volume name", volume_name)?;
            validate::non_zero("volume size", size_bytes)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("pool", pool.to_value())
            .with("volume_name", volume_name)
            .with("size_bytes", size_bytes)
            .with("provisioning", provisioning.code());
        self.submit("volume_create", params).await
    }

    /// Resize a volume. Targets that land on the current block count fail
    /// with `VolumeSameSize` without contacting the plugin.
    pub async fn volume_resize(
        &mut self,
        volume: &Volume,
        new_size_bytes: u64,
        flags: Flags,
    ) -> Result<Submission<Volume>> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::flags(flags)?;
            validate::resize_target(volume, new_size_bytes)
        })?;

        let params = Params::new(flags)
            .with("volume", volume.to_value())
            .with("new_size_bytes", new_size_bytes);
        self.submit("volume_resize", params).await
    }

    /// Replicate `source` into a new volume. `pool` may be omitted to let
    /// the array choose.
    pub async fn volume_replicate(
        &mut self,
        pool: Option<&Pool>,
        rep_type: ReplicationType,
        source: &Volume,
        name: &str,
        flags: Flags,
    ) -> Result<Submission<Volume>> {
        self.gate(|| {
            validate::optional_handle(pool)?;
            validate::handle(source)?;
            validate::non_empty("replica name", name)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("pool", pool.map_or(Value::Null, WireEntity::to_value))
            .with("rep_type", rep_type.code())
            .with("volume_src", source.to_value())
            .with("name", name);
        self.submit("volume_replicate", params).await
    }

    /// Block size, in bytes, that replicated ranges are expressed in
    pub async fn volume_replicate_range_block_size(
        &mut self,
        system: &System,
        flags: Flags,
    ) -> Result<u32> {
        self.gate(|| {
            validate::flags(flags)?;
            validate::handle(system)
        })?;

        let params = Params::new(flags).with("system", system.to_value());
        let reply = self.call("volume_replicate_range_block_size", params).await?;
        self.decode("volume_replicate_range_block_size", reply.as_u32())
    }

    pub async fn volume_replicate_range(
        &mut self,
        rep_type: ReplicationType,
        source: &Volume,
        dest: &Volume,
        ranges: &[BlockRange],
        flags: Flags,
    ) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(source)?;
            validate::handle(dest)?;
            validate::non_empty_list("block ranges", ranges)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags)
            .with("rep_type", rep_type.code())
            .with("volume_src", source.to_value())
            .with("volume_dest", dest.to_value())
            .with("ranges", entity_list_to_value(ranges));
        self.submit_job("volume_replicate_range", params).await
    }

    pub async fn volume_delete(&mut self, volume: &Volume, flags: Flags) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("volume", volume.to_value());
        self.submit_job("volume_delete", params).await
    }

    pub async fn volume_online(&mut self, volume: &Volume, flags: Flags) -> Result<()> {
        self.online_offline("volume_online", volume, flags).await
    }

    pub async fn volume_offline(&mut self, volume: &Volume, flags: Flags) -> Result<()> {
        self.online_offline("volume_offline", volume, flags).await
    }

    async fn online_offline(&mut self, method: &str, volume: &Volume, flags: Flags) -> Result<()> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("volume", volume.to_value());
        self.call_unit(method, params).await
    }

    /// Whether other volumes (snapshots, clones) depend on `volume`
    pub async fn volume_child_dependency(&mut self, volume: &Volume, flags: Flags) -> Result<bool> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("volume", volume.to_value());
        self.call_bool("volume_child_dependency", params).await
    }

    /// Break the dependencies reported by [`Self::volume_child_dependency`]
    pub async fn volume_child_dependency_rm(
        &mut self,
        volume: &Volume,
        flags: Flags,
    ) -> Result<Submission<()>> {
        self.gate(|| {
            validate::handle(volume)?;
            validate::flags(flags)
        })?;

        let params = Params::new(flags).with("volume", volume.to_value());
        self.submit_job("volume_child_dependency_rm", params).await
    }
}
