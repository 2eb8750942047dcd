// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};
use storage_types::{Capabilities, Flags, System};

use super::connection::{Connection, Params};
use super::{Result, validate};
use crate::protocol::{DecodeError, Value, WireEntity};

/// Description and version reported by a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub description: String,
    pub version: String,
}

impl PluginInfo {
    fn from_value(value: &Value) -> Result<Self, DecodeError> {
        match value.as_array()? {
            [description, version] => Ok(Self {
                description: description.as_str()?.to_string(),
                version: version.as_str()?.to_string(),
            }),
            other => Err(DecodeError::WrongLength {
                expected: 2,
                found: other.len(),
            }),
        }
    }
}

impl Connection {
    pub async fn plugin_info(&mut self, flags: Flags) -> Result<PluginInfo> {
        self.gate(|| validate::flags(flags))?;
        let reply = self.call("plugin_info", Params::new(flags)).await?;
        self.decode("plugin_info", PluginInfo::from_value(&reply))
    }

    pub async fn system_list(&mut self, flags: Flags) -> Result<Vec<System>> {
        self.gate(|| validate::flags(flags))?;
        self.call_list("systems", Params::new(flags)).await
    }

    pub async fn capabilities(&mut self, system: &System, flags: Flags) -> Result<Capabilities> {
        self.gate(|| {
            validate::handle(system)?;
            validate::flags(flags)
        })?;
        let params = Params::new(flags).with("system", system.to_value());
        self.call_entity("capabilities", params).await
    }
}
