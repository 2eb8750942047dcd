// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// A storage array (or array controller) managed by a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct System {
    pub id: String,
    pub name: String,
}

impl System {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
