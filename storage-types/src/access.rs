// SPDX-License-Identifier: GPL-3.0-only

//! Host access models: initiators and access groups

use serde::{Deserialize, Serialize};

use crate::common::coded_enum;

/// A named set of initiators that are granted access to volumes together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGroup {
    pub id: String,
    pub name: String,
    pub initiators: Vec<String>,
    pub system_id: String,
}

impl AccessGroup {
    pub fn contains(&self, initiator_id: &str) -> bool {
        self.initiators.iter().any(|i| i == initiator_id)
    }
}

/// A host-side endpoint (HBA port, iSCSI IQN, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiator {
    pub id: String,
    pub init_type: InitiatorType,
    pub name: String,
}

coded_enum! {
    pub enum InitiatorType {
        Other = 1,
        PortWwn = 2,
        NodeWwn = 3,
        Hostname = 4,
        Iscsi = 5,
    }
}
