// SPDX-License-Identifier: GPL-3.0-only

use crate::common::coded_enum;

coded_enum! {
    /// Plugin-reported state of an asynchronous job
    pub enum JobStatus {
        InProgress = 1,
        Complete = 2,
        Error = 3,
    }
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, JobStatus::InProgress)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::InProgress => write!(f, "in progress"),
            JobStatus::Complete => write!(f, "complete"),
            JobStatus::Error => write!(f, "error"),
        }
    }
}
