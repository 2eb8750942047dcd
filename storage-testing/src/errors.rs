// SPDX-License-Identifier: GPL-3.0-only

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestingError {
    #[error("unexpected call to '{method}' (expected {expected})")]
    UnexpectedCall { method: String, expected: String },

    #[error("{count} scripted replies never consumed, next is '{next}'")]
    UnconsumedReplies { count: usize, next: String },
}

pub type Result<T> = std::result::Result<T, TestingError>;
