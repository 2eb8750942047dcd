// SPDX-License-Identifier: GPL-3.0-only

//! Plugin client
//!
//! [`Connection`] exposes one async method per plugin operation. Each one
//! checks its arguments, marshals them, performs the call and interprets the
//! reply; failures come back as [`LsmError`] and are also kept on the
//! connection until the next operation starts.

mod access;
mod array;
pub mod config;
mod connection;
mod filesystems;
pub mod job;
mod nfs;
mod pools;
mod systems;
mod translate;
mod validate;
mod volumes;

pub use config::{ConfigError, ConnectConfig, DEFAULT_TIMEOUT_MS};
pub use connection::Connection;
pub use job::{JobFreeError, JobId, JobProgress, Submission};
pub use nfs::ExportRequest;
pub use systems::PluginInfo;
pub use validate::Handle;

use crate::protocol::LsmError;

pub type Result<T, E = LsmError> = std::result::Result<T, E>;
