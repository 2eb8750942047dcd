// SPDX-License-Identifier: GPL-3.0-only

//! Client side of the storage plugin protocol
//!
//! - [`protocol`]: wire values, entity codecs, the error taxonomy and the
//!   [`Transport`] seam a plugin channel plugs into
//! - [`client`]: [`Connection`] and every typed plugin operation, including
//!   the asynchronous job protocol

pub mod client;
pub mod protocol;

pub use client::{
    ConnectConfig, Connection, ExportRequest, JobFreeError, JobId, JobProgress, PluginInfo,
    Submission,
};
pub use protocol::{
    DecodeError, ErrorDomain, ErrorLevel, ErrorNumber, LsmError, PluginCode, Transport,
    TransportError, Value, ValueType, WireEntity,
};
