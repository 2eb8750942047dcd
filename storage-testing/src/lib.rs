// SPDX-License-Identifier: GPL-3.0-only

//! Test tooling for the plugin client: a scripted in-memory transport,
//! entity fixtures and tracing setup.

pub mod errors;
pub mod fixtures;
pub mod logging;
pub mod transport;

pub use transport::{RecordedCall, ScriptedTransport};
