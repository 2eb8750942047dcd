// SPDX-License-Identifier: GPL-3.0-only

//! Transport seam
//!
//! The byte-level transport and its framing live outside this crate; a
//! [`Connection`](crate::client::Connection) only ever talks to a boxed
//! [`Transport`].

use async_trait::async_trait;
use thiserror::Error;

use super::Value;

/// Failure raised by a transport while performing one request/response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Encoding the request or decoding the reply failed mid-exchange
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The plugin answered with an explicit error
    #[error("plugin error {code}: {message}")]
    Protocol {
        code: i32,
        message: String,
        data: Option<String>,
    },

    /// The plugin went away
    #[error("communication lost: {0}")]
    CommunicationLost(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() || err.is_eof() {
            TransportError::CommunicationLost(err.to_string())
        } else {
            TransportError::Serialization(err.to_string())
        }
    }
}

#[async_trait]
pub trait Transport: Send {
    /// Send `method` with named `params` and wait for the plugin's reply
    async fn rpc(&mut self, method: &str, params: Value) -> Result<Value, TransportError>;

    /// Release the underlying channel
    async fn close(&mut self) {}
}
