// SPDX-License-Identifier: GPL-3.0-only

//! JSON request/response envelopes
//!
//! Transports that speak JSON wrap each call in a [`Request`] and unwrap the
//! plugin's [`Response`]. Framing of the encoded bytes is up to the
//! transport.

use serde::{Deserialize, Serialize};

use super::{TransportError, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub params: Value,
    pub id: u64,
}

impl Request {
    pub fn new(method: impl Into<String>, params: Value, id: u64) -> Self {
        Self {
            method: method.into(),
            params,
            id,
        }
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Error object returned by a plugin in place of a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub result: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RemoteError>,
    pub id: u64,
}

impl Response {
    pub fn success(result: Value, id: u64) -> Self {
        Self {
            result,
            error: None,
            id,
        }
    }

    pub fn failure(error: RemoteError, id: u64) -> Self {
        Self {
            result: Value::Null,
            error: Some(error),
            id,
        }
    }

    pub fn to_json(&self) -> Result<String, TransportError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, TransportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The result payload, or the plugin's error as [`TransportError::Protocol`]
    pub fn into_result(self) -> Result<Value, TransportError> {
        match self.error {
            Some(err) => Err(TransportError::Protocol {
                code: err.code,
                message: err.message,
                data: err.data,
            }),
            None => Ok(self.result),
        }
    }
}
