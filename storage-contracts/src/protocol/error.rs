// SPDX-License-Identifier: GPL-3.0-only

//! Error taxonomy shared by every operation
//!
//! Numeric codes are stable and shared with plugins; a plugin may report a
//! code this client does not know, which is kept verbatim as
//! [`ErrorNumber::Plugin`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ErrorNumber {
    Ok,
    InternalError,
    JobStarted,

    InvalidAccessGroup,
    InvalidArgument,
    InvalidConn,
    InvalidErr,
    InvalidFs,
    InvalidInit,
    InvalidJob,
    InvalidName,
    InvalidPool,
    InvalidPlugin,
    InvalidSl,
    InvalidSs,
    InvalidUri,
    InvalidVal,
    InvalidVol,
    InvalidCapability,
    InvalidSystem,
    InvalidNfs,
    InvalidBlockRange,

    NoMemory,
    NoSupport,

    NotFoundAccessGroup,
    NotFoundFs,
    NotFoundJob,
    NotFoundPool,
    NotFoundSs,
    NotFoundVolume,
    NotFoundNfsExport,
    NotFoundInitiator,
    NotFoundSystem,

    VolumeSameSize,

    TransportCommunication,
    TransportSerialization,
    TransportInvalidArg,

    /// Plugin-specific code outside the shared table
    Plugin(PluginCode),
}

/// A numeric code the shared table does not name.
///
/// Only [`ErrorNumber::from_code`] builds one, so a known code is always
/// reported by its named variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginCode(i32);

impl PluginCode {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PluginCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ErrorNumber {
    pub fn code(self) -> i32 {
        match self {
            ErrorNumber::Ok => 0,
            ErrorNumber::InternalError => 1,
            ErrorNumber::JobStarted => 7,
            ErrorNumber::InvalidAccessGroup => 120,
            ErrorNumber::InvalidArgument => 121,
            ErrorNumber::InvalidConn => 122,
            ErrorNumber::InvalidErr => 123,
            ErrorNumber::InvalidFs => 124,
            ErrorNumber::InvalidInit => 125,
            ErrorNumber::InvalidJob => 126,
            ErrorNumber::InvalidName => 127,
            ErrorNumber::InvalidPool => 128,
            ErrorNumber::InvalidPlugin => 129,
            ErrorNumber::InvalidSl => 130,
            ErrorNumber::InvalidSs => 131,
            ErrorNumber::InvalidUri => 132,
            ErrorNumber::InvalidVal => 133,
            ErrorNumber::InvalidVol => 134,
            ErrorNumber::InvalidCapability => 135,
            ErrorNumber::InvalidSystem => 136,
            ErrorNumber::InvalidNfs => 137,
            ErrorNumber::InvalidBlockRange => 138,
            ErrorNumber::NoMemory => 152,
            ErrorNumber::NoSupport => 153,
            ErrorNumber::NotFoundAccessGroup => 200,
            ErrorNumber::NotFoundFs => 201,
            ErrorNumber::NotFoundJob => 202,
            ErrorNumber::NotFoundPool => 203,
            ErrorNumber::NotFoundSs => 204,
            ErrorNumber::NotFoundVolume => 205,
            ErrorNumber::NotFoundNfsExport => 206,
            ErrorNumber::NotFoundInitiator => 207,
            ErrorNumber::NotFoundSystem => 208,
            ErrorNumber::VolumeSameSize => 351,
            ErrorNumber::TransportCommunication => 400,
            ErrorNumber::TransportSerialization => 401,
            ErrorNumber::TransportInvalidArg => 402,
            ErrorNumber::Plugin(code) => code.get(),
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            0 => ErrorNumber::Ok,
            1 => ErrorNumber::InternalError,
            7 => ErrorNumber::JobStarted,
            120 => ErrorNumber::InvalidAccessGroup,
            121 => ErrorNumber::InvalidArgument,
            122 => ErrorNumber::InvalidConn,
            123 => ErrorNumber::InvalidErr,
            124 => ErrorNumber::InvalidFs,
            125 => ErrorNumber::InvalidInit,
            126 => ErrorNumber::InvalidJob,
            127 => ErrorNumber::InvalidName,
            128 => ErrorNumber::InvalidPool,
            129 => ErrorNumber::InvalidPlugin,
            130 => ErrorNumber::InvalidSl,
            131 => ErrorNumber::InvalidSs,
            132 => ErrorNumber::InvalidUri,
            133 => ErrorNumber::InvalidVal,
            134 => ErrorNumber::InvalidVol,
            135 => ErrorNumber::InvalidCapability,
            136 => ErrorNumber::InvalidSystem,
            137 => ErrorNumber::InvalidNfs,
            138 => ErrorNumber::InvalidBlockRange,
            152 => ErrorNumber::NoMemory,
            153 => ErrorNumber::NoSupport,
            200 => ErrorNumber::NotFoundAccessGroup,
            201 => ErrorNumber::NotFoundFs,
            202 => ErrorNumber::NotFoundJob,
            203 => ErrorNumber::NotFoundPool,
            204 => ErrorNumber::NotFoundSs,
            205 => ErrorNumber::NotFoundVolume,
            206 => ErrorNumber::NotFoundNfsExport,
            207 => ErrorNumber::NotFoundInitiator,
            208 => ErrorNumber::NotFoundSystem,
            351 => ErrorNumber::VolumeSameSize,
            400 => ErrorNumber::TransportCommunication,
            401 => ErrorNumber::TransportSerialization,
            402 => ErrorNumber::TransportInvalidArg,
            other => ErrorNumber::Plugin(PluginCode(other)),
        }
    }

    /// True for the "wrong or stale handle" family of codes
    pub fn is_invalid_handle(self) -> bool {
        matches!(
            self,
            ErrorNumber::InvalidAccessGroup
                | ErrorNumber::InvalidFs
                | ErrorNumber::InvalidInit
                | ErrorNumber::InvalidPool
                | ErrorNumber::InvalidSl
                | ErrorNumber::InvalidSs
                | ErrorNumber::InvalidVol
                | ErrorNumber::InvalidSystem
                | ErrorNumber::InvalidNfs
                | ErrorNumber::InvalidBlockRange
        )
    }
}

impl From<i32> for ErrorNumber {
    fn from(code: i32) -> Self {
        ErrorNumber::from_code(code)
    }
}

impl From<ErrorNumber> for i32 {
    fn from(number: ErrorNumber) -> Self {
        number.code()
    }
}

impl fmt::Display for ErrorNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorNumber::Plugin(code) => write!(f, "plugin error {code}"),
            other => write!(f, "{other:?} ({})", other.code()),
        }
    }
}

/// Which side raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDomain {
    Framework,
    Plugin,
}

impl ErrorDomain {
    pub fn code(self) -> i32 {
        match self {
            ErrorDomain::Framework => 0,
            ErrorDomain::Plugin => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorLevel {
    None,
    Warning,
    Error,
}

impl ErrorLevel {
    pub fn code(self) -> i32 {
        match self {
            ErrorLevel::None => 0,
            ErrorLevel::Warning => 1,
            ErrorLevel::Error => 2,
        }
    }
}

/// Structured error recorded on a connection and returned by operations
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{number}: {message}")]
pub struct LsmError {
    pub number: ErrorNumber,
    pub domain: ErrorDomain,
    pub level: ErrorLevel,
    pub message: String,

    /// Underlying exception text, when there was one
    pub exception: Option<String>,

    /// Extra diagnostic data supplied by the plugin
    pub debug: Option<String>,
}

impl LsmError {
    /// A framework-domain error at `Error` level
    pub fn new(number: ErrorNumber, message: impl Into<String>) -> Self {
        Self {
            number,
            domain: ErrorDomain::Framework,
            level: ErrorLevel::Error,
            message: message.into(),
            exception: None,
            debug: None,
        }
    }

    /// An error whose code was relayed from the plugin
    pub fn plugin(code: i32, message: impl Into<String>) -> Self {
        Self {
            domain: ErrorDomain::Plugin,
            ..Self::new(ErrorNumber::from_code(code), message)
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorNumber::InvalidArgument, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorNumber::InternalError, message)
    }

    pub fn with_exception(mut self, exception: impl Into<String>) -> Self {
        self.exception = Some(exception.into());
        self
    }

    pub fn with_debug(mut self, debug: impl Into<String>) -> Self {
        self.debug = Some(debug.into());
        self
    }

    pub fn code(&self) -> i32 {
        self.number.code()
    }
}
