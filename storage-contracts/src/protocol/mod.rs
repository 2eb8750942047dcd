// SPDX-License-Identifier: GPL-3.0-only

pub mod codec;
pub mod decode;
pub mod error;
pub mod message;
pub mod transport;
pub mod value;

pub use codec::{
    WireEntity, entity_list_to_value, optional_string_list_to_value, string_list_from_value,
    string_list_to_value,
};
pub use decode::DecodeError;
pub use error::{ErrorDomain, ErrorLevel, ErrorNumber, LsmError, PluginCode};
pub use message::{RemoteError, Request, Response};
pub use transport::{Transport, TransportError};
pub use value::{Value, ValueType};
