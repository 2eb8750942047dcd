// SPDX-License-Identifier: GPL-3.0-only

//! Mapping of transport and decode failures onto [`LsmError`]

use tracing::error;

use crate::protocol::{DecodeError, ErrorNumber, LsmError, TransportError};

/// Failure raised while the RPC itself was in flight
pub(crate) fn transport_error(method: &str, err: TransportError) -> LsmError {
    match err {
        TransportError::Serialization(detail) => {
            LsmError::new(ErrorNumber::TransportSerialization, "Serialization error")
                .with_exception(detail)
        }
        TransportError::Protocol {
            code,
            message,
            data,
        } => {
            let err = LsmError::plugin(code, message);
            match data {
                Some(data) => err.with_debug(data),
                None => err,
            }
        }
        TransportError::CommunicationLost(detail) => {
            error!(method, %detail, "lost communication with plugin");
            LsmError::new(ErrorNumber::TransportCommunication, "Plugin died")
                .with_exception("Check logs")
                .with_debug(detail)
        }
        TransportError::Other(detail) => {
            LsmError::internal("Unexpected exception").with_exception(detail)
        }
    }
}

/// Response arrived but its shape is not what `method` promises
pub(crate) fn decode_error(method: &str, err: DecodeError) -> LsmError {
    LsmError::internal("Unexpected type").with_exception(format!("{method}: {err}"))
}
