// SPDX-License-Identifier: GPL-3.0-only

use crate::protocol::{DecodeError, Value, WireEntity};

/// Decode every element of a wire array, or nothing.
///
/// The first element that fails aborts the whole decode; elements already
/// built are dropped with the partial vector and the error names the index.
pub(crate) fn decode_array<T>(
    value: &Value,
    decode: impl Fn(&Value) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    value
        .as_array()?
        .iter()
        .enumerate()
        .map(|(index, item)| decode(item).map_err(|e| e.at_index(index)))
        .collect()
}

pub(crate) fn decode_entities<T: WireEntity>(value: &Value) -> Result<Vec<T>, DecodeError> {
    decode_array(value, T::from_value)
}
