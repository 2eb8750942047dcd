// SPDX-License-Identifier: GPL-3.0-only

//! Common utility types shared across models

use num_format::{Locale, ToFormattedString};
use thiserror::Error;

/// Raised when a numeric wire code does not belong to a closed enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: i32,
}

/// Declares a closed enum whose variants map to fixed numeric wire codes.
///
/// The generated `TryFrom<i32>` is the allow-list: any code not named here
/// is rejected with [`UnknownCode`].
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant
            ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Numeric code used on the wire
            pub fn code(self) -> i32 {
                match self {
                    $($name::$variant => $code),+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::common::UnknownCode;

            fn try_from(code: i32) -> Result<Self, $crate::common::UnknownCode> {
                match code {
                    $(c if c == $code => Ok($name::$variant),)+
                    _ => Err($crate::common::UnknownCode {
                        kind: stringify!($name),
                        code,
                    }),
                }
            }
        }
    };
}

pub(crate) use coded_enum;

/// Convert bytes to human-readable format (e.g., "1.50 GB")
pub fn bytes_to_pretty(bytes: u64, add_bytes: bool) -> String {
    const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

    let mut steps = 0;
    let mut val = bytes as f64;

    while val > 1024. && steps < UNITS.len() - 1 {
        val /= 1024.;
        steps += 1;
    }

    if add_bytes {
        let bytes_str = bytes.to_formatted_string(&Locale::en);
        format!("{:.2} {} ({} bytes)", val, UNITS[steps], bytes_str)
    } else {
        format!("{:.2} {}", val, UNITS[steps])
    }
}
