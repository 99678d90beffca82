//! Opaque resource identifiers.
//!
//! Identifiers are assigned by the remote service and never interpreted
//! locally, so each one is a thin `String` newtype that keeps a customer id
//! from being passed where a card id is expected.

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an identifier returned by the API.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the identifier is empty or whitespace.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }

            /// Consumes the identifier, returning the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

use serde::{Deserialize, Serialize};

resource_id!(
    /// Identifier of a customer (`cust_...`).
    CustomerId
);

resource_id!(
    /// Identifier of a card stored on a customer (`card_...`).
    CardId
);

resource_id!(
    /// Identifier of a recurring schedule (`schd_...`).
    ScheduleId
);

resource_id!(
    /// Identifier of a charge (`chrg_...`).
    ChargeId
);
