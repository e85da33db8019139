//! Strongly-typed identifiers used by domain aggregates.
//!
//! Every aggregate is addressed by an opaque 128-bit identifier. Wrapping the
//! raw [`Uuid`] per aggregate keeps a `CompanyId` from being passed where a
//! `ContactId` is expected, and gives one place to convert at the database
//! boundary (16-byte blobs) and the HTTP boundary (hyphenated strings).
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided uuid failed format validation.
    #[error("must be a valid UUID")]
    InvalidUuid,
}

/// Macro to generate lightweight newtypes for aggregate identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parses the hyphenated textual form.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                value.parse()
            }

            /// Parse from raw bytes (DB boundary).
            pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeConstraintError> {
                Uuid::from_slice(bytes)
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidUuid)
            }

            /// Convert to raw bytes (DB boundary).
            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }

            /// Returns the wrapped [`Uuid`].
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| TypeConstraintError::InvalidUuid)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(CompanyId, "Unique identifier for a company.");
id_newtype!(ContactId, "Unique identifier for a contact person.");
id_newtype!(UserId, "Unique identifier for a user of the CRM.");
id_newtype!(QuoteId, "Unique identifier for a quote.");
id_newtype!(ProductId, "Unique identifier for a quote line item.");
