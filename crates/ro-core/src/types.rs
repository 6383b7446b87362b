//! Validated name types for schedule entries.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty after trimming.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// Generates a validated, whitespace-normalized name newtype.
macro_rules! define_name {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new name after collapsing whitespace runs and trimming.
            pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
                let name = normalize_whitespace(name.as_ref());
                if name.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(name))
            }

            /// Returns the name as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> Self {
                name.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

define_name!(
    /// A stage or area name.
    ///
    /// Every slot of a source table shares the same venue.
    Venue, "venue"
);

define_name!(
    /// A performer as printed in the running order.
    Performer, "performer"
);

/// Collapses whitespace runs to a single space and trims both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
