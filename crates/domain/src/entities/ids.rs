//! Typed identifiers for every entity kind
//!
//! Fixture records keep short readable ids ("c1", "t3"); ids minted during
//! a session are UUID v4 strings. Both live in the same newtype.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::DomainError;

/// Common behaviour of the typed ids
pub trait EntityId: Clone + Eq + fmt::Display {
    /// Mint a fresh collision-resistant id
    fn generate() -> Self;

    /// Borrow the raw string form
    fn as_str(&self) -> &str;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id (fixtures, ids coming back from forms)
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse a user supplied id, rejecting blank input
            pub fn parse(id: &str) -> Result<Self, DomainError> {
                let trimmed = id.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::EmptyIdentifier);
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl EntityId for $name {
            fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::Client`]
    ClientId
);
entity_id!(
    /// Identifier of an [`crate::Employee`]
    EmployeeId
);
entity_id!(
    /// Identifier of a catalog [`crate::Service`]
    ServiceId
);
entity_id!(
    /// Identifier of a catalog [`crate::Item`]
    ItemId
);
entity_id!(
    /// Identifier of an [`crate::Appointment`]
    AppointmentId
);
entity_id!(
    /// Identifier of a [`crate::Task`]
    TaskId
);
entity_id!(
    /// Identifier of a [`crate::ChatMessage`]
    MessageId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let id1 = TaskId::generate();
        let id2 = TaskId::generate();

        assert_ne!(id1, id2);
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(ClientId::parse("   "), Err(DomainError::EmptyIdentifier));
        assert_eq!(ClientId::parse(" c1 ").unwrap(), ClientId::new("c1"));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ItemId::new("i1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"i1\"");

        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
