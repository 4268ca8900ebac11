//! Typed identifiers
//!
//! Every table in the game uses a 64-bit integer key. Wrapping them keeps a
//! company id from being passed where a resource id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create an id from a raw i64 value
            #[inline]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the inner i64 value
            #[inline]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Catalog ids are assigned by the seed files and must be positive
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Primary key of a registered user
    UserId
);
entity_id!(
    /// Primary key of a company
    CompanyId
);
entity_id!(
    /// Catalog id of a tradeable resource
    ResourceId
);
entity_id!(
    /// Catalog id of a production building
    BuildingId
);
entity_id!(
    /// Catalog id of a production process
    ProcessId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&CompanyId::new(42)).unwrap();
        assert_eq!(json, "42");

        let parsed: ResourceId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, ResourceId::new(7));
    }

    #[test]
    fn test_is_valid() {
        assert!(ResourceId::new(1).is_valid());
        assert!(!ResourceId::new(0).is_valid());
        assert!(!ProcessId::new(-3).is_valid());
    }

    #[test]
    fn test_display_and_conversion() {
        let id = UserId::from(99);
        assert_eq!(id.to_string(), "99");
        assert_eq!(i64::from(id), 99);
    }
}
