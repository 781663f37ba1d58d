//! Typed identifiers for the four record kinds
//!
//! Each container gets its own Uuid-backed id type, so a savings id can
//! never address a transaction. Ids serialize as plain UUID strings; the
//! Display form is a short prefixed handle for logs and messages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse a full UUID string, with or without the display prefix
            pub fn parse(s: &str) -> Result<Self, uuid::Error> {
                let bare = s.strip_prefix($prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(bare)?))
            }

            /// Borrow the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let hex = self.0.simple().to_string();
                write!(f, "{}{}", $prefix, &hex[..8])
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(IncomeStreamId, "inc-");
define_id!(RecurringPaymentId, "rec-");
define_id!(SavingsId, "sav-");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        let first = TransactionId::new();
        let second = TransactionId::new();
        assert_ne!(first, second);
    }

    #[test]
    fn test_display_is_short_prefixed_handle() {
        let id = TransactionId::new();
        let shown = id.to_string();

        assert!(shown.starts_with("txn-"));
        assert_eq!(shown.len(), 12); // "txn-" + 8 hex chars
    }

    #[test]
    fn test_parse_accepts_bare_and_prefixed() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";

        let bare = RecurringPaymentId::parse(uuid_str).unwrap();
        let prefixed = RecurringPaymentId::parse(&format!("rec-{}", uuid_str)).unwrap();

        assert_eq!(bare, prefixed);
        assert_eq!(bare.as_uuid().to_string(), uuid_str);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SavingsId::parse("not-a-uuid").is_err());
        assert!("".parse::<SavingsId>().is_err());
    }

    #[test]
    fn test_serializes_as_uuid_string() {
        let id = IncomeStreamId::new();

        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));

        let round_tripped: IncomeStreamId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, round_tripped);
    }

    #[test]
    fn test_id_types_stay_separate() {
        // Different id types never compare; the underlying UUIDs can
        let transaction_id = TransactionId::new();
        let savings_id = SavingsId::new();

        assert_ne!(transaction_id.as_uuid(), savings_id.as_uuid());
    }
}
