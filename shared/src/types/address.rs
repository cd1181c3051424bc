//! Address identity and externally supplied address items

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{SharedError, SharedResult};

/// Deterministic identifier for a normalized address
///
/// Produced by the planner's address identity hashing. Two addresses that
/// differ only in case or whitespace runs map to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressKey(String);

impl AddressKey {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of a set of visit records
///
/// Restricted to `[A-Za-z0-9_-]` so it can name a storage document directly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    const MAX_LEN: usize = 128;

    pub fn parse(input: &str) -> SharedResult<Self> {
        let valid = !input.is_empty()
            && input.len() <= Self::MAX_LEN
            && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if valid {
            Ok(Self(input.to_string()))
        } else {
            Err(SharedError::InvalidUserId { input: input.to_string() })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = SharedError;

    fn try_from(value: String) -> SharedResult<Self> {
        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of an uploaded address list
///
/// Only `address` is interpreted; every other column is carried through
/// untouched in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressItem {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auction_date_formatted: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AddressItem {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: None,
            auction_date_formatted: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_auction_date(mut self, formatted: impl Into<String>) -> Self {
        self.auction_date_formatted = Some(formatted.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_accepts_safe_characters() {
        assert!(UserId::parse("user_42-abc").is_ok());
        assert!(UserId::parse("UID").is_ok());
    }

    #[test]
    fn test_user_id_rejects_path_like_input() {
        assert!(matches!(UserId::parse(""), Err(SharedError::InvalidUserId { .. })));
        assert!(UserId::parse("../etc").is_err());
        assert!(UserId::parse("a/b").is_err());
        assert!(UserId::parse("a b").is_err());
        assert!(UserId::parse(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_address_item_keeps_unknown_columns() {
        let json = r#"{"address":"1 Elm St","name":"Lot 7","auctionDateFormatted":"Mar 3","parcel":"12-44"}"#;
        let item: AddressItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.address, "1 Elm St");
        assert_eq!(item.name.as_deref(), Some("Lot 7"));
        assert_eq!(item.auction_date_formatted.as_deref(), Some("Mar 3"));
        assert_eq!(item.extra.get("parcel").and_then(|v| v.as_str()), Some("12-44"));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["parcel"], "12-44");
    }
}
