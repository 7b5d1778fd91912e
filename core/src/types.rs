//! Domain DTOs for the accounts API.
//!
//! # Design
//! These types mirror the service's JSON schema but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two. `_id` and `_rev` are assigned by the server and are carried through
//! unchanged; the client never computes them.

use serde::{Deserialize, Serialize};

/// A player account returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub name: String,
    #[serde(rename = "favoriteColor")]
    pub favorite_color: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub location: String,
}

/// Opaque credential material stored alongside an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    #[serde(rename = "sharedSecret")]
    pub shared_secret: String,
}

/// Request payload for creating a new account.
///
/// An empty `id` asks the server to assign one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateAccount {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    pub name: String,
    #[serde(rename = "favoriteColor")]
    pub favorite_color: String,
}

impl CreateAccount {
    pub fn new(name: impl Into<String>, favorite_color: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            revision: None,
            name: name.into(),
            favorite_color: favorite_color.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_uses_wire_field_names() {
        let account = Account {
            id: "abc".to_string(),
            revision: Some("1-x".to_string()),
            name: "Ann".to_string(),
            favorite_color: "green".to_string(),
            location: Location {
                location: "first-room".to_string(),
            },
            credentials: Credentials {
                shared_secret: "s3cret".to_string(),
            },
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["_id"], "abc");
        assert_eq!(json["_rev"], "1-x");
        assert_eq!(json["favoriteColor"], "green");
        assert_eq!(json["location"]["location"], "first-room");
        assert_eq!(json["credentials"]["sharedSecret"], "s3cret");
    }

    #[test]
    fn account_without_revision_omits_rev() {
        let account = Account {
            id: "abc".to_string(),
            name: "Ann".to_string(),
            favorite_color: "green".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&account).unwrap();
        assert!(json.get("_rev").is_none());
    }

    #[test]
    fn account_tolerates_missing_nested_objects() {
        let account: Account =
            serde_json::from_str(r#"{"_id":"a","name":"Ann","favoriteColor":"red"}"#).unwrap();
        assert_eq!(account.revision, None);
        assert_eq!(account.location, Location::default());
        assert_eq!(account.credentials, Credentials::default());
    }

    #[test]
    fn create_account_carries_no_nested_objects() {
        let input = CreateAccount::new("Ann", "blue");
        let json = serde_json::to_value(&input).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(json["_id"], "");
        assert_eq!(json["name"], "Ann");
        assert_eq!(json["favoriteColor"], "blue");
        assert!(object.get("location").is_none());
        assert!(object.get("credentials").is_none());
    }

    #[test]
    fn create_account_rejects_missing_name() {
        let result: Result<CreateAccount, _> = serde_json::from_str(r#"{"favoriteColor":"red"}"#);
        assert!(result.is_err());
    }
}
