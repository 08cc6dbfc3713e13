//! Saved search model - owned query definitions with notification flags
//!
//! A saved query belongs to exactly one subject:
//! - `user`: a single user (identified by user id)
//! - `org`: an organization (identified by org id)
//!
//! The owner is a tagged variant, so a record can never carry an identity
//! that disagrees with its kind.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned identifier of a saved query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedQueryId(pub i64);

impl fmt::Display for SavedQueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SavedQueryId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(SavedQueryId)
            .map_err(|_| Error::Validation(format!("Invalid saved search id: {}", s)))
    }
}

/// Which kind of subject owns a saved query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerKind {
    User,
    Org,
}

impl OwnerKind {
    /// Canonical (lowercase) form, as stored in the `owner_kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::User => "user",
            OwnerKind::Org => "org",
        }
    }

    pub fn all() -> &'static [OwnerKind] {
        &[OwnerKind::User, OwnerKind::Org]
    }
}

impl FromStr for OwnerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(OwnerKind::User),
            "org" => Ok(OwnerKind::Org),
            _ => Err(Error::Validation(format!(
                "Unknown owner kind: {:?} (expected user or org)",
                s
            ))),
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Subject that owns a saved query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "owner_kind", rename_all = "lowercase")]
pub enum Owner {
    User { user_id: i32 },
    Org { org_id: i32 },
}

impl Owner {
    /// Resolve an owner from its loose parts: a kind string plus two optional ids.
    ///
    /// The kind is matched case-insensitively. The id matching the kind must be
    /// present and the other one must be absent.
    pub fn from_parts(kind: &str, user_id: Option<i32>, org_id: Option<i32>) -> Result<Self> {
        let kind: OwnerKind = kind.parse()?;
        match (kind, user_id, org_id) {
            (OwnerKind::User, Some(user_id), None) => Ok(Owner::User { user_id }),
            (OwnerKind::Org, None, Some(org_id)) => Ok(Owner::Org { org_id }),
            (OwnerKind::User, None, _) => Err(Error::Validation(
                "owner kind 'user' requires a user id".to_string(),
            )),
            (OwnerKind::Org, _, None) => Err(Error::Validation(
                "owner kind 'org' requires an org id".to_string(),
            )),
            (kind, Some(_), Some(_)) => Err(Error::Validation(format!(
                "owner kind '{}' must not carry both a user id and an org id",
                kind
            ))),
        }
    }

    pub fn kind(&self) -> OwnerKind {
        match self {
            Owner::User { .. } => OwnerKind::User,
            Owner::Org { .. } => OwnerKind::Org,
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        match self {
            Owner::User { user_id } => Some(*user_id),
            Owner::Org { .. } => None,
        }
    }

    pub fn org_id(&self) -> Option<i32> {
        match self {
            Owner::User { .. } => None,
            Owner::Org { org_id } => Some(*org_id),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::User { user_id } => write!(f, "user:{}", user_id),
            Owner::Org { org_id } => write!(f, "org:{}", org_id),
        }
    }
}

/// A persisted saved query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub id: SavedQueryId,
    pub description: String,
    /// Search query text, opaque to this layer
    pub query: String,
    /// Notify the owner when new results appear
    pub notify: bool,
    /// Post new results to the owner's Slack channel
    pub notify_slack: bool,
    #[serde(flatten)]
    pub owner: Owner,
    pub created_at: String,
    pub updated_at: String,
}

/// Caller-supplied fields for `create` and `update`.
///
/// Ownership arrives as loose parts and is validated by [`NewSavedQuery::owner`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSavedQuery {
    pub description: String,
    pub query: String,
    pub notify: bool,
    pub notify_slack: bool,
    pub owner_kind: String,
    pub user_id: Option<i32>,
    pub org_id: Option<i32>,
}

impl NewSavedQuery {
    pub fn new(description: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_notify(mut self, notify: bool, notify_slack: bool) -> Self {
        self.notify = notify;
        self.notify_slack = notify_slack;
        self
    }

    pub fn owned_by_user(mut self, user_id: i32) -> Self {
        self.owner_kind = OwnerKind::User.as_str().to_string();
        self.user_id = Some(user_id);
        self.org_id = None;
        self
    }

    pub fn owned_by_org(mut self, org_id: i32) -> Self {
        self.owner_kind = OwnerKind::Org.as_str().to_string();
        self.user_id = None;
        self.org_id = Some(org_id);
        self
    }

    /// Validate the ownership parts
    pub fn owner(&self) -> Result<Owner> {
        Owner::from_parts(&self.owner_kind, self.user_id, self.org_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_kind_roundtrip() {
        for kind in OwnerKind::all() {
            let parsed: OwnerKind = kind.as_str().parse().unwrap();
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_owner_kind_is_case_insensitive() {
        assert_eq!(OwnerKind::from_str("User").unwrap(), OwnerKind::User);
        assert_eq!(OwnerKind::from_str(" ORG ").unwrap(), OwnerKind::Org);
        assert!(matches!(OwnerKind::from_str("team"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_owner_from_parts() {
        assert_eq!(
            Owner::from_parts("User", Some(42), None).unwrap(),
            Owner::User { user_id: 42 }
        );
        assert_eq!(
            Owner::from_parts("org", None, Some(7)).unwrap(),
            Owner::Org { org_id: 7 }
        );
    }

    #[test]
    fn test_owner_rejects_missing_or_mismatched_identity() {
        assert!(matches!(Owner::from_parts("user", None, None), Err(Error::Validation(_))));
        assert!(matches!(Owner::from_parts("user", None, Some(3)), Err(Error::Validation(_))));
        assert!(matches!(Owner::from_parts("org", Some(3), None), Err(Error::Validation(_))));
        assert!(matches!(Owner::from_parts("org", Some(1), Some(2)), Err(Error::Validation(_))));
        assert!(matches!(Owner::from_parts("", Some(1), None), Err(Error::Validation(_))));
    }

    #[test]
    fn test_owner_accessors_expose_exactly_one_identity() {
        let user = Owner::User { user_id: 42 };
        assert_eq!(user.kind(), OwnerKind::User);
        assert_eq!(user.user_id(), Some(42));
        assert_eq!(user.org_id(), None);

        let org = Owner::Org { org_id: 9 };
        assert_eq!(org.kind(), OwnerKind::Org);
        assert_eq!(org.user_id(), None);
        assert_eq!(org.org_id(), Some(9));
    }

    #[test]
    fn test_saved_query_json_shape() {
        let sq = SavedQuery {
            id: SavedQueryId(3),
            description: "errs".to_string(),
            query: "lang:go".to_string(),
            notify: true,
            notify_slack: false,
            owner: Owner::User { user_id: 42 },
            created_at: "2024-01-01 00:00:00".to_string(),
            updated_at: "2024-01-01 00:00:00".to_string(),
        };
        let value = serde_json::to_value(&sq).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["owner_kind"], "user");
        assert_eq!(value["user_id"], 42);
        assert!(value.get("org_id").is_none());
    }

    #[test]
    fn test_saved_query_id_parse() {
        assert_eq!("17".parse::<SavedQueryId>().unwrap(), SavedQueryId(17));
        assert!("abc".parse::<SavedQueryId>().is_err());
    }
}
