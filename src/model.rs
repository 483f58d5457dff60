//! Boundary-shaped values supplied by callers
//!
//! The resolver operates on already-loaded values. How users and projects
//! are fetched (ORM, document store, session cache) is the caller's
//! concern.

use crate::authz::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable user identifier
///
/// Membership and ownership are always compared by identifier equality,
/// never by reference identity of loaded documents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A user account with its optional system-wide role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    /// Account-wide role; `None` means the account has no grants at all
    #[serde(default)]
    pub system_role: Option<Role>,
}

impl User {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            system_role: None,
        }
    }

    pub fn with_system_role(mut self, role: Role) -> Self {
        self.system_role = Some(role);
        self
    }
}

/// A project with its membership fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier (e.g. "apollo")
    pub key: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// Designated project lead
    pub lead: UserId,

    /// Designated product owner, if any
    #[serde(default)]
    pub product_owner: Option<UserId>,

    /// Member list
    #[serde(default)]
    pub members: Vec<UserId>,
}

impl Project {
    /// Whether `user` belongs to the project as lead, product owner, or
    /// listed member
    pub fn is_member(&self, user: &UserId) -> bool {
        if self.lead == *user {
            return true;
        }
        if self.product_owner.as_ref() == Some(user) {
            return true;
        }
        self.members.contains(user)
    }
}
