//! Role catalog configuration types
//!
//! Declarative TOML shape for a role catalog: system roles, project roles,
//! user assignments, and project membership. Grant maps use the snake_case
//! key names from [`crate::authz::keys`]; an unknown key fails
//! deserialization instead of being silently dropped.

use crate::authz::keys::{MenuKey, PermissionKey};
use serde::Deserialize;
use std::collections::HashMap;

/// Root catalog structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Account-wide roles, keyed by role name
    pub system_roles: HashMap<String, RoleConfig>,

    /// Project-scoped roles, keyed by role name
    pub project_roles: HashMap<String, RoleConfig>,

    /// User accounts and their system-role assignment
    pub users: HashMap<String, UserConfig>,

    /// Projects and their membership fields
    pub projects: HashMap<String, ProjectConfig>,
}

/// A stored role: explicit boolean grants only
///
/// Both maps default to empty, which denies everything. There is no way to
/// express "grant all" in the file short of listing every key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RoleConfig {
    /// Permission grants
    pub permissions: HashMap<PermissionKey, bool>,

    /// Menu visibility flags
    pub menus: HashMap<MenuKey, bool>,
}

/// A user account entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Name of the assigned system role; absent means no grants
    pub system_role: Option<String>,
}

/// A project entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Human-readable name
    pub name: String,

    /// User id of the project lead
    pub lead: String,

    /// User id of the product owner, if any
    pub product_owner: Option<String>,

    /// User ids of the member list
    pub members: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_config_defaults_empty() {
        let config: RoleConfig = toml::from_str("").unwrap();
        assert!(config.permissions.is_empty());
        assert!(config.menus.is_empty());
    }

    #[test]
    fn test_role_config_parses_grants() {
        let config: RoleConfig = toml::from_str(
            r#"
permissions = { manage_tasks = true, modify_budget = false }
menus = { tasks = true }
"#,
        )
        .unwrap();
        assert_eq!(config.permissions.get(&PermissionKey::ManageTasks), Some(&true));
        assert_eq!(config.permissions.get(&PermissionKey::ModifyBudget), Some(&false));
        assert_eq!(config.menus.get(&MenuKey::Tasks), Some(&true));
    }

    #[test]
    fn test_unknown_permission_key_fails() {
        let result: Result<RoleConfig, _> =
            toml::from_str(r#"permissions = { not_a_permission = true }"#);
        assert!(result.is_err());
    }
}
