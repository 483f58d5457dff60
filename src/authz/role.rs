//! Role value objects
//!
//! A [`Role`] is an immutable bundle of permission grants and menu
//! visibility flags, loaded from an external role store. Grant maps are
//! fail-closed: only an explicit `true` entry grants anything, and a
//! missing entry reads as `false`. This guards against weakly-typed stored
//! data where a field may be absent, null, or never migrated.

use crate::authz::keys::{MenuKey, PermissionKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Permission grant map with explicit-true semantics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionGrants {
    entries: HashMap<PermissionKey, bool>,
}

impl PermissionGrants {
    /// Create an empty grant map (denies everything)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a grant map with every permission explicitly granted
    pub fn all_granted() -> Self {
        Self {
            entries: PermissionKey::all().iter().map(|k| (*k, true)).collect(),
        }
    }

    /// Whether `key` is explicitly granted
    ///
    /// Absent entries resolve to `false`, never to a grant.
    pub fn granted(&self, key: PermissionKey) -> bool {
        matches!(self.entries.get(&key), Some(true))
    }

    /// Set an explicit grant value for `key`
    pub fn set(&mut self, key: PermissionKey, granted: bool) {
        self.entries.insert(key, granted);
    }

    /// Whether the map has no explicit entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(PermissionKey, bool)> for PermissionGrants {
    fn from_iter<I: IntoIterator<Item = (PermissionKey, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Menu visibility map with explicit-true semantics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuGrants {
    entries: HashMap<MenuKey, bool>,
}

impl MenuGrants {
    /// Create an empty visibility map (hides everything)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a visibility map with every menu explicitly visible
    pub fn all_visible() -> Self {
        Self {
            entries: MenuKey::all().iter().map(|k| (*k, true)).collect(),
        }
    }

    /// Whether `key` is explicitly visible
    pub fn visible(&self, key: MenuKey) -> bool {
        matches!(self.entries.get(&key), Some(true))
    }

    /// Set an explicit visibility value for `key`
    pub fn set(&mut self, key: MenuKey, visible: bool) {
        self.entries.insert(key, visible);
    }

    /// Whether the map has no explicit entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(MenuKey, bool)> for MenuGrants {
    fn from_iter<I: IntoIterator<Item = (MenuKey, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A named role: permission grants plus menu visibility
///
/// Roles are value objects. They are loaded once per request from the role
/// store and never mutated during an authorization decision. A stored role
/// missing either map deserializes to empty grants, which denies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier as known to the role store
    pub name: String,

    /// Capability grants
    #[serde(default)]
    pub permissions: PermissionGrants,

    /// Menu visibility flags
    #[serde(default)]
    pub visible_menus: MenuGrants,
}

impl Role {
    /// Create a role with no grants
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: PermissionGrants::empty(),
            visible_menus: MenuGrants::empty(),
        }
    }

    /// Set a permission grant, builder-style
    pub fn with_permission(mut self, key: PermissionKey, granted: bool) -> Self {
        self.permissions.set(key, granted);
        self
    }

    /// Set a menu visibility flag, builder-style
    pub fn with_menu(mut self, key: MenuKey, visible: bool) -> Self {
        self.visible_menus.set(key, visible);
        self
    }

    /// Built-in administrator role: every permission and menu granted
    pub fn administrator() -> Self {
        Self {
            name: "administrator".into(),
            permissions: PermissionGrants::all_granted(),
            visible_menus: MenuGrants::all_visible(),
        }
    }

    /// Built-in observer role: read-only surfaces, no mutating capability
    pub fn observer() -> Self {
        Self::new("observer")
            .with_permission(PermissionKey::ViewAllProjects, true)
            .with_permission(PermissionKey::ViewReports, true)
            .with_menu(MenuKey::Dashboard, true)
            .with_menu(MenuKey::Projects, true)
            .with_menu(MenuKey::Reports, true)
    }
}

/// Merged result of a system role and an optional project role
///
/// Always fully populated: every enumerated permission and menu key has an
/// entry. Computed per authorization check and discarded; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffectivePermissionSet {
    permissions: BTreeMap<PermissionKey, bool>,
    visible_menus: BTreeMap<MenuKey, bool>,
}

impl EffectivePermissionSet {
    pub(crate) fn new(
        permissions: BTreeMap<PermissionKey, bool>,
        visible_menus: BTreeMap<MenuKey, bool>,
    ) -> Self {
        debug_assert_eq!(permissions.len(), PermissionKey::all().len());
        debug_assert_eq!(visible_menus.len(), MenuKey::all().len());
        Self {
            permissions,
            visible_menus,
        }
    }

    /// Whether the merged set grants `key`
    pub fn is_granted(&self, key: PermissionKey) -> bool {
        matches!(self.permissions.get(&key), Some(true))
    }

    /// Whether the merged set makes `key` visible
    pub fn is_menu_visible(&self, key: MenuKey) -> bool {
        matches!(self.visible_menus.get(&key), Some(true))
    }

    /// The subset of permissions that are granted
    pub fn granted_permissions(&self) -> BTreeSet<PermissionKey> {
        self.permissions
            .iter()
            .filter(|(_, granted)| **granted)
            .map(|(key, _)| *key)
            .collect()
    }

    /// The subset of menus that are visible
    pub fn granted_menus(&self) -> BTreeSet<MenuKey> {
        self.visible_menus
            .iter()
            .filter(|(_, visible)| **visible)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Full permission map, covering every enumerated key
    pub fn permissions(&self) -> &BTreeMap<PermissionKey, bool> {
        &self.permissions
    }

    /// Full menu map, covering every enumerated key
    pub fn visible_menus(&self) -> &BTreeMap<MenuKey, bool> {
        &self.visible_menus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_entry_denies() {
        let grants = PermissionGrants::empty();
        for key in PermissionKey::all() {
            assert!(!grants.granted(*key));
        }
    }

    #[test]
    fn test_explicit_false_denies() {
        let mut grants = PermissionGrants::empty();
        grants.set(PermissionKey::ManageTasks, false);
        assert!(!grants.granted(PermissionKey::ManageTasks));
    }

    #[test]
    fn test_explicit_true_grants() {
        let mut grants = PermissionGrants::empty();
        grants.set(PermissionKey::ManageTasks, true);
        assert!(grants.granted(PermissionKey::ManageTasks));
        assert!(!grants.granted(PermissionKey::ModifyBudget));
    }

    #[test]
    fn test_role_missing_fields_deserialize_as_deny() {
        // A stored role document with no permission data at all
        let role: Role = serde_json::from_str(r#"{"name": "bare"}"#).unwrap();
        assert_eq!(role.name, "bare");
        assert!(role.permissions.is_empty());
        assert!(role.visible_menus.is_empty());
        assert!(!role.permissions.granted(PermissionKey::ViewAllProjects));
    }

    #[test]
    fn test_role_unknown_permission_key_rejected() {
        let result: Result<Role, _> = serde_json::from_str(
            r#"{"name": "bad", "permissions": {"launch_missiles": true}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_role_deserializes_snake_case_keys() {
        let role: Role = serde_json::from_str(
            r#"{
                "name": "task_lead",
                "permissions": {"manage_tasks": true, "modify_budget": false},
                "visible_menus": {"tasks": true}
            }"#,
        )
        .unwrap();
        assert!(role.permissions.granted(PermissionKey::ManageTasks));
        assert!(!role.permissions.granted(PermissionKey::ModifyBudget));
        assert!(role.visible_menus.visible(MenuKey::Tasks));
        assert!(!role.visible_menus.visible(MenuKey::Budget));
    }

    #[test]
    fn test_administrator_grants_everything() {
        let admin = Role::administrator();
        for key in PermissionKey::all() {
            assert!(admin.permissions.granted(*key));
        }
        for key in MenuKey::all() {
            assert!(admin.visible_menus.visible(*key));
        }
    }
}
