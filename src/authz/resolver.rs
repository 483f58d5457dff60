//! Two-tier permission resolution
//!
//! Merges a user's system role with an optional project role under
//! most-restrictive-wins semantics: a permission is effective only when the
//! system role grants it explicitly AND, if a project role applies, that
//! role grants it explicitly too. A project role can narrow a user's
//! grants, never broaden them.
//!
//! Everything here is pure and synchronous: no I/O, no shared state, no
//! caching. Cost is bounded by the fixed size of the key enumerations, so
//! concurrent callers need no coordination. Malformed or absent input
//! degrades to denial, never to a panic or an implicit grant.

use crate::authz::keys::{MenuKey, PermissionKey};
use crate::authz::role::{EffectivePermissionSet, Role};
use crate::error::AccessDeniedError;
use crate::model::{Project, User};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Merge a system role with an optional project role
///
/// Returns a fully populated set covering every enumerated permission and
/// menu key. A `None` system role yields an all-deny set. Never fails.
pub fn merge_roles(
    system_role: Option<&Role>,
    project_role: Option<&Role>,
) -> EffectivePermissionSet {
    trace!(
        system_role = system_role.map(|r| r.name.as_str()),
        project_role = project_role.map(|r| r.name.as_str()),
        "Merging roles"
    );

    let permissions: BTreeMap<PermissionKey, bool> = PermissionKey::all()
        .iter()
        .map(|key| (*key, permission_effective(system_role, project_role, *key)))
        .collect();

    let visible_menus: BTreeMap<MenuKey, bool> = MenuKey::all()
        .iter()
        .map(|key| (*key, menu_effective(system_role, project_role, *key)))
        .collect();

    EffectivePermissionSet::new(permissions, visible_menus)
}

/// Effective grant for a single permission key
fn permission_effective(
    system_role: Option<&Role>,
    project_role: Option<&Role>,
    key: PermissionKey,
) -> bool {
    let system_grants = match system_role {
        Some(role) => role.permissions.granted(key),
        None => false,
    };
    let project_grants = match project_role {
        Some(role) => role.permissions.granted(key),
        None => true, // no project role means no narrowing
    };
    system_grants && project_grants
}

/// Effective visibility for a single menu key
fn menu_effective(system_role: Option<&Role>, project_role: Option<&Role>, key: MenuKey) -> bool {
    let system_shows = match system_role {
        Some(role) => role.visible_menus.visible(key),
        None => false,
    };
    let project_shows = match project_role {
        Some(role) => role.visible_menus.visible(key),
        None => true,
    };
    system_shows && project_shows
}

/// Check a single permission for a user
///
/// Fails closed when the user is absent or has no system role. With a
/// project role, both tiers must grant the key; without one, the system
/// role decides alone. Kept algorithmically identical to the entry
/// [`merge_roles`] would produce for the same key.
pub fn has_permission(
    user: Option<&User>,
    key: PermissionKey,
    project_role: Option<&Role>,
) -> bool {
    let Some(user) = user else {
        trace!(permission = %key, "No user, denying");
        return false;
    };
    let Some(system_role) = user.system_role.as_ref() else {
        trace!(user = %user.id, permission = %key, "No system role, denying");
        return false;
    };

    let granted = permission_effective(Some(system_role), project_role, key);
    debug!(
        user = %user.id,
        permission = %key,
        system_role = %system_role.name,
        project_role = project_role.map(|r| r.name.as_str()),
        granted,
        "Checked permission"
    );
    granted
}

/// The set of menus visible to a user under the merged roles
pub fn get_visible_menus(user: Option<&User>, project_role: Option<&Role>) -> BTreeSet<MenuKey> {
    let system_role = user.and_then(|u| u.system_role.as_ref());
    merge_roles(system_role, project_role).granted_menus()
}

/// Whether a single menu is visible to a user under the merged roles
pub fn is_menu_visible(user: Option<&User>, key: MenuKey, project_role: Option<&Role>) -> bool {
    let Some(user) = user else {
        return false;
    };
    let Some(system_role) = user.system_role.as_ref() else {
        return false;
    };
    menu_effective(Some(system_role), project_role, key)
}

/// Check access to a resource belonging to a project
///
/// Holders of [`PermissionKey::AdminConfiguration`] pass unconditionally.
/// Everyone else needs the system role to grant `key` and project
/// membership (lead, product owner, or member list).
///
/// Unlike [`has_permission`], no project-role merge happens here: the gate
/// is system-role-versus-membership only.
pub fn can_access_project_resource(
    user: Option<&User>,
    project: &Project,
    key: PermissionKey,
) -> bool {
    let Some(user) = user else {
        trace!(project = %project.key, permission = %key, "No user, denying");
        return false;
    };
    let Some(system_role) = user.system_role.as_ref() else {
        trace!(user = %user.id, project = %project.key, "No system role, denying");
        return false;
    };

    // Super-admin override: platform administrators reach every project
    if system_role.permissions.granted(PermissionKey::AdminConfiguration) {
        debug!(user = %user.id, project = %project.key, "Admin override, granting");
        return true;
    }

    if !system_role.permissions.granted(key) {
        debug!(user = %user.id, project = %project.key, permission = %key, "System role lacks permission");
        return false;
    }

    let member = project.is_member(&user.id);
    debug!(
        user = %user.id,
        project = %project.key,
        permission = %key,
        member,
        "Checked project access"
    );
    member
}

/// Check a permission, returning an error when denied
pub fn require_permission(
    user: Option<&User>,
    key: PermissionKey,
    project_role: Option<&Role>,
) -> Result<(), AccessDeniedError> {
    if has_permission(user, key, project_role) {
        return Ok(());
    }
    let subject = user.map(|u| u.id.to_string()).unwrap_or_else(|| "anonymous".into());
    Err(AccessDeniedError::missing_permission(subject, key.as_str()))
}

/// Check project-resource access, returning an error when denied
pub fn require_project_access(
    user: Option<&User>,
    project: &Project,
    key: PermissionKey,
) -> Result<(), AccessDeniedError> {
    if can_access_project_resource(user, project, key) {
        return Ok(());
    }
    let subject = user.map(|u| u.id.to_string()).unwrap_or_else(|| "anonymous".into());
    Err(AccessDeniedError::project_restricted(
        subject,
        key.as_str(),
        &project.key,
    ))
}
