//! Authorization kernel
//!
//! Two-tier role-based access control for the Worksuite platform.
//!
//! ## Model
//!
//! Every user carries one optional **system role** (account-wide). Within a
//! project they may additionally carry one **project role**. The effective
//! permission set is the intersection of the two tiers:
//!
//! ```text
//! effective[key] = system grants key  AND  (no project role OR project grants key)
//! ```
//!
//! Grants are explicit-true only: a missing, false, or unmigrated entry
//! denies. A project role can therefore narrow a user's system grants but
//! never broaden them, which rules out privilege escalation through
//! project-level role assignment.
//!
//! ## Example
//!
//! ```
//! use worksuite_authz::authz::{self, PermissionKey, Role};
//! use worksuite_authz::model::{User, UserId};
//!
//! let system = Role::new("task_manager")
//!     .with_permission(PermissionKey::ManageTasks, true);
//! let project = Role::new("observer")
//!     .with_permission(PermissionKey::ManageTasks, false);
//! let user = User::new(UserId::new("lena")).with_system_role(system);
//!
//! assert!(authz::has_permission(Some(&user), PermissionKey::ManageTasks, None));
//! assert!(!authz::has_permission(Some(&user), PermissionKey::ManageTasks, Some(&project)));
//! ```

pub mod keys;
pub mod resolver;
pub mod role;

pub use keys::{MenuKey, PermissionKey};
pub use resolver::{
    can_access_project_resource, get_visible_menus, has_permission, is_menu_visible, merge_roles,
    require_permission, require_project_access,
};
pub use role::{EffectivePermissionSet, MenuGrants, PermissionGrants, Role};
