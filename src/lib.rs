//! Worksuite authorization kernel
//!
//! Two-tier role-based access control for the Worksuite project-management
//! platform, with menu-visibility resolution and a project-resource gate.
//!
//! ## Features
//!
//! - **Most-restrictive-wins merge** - a project role can narrow a user's
//!   system-level grants, never broaden them
//! - **Explicit-true grants** - a missing, false, or unmigrated entry
//!   denies; nothing is ever granted by default
//! - **Fail-closed everywhere** - absent users, roles, or fields resolve
//!   to denial, not to errors or implicit access
//! - **Pure resolution** - no I/O, no shared state, safe under arbitrary
//!   concurrency
//!
//! ## Merge Rule
//!
//! ```text
//! effective[key] = system grants key AND (no project role OR project grants key)
//! ```
//!
//! ## Example Catalog
//!
//! ```toml
//! [system_roles.task_manager]
//! permissions = { manage_tasks = true, view_reports = true }
//! menus = { tasks = true, reports = true }
//!
//! [project_roles.contractor]
//! permissions = { manage_tasks = true }
//!
//! [users.lena]
//! system_role = "task_manager"
//!
//! [projects.apollo]
//! name = "Apollo"
//! lead = "lena"
//! members = ["noor"]
//! ```

pub mod authz;
pub mod error;
pub mod model;
pub mod store;

// Re-export main types
pub use authz::{EffectivePermissionSet, MenuKey, PermissionKey, Role};
pub use error::{AppError, Result};
pub use model::{Project, User, UserId};
pub use store::{RoleCatalog, RoleStore, load_catalog};
