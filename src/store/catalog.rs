//! In-memory role catalog
//!
//! Resolved form of a [`CatalogConfig`]: role names become [`Role`] values,
//! user assignments become [`User`] values with their system role attached,
//! and project entries become [`Project`] values. Dangling role references
//! are rejected at build time so that authorization checks never have to
//! deal with them.

use crate::authz::role::{MenuGrants, PermissionGrants, Role};
use crate::error::ConfigError;
use crate::model::{Project, User, UserId};
use crate::store::types::{CatalogConfig, RoleConfig};
use std::collections::HashMap;

/// Read access to stored roles
///
/// The resolver itself never touches a store; this seam exists for callers
/// that look roles up by name (the CLI, request handlers).
pub trait RoleStore {
    /// Look up an account-wide role by name
    fn system_role(&self, name: &str) -> Option<&Role>;

    /// Look up a project-scoped role by name
    fn project_role(&self, name: &str) -> Option<&Role>;
}

/// Fully resolved role catalog
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    system_roles: HashMap<String, Role>,
    project_roles: HashMap<String, Role>,
    users: HashMap<String, User>,
    projects: HashMap<String, Project>,
}

impl RoleCatalog {
    /// Build a catalog from configuration, validating all references
    pub fn from_config(config: &CatalogConfig) -> Result<Self, ConfigError> {
        let system_roles: HashMap<String, Role> = config
            .system_roles
            .iter()
            .map(|(name, role)| (name.clone(), build_role(name, role)))
            .collect();
        let project_roles: HashMap<String, Role> = config
            .project_roles
            .iter()
            .map(|(name, role)| (name.clone(), build_role(name, role)))
            .collect();

        let mut users = HashMap::new();
        for (id, user_config) in &config.users {
            let system_role = match &user_config.system_role {
                Some(role_name) => Some(
                    system_roles
                        .get(role_name)
                        .cloned()
                        .ok_or_else(|| ConfigError::UnknownRole {
                            role: role_name.clone(),
                            referrer: format!("users.{}", id),
                        })?,
                ),
                None => None,
            };
            users.insert(
                id.clone(),
                User {
                    id: UserId::new(id.clone()),
                    system_role,
                },
            );
        }

        let mut projects = HashMap::new();
        for (key, proj) in &config.projects {
            if proj.lead.is_empty() {
                return Err(ConfigError::Missing {
                    field: format!("projects.{}.lead", key),
                });
            }
            projects.insert(
                key.clone(),
                Project {
                    key: key.clone(),
                    name: proj.name.clone(),
                    lead: UserId::new(proj.lead.clone()),
                    product_owner: proj.product_owner.clone().map(UserId::new),
                    members: proj.members.iter().cloned().map(UserId::new).collect(),
                },
            );
        }

        Ok(Self {
            system_roles,
            project_roles,
            users,
            projects,
        })
    }

    /// Look up a user account by id
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    /// Look up a project by key
    pub fn project(&self, key: &str) -> Option<&Project> {
        self.projects.get(key)
    }

    /// Iterate system roles, for listing
    pub fn system_roles(&self) -> impl Iterator<Item = (&str, &Role)> {
        self.system_roles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate project roles, for listing
    pub fn project_roles(&self) -> impl Iterator<Item = (&str, &Role)> {
        self.project_roles.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl RoleStore for RoleCatalog {
    fn system_role(&self, name: &str) -> Option<&Role> {
        self.system_roles.get(name)
    }

    fn project_role(&self, name: &str) -> Option<&Role> {
        self.project_roles.get(name)
    }
}

fn build_role(name: &str, config: &RoleConfig) -> Role {
    Role {
        name: name.to_string(),
        permissions: config
            .permissions
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect::<PermissionGrants>(),
        visible_menus: config
            .menus
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect::<MenuGrants>(),
    }
}
