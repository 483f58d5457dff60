//! Closed capability and menu enumerations
//!
//! Every permission and menu identifier the platform knows about is listed
//! here. Adding a key means extending the enum and auditing stored roles for
//! an explicit value; unmigrated roles fall back to deny.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic capability that a role can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKey {
    ViewAllProjects,
    CreateProject,
    EditProject,
    ArchiveProject,
    ManageMembers,
    ManageTasks,
    ManageSprints,
    ManageTimesheets,
    ModifyBudget,
    ManageDeliverables,
    ValidateDeliverable,
    ManageFiles,
    ManageComments,
    ManageNotifications,
    ViewReports,
    ManageUsers,
    ManageRoles,
    /// Super-admin capability: bypasses project-membership checks
    AdminConfiguration,
}

impl PermissionKey {
    /// Get the key name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKey::ViewAllProjects => "view_all_projects",
            PermissionKey::CreateProject => "create_project",
            PermissionKey::EditProject => "edit_project",
            PermissionKey::ArchiveProject => "archive_project",
            PermissionKey::ManageMembers => "manage_members",
            PermissionKey::ManageTasks => "manage_tasks",
            PermissionKey::ManageSprints => "manage_sprints",
            PermissionKey::ManageTimesheets => "manage_timesheets",
            PermissionKey::ModifyBudget => "modify_budget",
            PermissionKey::ManageDeliverables => "manage_deliverables",
            PermissionKey::ValidateDeliverable => "validate_deliverable",
            PermissionKey::ManageFiles => "manage_files",
            PermissionKey::ManageComments => "manage_comments",
            PermissionKey::ManageNotifications => "manage_notifications",
            PermissionKey::ViewReports => "view_reports",
            PermissionKey::ManageUsers => "manage_users",
            PermissionKey::ManageRoles => "manage_roles",
            PermissionKey::AdminConfiguration => "admin_configuration",
        }
    }

    /// Try to parse a key from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "view_all_projects" => Some(PermissionKey::ViewAllProjects),
            "create_project" => Some(PermissionKey::CreateProject),
            "edit_project" => Some(PermissionKey::EditProject),
            "archive_project" => Some(PermissionKey::ArchiveProject),
            "manage_members" => Some(PermissionKey::ManageMembers),
            "manage_tasks" => Some(PermissionKey::ManageTasks),
            "manage_sprints" => Some(PermissionKey::ManageSprints),
            "manage_timesheets" => Some(PermissionKey::ManageTimesheets),
            "modify_budget" => Some(PermissionKey::ModifyBudget),
            "manage_deliverables" => Some(PermissionKey::ManageDeliverables),
            "validate_deliverable" => Some(PermissionKey::ValidateDeliverable),
            "manage_files" => Some(PermissionKey::ManageFiles),
            "manage_comments" => Some(PermissionKey::ManageComments),
            "manage_notifications" => Some(PermissionKey::ManageNotifications),
            "view_reports" => Some(PermissionKey::ViewReports),
            "manage_users" => Some(PermissionKey::ManageUsers),
            "manage_roles" => Some(PermissionKey::ManageRoles),
            "admin_configuration" => Some(PermissionKey::AdminConfiguration),
            _ => None,
        }
    }

    /// Get all permission keys
    pub fn all() -> &'static [PermissionKey] {
        &[
            PermissionKey::ViewAllProjects,
            PermissionKey::CreateProject,
            PermissionKey::EditProject,
            PermissionKey::ArchiveProject,
            PermissionKey::ManageMembers,
            PermissionKey::ManageTasks,
            PermissionKey::ManageSprints,
            PermissionKey::ManageTimesheets,
            PermissionKey::ModifyBudget,
            PermissionKey::ManageDeliverables,
            PermissionKey::ValidateDeliverable,
            PermissionKey::ManageFiles,
            PermissionKey::ManageComments,
            PermissionKey::ManageNotifications,
            PermissionKey::ViewReports,
            PermissionKey::ManageUsers,
            PermissionKey::ManageRoles,
            PermissionKey::AdminConfiguration,
        ]
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// UI section identifier used for menu visibility
///
/// Parallel structure to [`PermissionKey`]; controls what a user sees, not
/// what they may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuKey {
    Dashboard,
    Projects,
    Tasks,
    Sprints,
    Timesheets,
    Budget,
    Deliverables,
    Files,
    Reports,
    Members,
    Administration,
}

impl MenuKey {
    /// Get the menu name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuKey::Dashboard => "dashboard",
            MenuKey::Projects => "projects",
            MenuKey::Tasks => "tasks",
            MenuKey::Sprints => "sprints",
            MenuKey::Timesheets => "timesheets",
            MenuKey::Budget => "budget",
            MenuKey::Deliverables => "deliverables",
            MenuKey::Files => "files",
            MenuKey::Reports => "reports",
            MenuKey::Members => "members",
            MenuKey::Administration => "administration",
        }
    }

    /// Try to parse a menu key from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "dashboard" => Some(MenuKey::Dashboard),
            "projects" => Some(MenuKey::Projects),
            "tasks" => Some(MenuKey::Tasks),
            "sprints" => Some(MenuKey::Sprints),
            "timesheets" => Some(MenuKey::Timesheets),
            "budget" => Some(MenuKey::Budget),
            "deliverables" => Some(MenuKey::Deliverables),
            "files" => Some(MenuKey::Files),
            "reports" => Some(MenuKey::Reports),
            "members" => Some(MenuKey::Members),
            "administration" => Some(MenuKey::Administration),
            _ => None,
        }
    }

    /// Get all menu keys
    pub fn all() -> &'static [MenuKey] {
        &[
            MenuKey::Dashboard,
            MenuKey::Projects,
            MenuKey::Tasks,
            MenuKey::Sprints,
            MenuKey::Timesheets,
            MenuKey::Budget,
            MenuKey::Deliverables,
            MenuKey::Files,
            MenuKey::Reports,
            MenuKey::Members,
            MenuKey::Administration,
        ]
    }
}

impl fmt::Display for MenuKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_key_roundtrip() {
        for key in PermissionKey::all() {
            let s = key.as_str();
            let parsed = PermissionKey::try_parse(s).unwrap();
            assert_eq!(*key, parsed);
        }
    }

    #[test]
    fn test_menu_key_roundtrip() {
        for key in MenuKey::all() {
            let s = key.as_str();
            let parsed = MenuKey::try_parse(s).unwrap();
            assert_eq!(*key, parsed);
        }
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(PermissionKey::try_parse("drop_tables").is_none());
        assert!(PermissionKey::try_parse("ManageTasks").is_none());
        assert!(MenuKey::try_parse("secret_menu").is_none());
    }

    #[test]
    fn test_serde_names_match_as_str() {
        for key in PermissionKey::all() {
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
        for key in MenuKey::all() {
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }
}
