//! Role catalog integration tests
//!
//! Loads catalogs end to end and runs authorization checks against the
//! resolved users, roles, and projects.

use std::io::Write;
use worksuite_authz::authz::{self, MenuKey, PermissionKey};
use worksuite_authz::error::ConfigError;
use worksuite_authz::store::{RoleStore, load_catalog, load_catalog_from_str};

const SAMPLE_CATALOG: &str = r#"
[system_roles.administrator]
permissions = { admin_configuration = true, manage_users = true, manage_roles = true, view_all_projects = true }
menus = { administration = true, dashboard = true, projects = true }

[system_roles.planner]
permissions = { manage_tasks = true, manage_sprints = true, view_reports = true, modify_budget = false }
menus = { tasks = true, sprints = true, reports = true }

[project_roles.contractor]
permissions = { manage_tasks = true, view_reports = false }
menus = { tasks = true, reports = false }

[users.root]
system_role = "administrator"

[users.lena]
system_role = "planner"

[users.visitor]

[projects.apollo]
name = "Apollo"
lead = "lena"
product_owner = "marco"
members = ["noor"]
"#;

#[test]
fn test_end_to_end_permission_checks() {
    let catalog = load_catalog_from_str(SAMPLE_CATALOG).unwrap();

    let lena = catalog.user("lena");
    assert!(authz::has_permission(lena, PermissionKey::ManageTasks, None));
    assert!(!authz::has_permission(lena, PermissionKey::ModifyBudget, None));

    // Contractor project role narrows reports away but keeps tasks
    let contractor = catalog.project_role("contractor");
    assert!(authz::has_permission(lena, PermissionKey::ManageTasks, contractor));
    assert!(!authz::has_permission(lena, PermissionKey::ViewReports, contractor));
}

#[test]
fn test_end_to_end_menu_resolution() {
    let catalog = load_catalog_from_str(SAMPLE_CATALOG).unwrap();

    let lena = catalog.user("lena");
    let menus = authz::get_visible_menus(lena, None);
    assert_eq!(
        menus,
        [MenuKey::Tasks, MenuKey::Sprints, MenuKey::Reports]
            .into_iter()
            .collect()
    );

    let contractor = catalog.project_role("contractor");
    let narrowed = authz::get_visible_menus(lena, contractor);
    assert_eq!(narrowed, [MenuKey::Tasks].into_iter().collect());
}

#[test]
fn test_end_to_end_project_gate() {
    let catalog = load_catalog_from_str(SAMPLE_CATALOG).unwrap();
    let apollo = catalog.project("apollo").unwrap();

    // Lead with the grant passes
    assert!(authz::can_access_project_resource(
        catalog.user("lena"),
        apollo,
        PermissionKey::ManageTasks
    ));

    // Admin passes without membership
    assert!(authz::can_access_project_resource(
        catalog.user("root"),
        apollo,
        PermissionKey::ManageTasks
    ));

    // User with no system role fails
    assert!(!authz::can_access_project_resource(
        catalog.user("visitor"),
        apollo,
        PermissionKey::ManageTasks
    ));

    // Unknown user fails
    assert!(!authz::can_access_project_resource(
        catalog.user("nobody"),
        apollo,
        PermissionKey::ManageTasks
    ));
}

#[test]
fn test_explicit_false_in_catalog_denies() {
    let catalog = load_catalog_from_str(SAMPLE_CATALOG).unwrap();
    let planner = catalog.system_role("planner").unwrap();
    assert!(!planner.permissions.granted(PermissionKey::ModifyBudget));
    assert!(!planner.permissions.granted(PermissionKey::AdminConfiguration));
}

#[test]
fn test_unknown_key_in_catalog_fails_to_load() {
    let result = load_catalog_from_str(
        r#"
[system_roles.broken]
permissions = { fly_to_moon = true }
"#,
    );
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[test]
fn test_dangling_role_reference_fails_to_load() {
    let result = load_catalog_from_str(
        r#"
[users.lena]
system_role = "phantom"
"#,
    );
    assert!(matches!(result, Err(ConfigError::UnknownRole { .. })));
}

#[test]
fn test_load_catalog_from_file_path() {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
    file.write_all(SAMPLE_CATALOG.as_bytes()).unwrap();

    let catalog = load_catalog(Some(file.path().to_str().unwrap())).unwrap();
    assert!(catalog.system_role("planner").is_some());
    assert_eq!(catalog.project("apollo").unwrap().name, "Apollo");
}

#[test]
fn test_missing_explicit_path_errors() {
    let result = load_catalog(Some("/definitely/not/here.toml"));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}
