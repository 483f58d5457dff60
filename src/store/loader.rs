//! Role catalog loader with layered sources
//!
//! Loads the catalog from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (WORKSUITE_AUTHZ_*)
//! 2. Catalog file (TOML)
//! 3. Default values (empty catalog)

use crate::error::ConfigError;
use crate::store::catalog::RoleCatalog;
use crate::store::types::CatalogConfig;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;

/// Default catalog file paths to check (in order)
const DEFAULT_CATALOG_PATHS: &[&str] = &[
    "worksuite-authz.toml",
    ".worksuite-authz.toml",
    "~/.config/worksuite-authz/roles.toml",
    "/etc/worksuite-authz/roles.toml",
];

/// Load a catalog from a TOML string (useful for testing)
pub fn load_catalog_from_str(toml_str: &str) -> Result<RoleCatalog, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let catalog_config: CatalogConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    RoleCatalog::from_config(&catalog_config)
}

/// Load a catalog from files and environment
pub fn load_catalog(catalog_path: Option<&str>) -> Result<RoleCatalog, ConfigError> {
    let mut builder = Config::builder();

    // 1. Start with defaults (handled by serde defaults on CatalogConfig)

    // 2. Add catalog file
    if let Some(path) = catalog_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Catalog file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CATALOG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with WORKSUITE_AUTHZ_ prefix
    // Double underscore (__) maps to nested keys, e.g.
    // WORKSUITE_AUTHZ_USERS__LENA__SYSTEM_ROLE=administrator
    builder = builder.add_source(
        Environment::with_prefix("WORKSUITE_AUTHZ")
            .separator("__")
            .try_parsing(true),
    );

    // Build and deserialize
    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let catalog_config: CatalogConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    RoleCatalog::from_config(&catalog_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::keys::{MenuKey, PermissionKey};
    use crate::store::catalog::RoleStore;
    use std::io::Write;

    #[test]
    fn test_load_catalog_from_str_basic() {
        let toml = r#"
[system_roles.administrator]
permissions = { admin_configuration = true, manage_users = true }
menus = { administration = true }

[users.root]
system_role = "administrator"
"#;

        let catalog = load_catalog_from_str(toml).unwrap();
        let admin = catalog.system_role("administrator").unwrap();
        assert!(admin.permissions.granted(PermissionKey::AdminConfiguration));
        assert!(admin.visible_menus.visible(MenuKey::Administration));
        assert!(catalog.user("root").is_some());
    }

    #[test]
    fn test_load_catalog_from_str_empty_is_valid() {
        let catalog = load_catalog_from_str("").unwrap();
        assert!(catalog.system_role("anything").is_none());
    }

    #[test]
    fn test_unknown_grant_key_fails_at_load() {
        let toml = r#"
[system_roles.bad]
permissions = { teleport = true }
"#;
        let result = load_catalog_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_dangling_role_reference_fails_at_load() {
        let toml = r#"
[users.lena]
system_role = "nonexistent"
"#;
        let result = load_catalog_from_str(toml);
        assert!(matches!(result, Err(ConfigError::UnknownRole { .. })));
    }

    #[test]
    fn test_load_catalog_missing_explicit_path() {
        let result = load_catalog(Some("/nonexistent/roles.toml"));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[system_roles.observer]
permissions = {{ view_reports = true }}

[projects.apollo]
name = "Apollo"
lead = "lena"
"#
        )
        .unwrap();

        let catalog = load_catalog(Some(file.path().to_str().unwrap())).unwrap();
        assert!(catalog.system_role("observer").is_some());
        assert_eq!(catalog.project("apollo").unwrap().name, "Apollo");
    }
}
