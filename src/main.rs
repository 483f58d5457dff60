//! Worksuite authorization CLI
//!
//! Inspection tool over a role catalog: answers point queries the same way
//! the library does for request handlers.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use worksuite_authz::authz::{self, MenuKey, PermissionKey, Role};
use worksuite_authz::store::{RoleCatalog, RoleStore, load_catalog};

/// Worksuite authorization kernel - role catalog inspection
#[derive(Parser, Debug)]
#[command(name = "worksuite-authz")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the role catalog file
    #[arg(short, long, env = "WORKSUITE_AUTHZ_CATALOG")]
    catalog: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "WORKSUITE_AUTHZ_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a single permission for a user
    Check {
        /// User id to check
        #[arg(long)]
        user: String,

        /// Permission key (snake_case)
        #[arg(long)]
        permission: String,

        /// Project role to merge in
        #[arg(long)]
        project_role: Option<String>,

        /// Project key: checks resource access (membership gate) instead
        /// of the role merge
        #[arg(long, conflicts_with = "project_role")]
        project: Option<String>,
    },

    /// List the menus visible to a user
    Menus {
        /// User id to resolve
        #[arg(long)]
        user: String,

        /// Project role to merge in
        #[arg(long)]
        project_role: Option<String>,
    },

    /// Print the full merged permission set for a role pair
    Merge {
        /// System role name
        #[arg(long)]
        system_role: String,

        /// Project role name
        #[arg(long)]
        project_role: Option<String>,
    },

    /// List the roles defined in the catalog
    Roles,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let catalog = load_catalog(args.catalog.as_deref()).context("Failed to load role catalog")?;
    info!("Loaded role catalog");

    match args.command {
        Command::Check {
            user,
            permission,
            project_role,
            project,
        } => {
            let key = parse_permission(&permission)?;
            let account = catalog.user(&user);
            let role = lookup_project_role(&catalog, project_role.as_deref())?;

            let granted = match project {
                Some(project_key) => {
                    let project = catalog
                        .project(&project_key)
                        .with_context(|| format!("Unknown project '{}'", project_key))?;
                    authz::can_access_project_resource(account, project, key)
                }
                None => authz::has_permission(account, key, role),
            };

            if args.json {
                println!(
                    "{}",
                    serde_json::json!({ "user": user, "permission": key, "granted": granted })
                );
            } else {
                println!("{}", if granted { "granted" } else { "denied" });
            }
            if !granted {
                std::process::exit(1);
            }
        }

        Command::Menus { user, project_role } => {
            let account = catalog.user(&user);
            let role = lookup_project_role(&catalog, project_role.as_deref())?;
            let menus = authz::get_visible_menus(account, role);

            if args.json {
                println!("{}", serde_json::to_string(&menus)?);
            } else {
                for menu in &menus {
                    println!("{menu}");
                }
            }
        }

        Command::Merge {
            system_role,
            project_role,
        } => {
            let system = catalog
                .system_role(&system_role)
                .with_context(|| format!("Unknown system role '{}'", system_role))?;
            let project = lookup_project_role(&catalog, project_role.as_deref())?;
            let merged = authz::merge_roles(Some(system), project);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&merged)?);
            } else {
                for key in PermissionKey::all() {
                    println!("{key}: {}", merged.is_granted(*key));
                }
                for key in MenuKey::all() {
                    println!("menu {key}: {}", merged.is_menu_visible(*key));
                }
            }
        }

        Command::Roles => {
            let mut system: Vec<_> = catalog.system_roles().collect();
            system.sort_by_key(|(name, _)| *name);
            let mut project: Vec<_> = catalog.project_roles().collect();
            project.sort_by_key(|(name, _)| *name);

            for (name, role) in system {
                println!("system {name} ({})", describe(role));
            }
            for (name, role) in project {
                println!("project {name} ({})", describe(role));
            }
        }
    }

    Ok(())
}

fn parse_permission(s: &str) -> anyhow::Result<PermissionKey> {
    match PermissionKey::try_parse(s) {
        Some(key) => Ok(key),
        None => bail!("Unknown permission key '{}'", s),
    }
}

fn lookup_project_role<'a>(
    catalog: &'a RoleCatalog,
    name: Option<&str>,
) -> anyhow::Result<Option<&'a Role>> {
    match name {
        Some(name) => match catalog.project_role(name) {
            Some(role) => Ok(Some(role)),
            None => bail!("Unknown project role '{}'", name),
        },
        None => Ok(None),
    }
}

fn describe(role: &Role) -> String {
    let granted = PermissionKey::all()
        .iter()
        .filter(|k| role.permissions.granted(**k))
        .count();
    format!("{} of {} permissions", granted, PermissionKey::all().len())
}
