//! MechTrack - Access resolution for mechanics activity tracking
//!
//! Decides whether a user, identified by an account role and a job
//! position (`posisi`), may open a protected page or run a restricted
//! action. This is a client-side convenience gate; any server that accepts
//! the same operations has to enforce equivalent checks itself.

pub mod engine;

use engine::config::{Config, ConfigError};
use engine::guard::{RouteGuard, RouteTable, RouteTableError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Routes(#[from] RouteTableError),
}

/// Build the route guard for a project directory.
///
/// Missing config or route table fall back to the built-in defaults; a
/// landing page set in the config overrides the table's.
pub fn load_guard(project_dir: &Path) -> Result<RouteGuard, SetupError> {
    let config = Config::load_or_default(project_dir)?;
    let mut table = RouteTable::load(&config.routes_path(project_dir))?;
    if let Some(landing_page) = &config.guard.landing_page {
        table.landing_page = landing_page.clone();
    }
    Ok(RouteGuard::new(table))
}
