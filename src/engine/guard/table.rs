//! Route Table
//!
//! Versioned declaration of protected routes and actions, stored as
//! `access/routes.json` in the project directory

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::engine::rbac::{AccessPolicy, Position, Role};

/// Current route table schema version
pub const ROUTES_VERSION: u32 = 1;

pub const DEFAULT_LANDING_PAGE: &str = "/dashboard";

#[derive(Error, Debug)]
pub enum RouteTableError {
    #[error("Failed to read route table: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid route table format: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Route table version {found} is newer than supported {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),
}

/// A protected route or action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Exact path, or a `prefix/*` pattern covering everything below prefix
    pub path: String,
    #[serde(flatten)]
    pub policy: AccessPolicy,
    /// Mutating action; read-only subjects are turned away
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub write: bool,
}

impl RouteRule {
    pub fn new(path: &str, policy: AccessPolicy) -> Self {
        Self {
            path: path.to_string(),
            policy,
            write: false,
        }
    }

    pub fn writing(mut self) -> Self {
        self.write = true;
        self
    }

    /// Match length for `path`, longer is more specific
    fn specificity(&self, path: &str) -> Option<usize> {
        match self.path.strip_suffix("/*") {
            Some(prefix) => {
                let below = path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
                below.then_some(prefix.len())
            }
            // Exact matches outrank any wildcard over the same prefix
            None => (self.path == path).then_some(self.path.len() + 1),
        }
    }

    fn validate(&self) -> Result<(), RouteTableError> {
        let pattern = self.path.strip_suffix("/*").unwrap_or(&self.path);
        if !self.path.starts_with('/') || pattern.contains('*') {
            return Err(RouteTableError::InvalidPattern(self.path.clone()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    pub version: u32,
    #[serde(default = "default_landing_page")]
    pub landing_page: String,
    #[serde(default)]
    pub routes: Vec<RouteRule>,
}

fn default_landing_page() -> String {
    DEFAULT_LANDING_PAGE.to_string()
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            version: ROUTES_VERSION,
            landing_page: default_landing_page(),
            routes: Vec::new(),
        }
    }
}

impl RouteTable {
    /// Routes of the activity tracker
    pub fn default_table() -> Self {
        use Position::*;

        let field_crew = [Mekanik, GroupLeaderMekanik, Planner];
        let leads = [GroupLeaderMekanik, Planner];
        let admins = [Role::Admin, Role::Superadmin];

        let routes = vec![
            RouteRule::new(
                "/activities/*",
                AccessPolicy::default().with_roles(admins).with_positions(field_crew),
            ),
            RouteRule::new(
                "/activities/new",
                AccessPolicy::default().with_roles(admins).with_positions(field_crew),
            )
            .writing(),
            RouteRule::new(
                "/activities/approve",
                AccessPolicy::default().with_roles(admins).with_positions(leads),
            )
            .writing(),
            RouteRule::new(
                "/reports/*",
                AccessPolicy::default().with_roles([Role::Superadmin]).with_positions(leads),
            ),
            RouteRule::new(
                "/master-data/*",
                AccessPolicy::default().with_roles(admins),
            )
            .writing(),
            RouteRule::new("/users/*", AccessPolicy::default().with_roles([Role::Superadmin]))
                .writing(),
        ];

        Self {
            routes,
            ..Self::default()
        }
    }

    /// Load the table, falling back to the built-in routes when absent
    pub fn load(path: &Path) -> Result<Self, RouteTableError> {
        if !path.exists() {
            info!(path = %path.display(), "route table not found, using defaults");
            return Ok(Self::default_table());
        }

        let content = fs::read_to_string(path)?;
        let table: RouteTable = serde_json::from_str(&content)?;

        if table.version > ROUTES_VERSION {
            return Err(RouteTableError::UnsupportedVersion {
                found: table.version,
                supported: ROUTES_VERSION,
            });
        }

        table.validate()?;
        info!(path = %path.display(), routes = table.routes.len(), "route table loaded");
        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<(), RouteTableError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), RouteTableError> {
        let mut seen = HashSet::new();
        for rule in &self.routes {
            rule.validate()?;
            if !seen.insert(rule.path.as_str()) {
                return Err(RouteTableError::DuplicateRoute(rule.path.clone()));
            }
        }
        Ok(())
    }

    /// Most specific rule covering `path`
    pub fn lookup(&self, path: &str) -> Option<&RouteRule> {
        let path = normalize(path);
        self.routes
            .iter()
            .filter_map(|rule| rule.specificity(path).map(|score| (score, rule)))
            .max_by_key(|(score, _)| *score)
            .map(|(_, rule)| rule)
    }
}

/// Drop query, fragment and trailing slash
fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}
