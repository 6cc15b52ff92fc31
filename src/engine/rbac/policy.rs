//! Access Policy
//!
//! Per route/action allow-lists on the role and position axes

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::equivalence::Equivalent;
use super::model::{Position, Role};

/// Allow-lists for a protected route or action.
///
/// `None` on an axis means no restriction was declared on it. `Some` of an
/// empty set is a restriction nothing can satisfy. Either list may hold
/// role- or position-shaped tokens; equivalents are matched against both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<BTreeSet<Equivalent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_positions: Option<BTreeSet<Equivalent>>,
}

impl AccessPolicy {
    /// A policy with no restriction on either axis
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn with_roles<I: IntoIterator<Item = Role>>(mut self, roles: I) -> Self {
        self.allowed_roles = Some(roles.into_iter().map(Equivalent::Role).collect());
        self
    }

    pub fn with_positions<I: IntoIterator<Item = Position>>(mut self, positions: I) -> Self {
        self.allowed_positions = Some(positions.into_iter().map(Equivalent::Position).collect());
        self
    }

    /// Build from raw allow-list strings. Unknown entries are dropped, but a
    /// declared list stays declared even when nothing in it parsed.
    pub fn from_raw(allowed_roles: Option<&[&str]>, allowed_positions: Option<&[&str]>) -> Self {
        Self {
            allowed_roles: allowed_roles.map(parse_tokens),
            allowed_positions: allowed_positions.map(parse_tokens),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed_roles.is_none() && self.allowed_positions.is_none()
    }
}

fn parse_tokens(raw: &[&str]) -> BTreeSet<Equivalent> {
    raw.iter().filter_map(|t| t.parse().ok()).collect()
}
