//! RBAC Enforcement Layer
//!
//! Admission decisions and the read-only designation

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

use super::equivalence::{equivalence_closure, resolve_equivalent, Equivalent};
use super::model::{Position, Role, Subject};
use super::policy::AccessPolicy;

/// Which check admitted a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// Neither axis is restricted
    Unrestricted,
    /// The subject's own role is allowed
    RoleMatch,
    /// The position or its equivalent is an allowed position
    PositionEquivalence,
    /// The position resolves to an allowed role
    PositionAsRole,
    /// The position resolves to a different, allowed position
    PositionResolved,
}

impl fmt::Display for Admission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Admission::Unrestricted => "unrestricted",
            Admission::RoleMatch => "role match",
            Admission::PositionEquivalence => "position equivalence",
            Admission::PositionAsRole => "position resolves to role",
            Admission::PositionResolved => "position resolves to position",
        };
        f.write_str(s)
    }
}

/// Run the admission checks in order and report the first that succeeds.
/// `None` is a denial; denials carry no reason.
pub fn evaluate(subject: &Subject, policy: &AccessPolicy) -> Option<Admission> {
    let admission = admission_for(subject, policy);
    debug!(subject = %subject, ?admission, "access evaluated");
    admission
}

fn admission_for(subject: &Subject, policy: &AccessPolicy) -> Option<Admission> {
    if policy.is_unrestricted() {
        return Some(Admission::Unrestricted);
    }

    if let (Some(allowed), Some(role)) = (&policy.allowed_roles, subject.role) {
        if allowed.contains(&Equivalent::Role(role)) {
            return Some(Admission::RoleMatch);
        }
    }

    let position = subject.position?;

    if let Some(allowed) = &policy.allowed_positions {
        if closure_allowed(position, allowed) {
            return Some(Admission::PositionEquivalence);
        }
    }

    if let Some(allowed) = &policy.allowed_roles {
        if resolves_into(position, allowed) {
            return Some(Admission::PositionAsRole);
        }
    }

    // Already covered by the closure check; kept as its own path.
    if let Some(allowed) = &policy.allowed_positions {
        if resolves_into(position, allowed) {
            return Some(Admission::PositionResolved);
        }
    }

    None
}

/// Any member of the closure, role-shaped ones included, is allowed
fn closure_allowed(position: Position, allowed: &BTreeSet<Equivalent>) -> bool {
    equivalence_closure(position)
        .iter()
        .any(|token| allowed.contains(token))
}

/// The position maps to something other than itself, and that is allowed
fn resolves_into(position: Position, allowed: &BTreeSet<Equivalent>) -> bool {
    let equivalent = resolve_equivalent(position);
    equivalent != Equivalent::Position(position) && allowed.contains(&equivalent)
}

pub fn has_access(subject: &Subject, policy: &AccessPolicy) -> bool {
    evaluate(subject, policy).is_some()
}

/// String-level entry point for callers holding raw session values
pub fn has_access_raw(
    role: &str,
    posisi: &str,
    allowed_roles: Option<&[&str]>,
    allowed_positions: Option<&[&str]>,
) -> bool {
    let policy = AccessPolicy::from_raw(allowed_roles, allowed_positions);
    if policy.is_unrestricted() {
        return true;
    }
    has_access(&Subject::from_raw(role, posisi), &policy)
}

/// Privileged job functions on a plain account may view but not mutate
pub fn is_read_only(subject: &Subject) -> bool {
    matches!(subject.position, Some(Position::DeptHead | Position::Management))
        && subject.role == Some(Role::Users)
}

pub fn can_write(subject: &Subject) -> bool {
    !is_read_only(subject)
}
