//! Access Model
//!
//! Account roles, job positions and the subject a session hands to the resolver

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAccessError {
    #[error("Unknown role: {0:?}")]
    UnknownRole(String),
    #[error("Unknown position: {0:?}")]
    UnknownPosition(String),
    #[error("Unknown role or position: {0:?}")]
    UnknownToken(String),
}

/// Account privilege tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Users,
    Superadmin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Users, Role::Superadmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Users => "USERS",
            Role::Superadmin => "SUPERADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseAccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ParseAccessError::UnknownRole(s.to_string()))
    }
}

/// Job function, independent of the account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Mekanik,
    Electrician,
    Welder,
    Tyreman,
    GroupLeaderMekanik,
    GroupLeaderTyre,
    Supervisor,
    DeptHead,
    Management,
    Planner,
}

impl Position {
    pub const ALL: [Position; 10] = [
        Position::Mekanik,
        Position::Electrician,
        Position::Welder,
        Position::Tyreman,
        Position::GroupLeaderMekanik,
        Position::GroupLeaderTyre,
        Position::Supervisor,
        Position::DeptHead,
        Position::Management,
        Position::Planner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Mekanik => "MEKANIK",
            Position::Electrician => "ELECTRICIAN",
            Position::Welder => "WELDER",
            Position::Tyreman => "TYREMAN",
            Position::GroupLeaderMekanik => "GROUP_LEADER_MEKANIK",
            Position::GroupLeaderTyre => "GROUP_LEADER_TYRE",
            Position::Supervisor => "SUPERVISOR",
            Position::DeptHead => "DEPT_HEAD",
            Position::Management => "MANAGEMENT",
            Position::Planner => "PLANNER",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ParseAccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseAccessError::UnknownPosition(s.to_string()))
    }
}

/// The `(role, posisi)` pair supplied by the session.
///
/// Values outside the known enumerations are kept as `None` and never
/// satisfy an allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Subject {
    pub role: Option<Role>,
    pub position: Option<Position>,
}

impl Subject {
    pub fn new(role: Role, position: Position) -> Self {
        Self {
            role: Some(role),
            position: Some(position),
        }
    }

    /// Build a subject from raw session strings
    pub fn from_raw(role: &str, posisi: &str) -> Self {
        let role = match role.parse::<Role>() {
            Ok(r) => Some(r),
            Err(e) => {
                warn!(error = %e, "unrecognised role in session");
                None
            }
        };
        let position = match posisi.parse::<Position>() {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(error = %e, "unrecognised position in session");
                None
            }
        };
        Self { role, position }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = self.role.map(|r| r.as_str()).unwrap_or("?");
        let position = self.position.map(|p| p.as_str()).unwrap_or("?");
        write!(f, "{}/{}", role, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_wire_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        for position in Position::ALL {
            assert_eq!(position.to_string().parse::<Position>().unwrap(), position);
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(
            "admin".parse::<Role>(),
            Err(ParseAccessError::UnknownRole("admin".to_string()))
        );
        assert!("Mekanik".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Position::GroupLeaderTyre).unwrap();
        assert_eq!(json, "\"GROUP_LEADER_TYRE\"");

        let role: Role = serde_json::from_str("\"SUPERADMIN\"").unwrap();
        assert_eq!(role, Role::Superadmin);
    }

    #[test]
    fn test_subject_from_raw_keeps_unknowns_empty() {
        let subject = Subject::from_raw("USERS", "JANITOR");
        assert_eq!(subject.role, Some(Role::Users));
        assert_eq!(subject.position, None);

        let empty = Subject::from_raw("", "");
        assert_eq!(empty, Subject::default());
        assert_eq!(empty.to_string(), "?/?");
    }
}
