//! Position Equivalence
//!
//! Static one-hop mapping that lets a position borrow the access of a
//! reference position or role

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::model::{ParseAccessError, Position, Role};

/// A position- or role-shaped access token.
///
/// This is what a position resolves to and what allow-lists hold, so a
/// role-shaped equivalent can meet a position allow-list and the other way
/// round. Serialized as the bare wire name; the two name sets are disjoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Equivalent {
    Position(Position),
    Role(Role),
}

impl fmt::Display for Equivalent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equivalent::Position(p) => p.fmt(f),
            Equivalent::Role(r) => r.fmt(f),
        }
    }
}

impl FromStr for Equivalent {
    type Err = ParseAccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(p) = s.parse::<Position>() {
            return Ok(Equivalent::Position(p));
        }
        s.parse::<Role>()
            .map(Equivalent::Role)
            .map_err(|_| ParseAccessError::UnknownToken(s.to_string()))
    }
}

impl TryFrom<String> for Equivalent {
    type Error = ParseAccessError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Equivalent> for String {
    fn from(e: Equivalent) -> Self {
        e.to_string()
    }
}

impl From<Position> for Equivalent {
    fn from(p: Position) -> Self {
        Equivalent::Position(p)
    }
}

impl From<Role> for Equivalent {
    fn from(r: Role) -> Self {
        Equivalent::Role(r)
    }
}

/// Resolve a position to its equivalent (identity when unmapped)
pub fn resolve_equivalent(position: Position) -> Equivalent {
    match position {
        Position::Electrician | Position::Welder | Position::Tyreman => {
            Equivalent::Position(Position::Mekanik)
        }
        Position::GroupLeaderTyre => Equivalent::Position(Position::GroupLeaderMekanik),
        Position::Supervisor => Equivalent::Position(Position::Planner),
        Position::DeptHead | Position::Management => Equivalent::Role(Role::Superadmin),
        Position::Mekanik
        | Position::GroupLeaderMekanik
        | Position::Planner => Equivalent::Position(position),
    }
}

/// The identities a position may be checked against: itself, plus its
/// equivalent when that differs
pub fn equivalence_closure(position: Position) -> BTreeSet<Equivalent> {
    let mut closure = BTreeSet::from([Equivalent::Position(position)]);
    closure.insert(resolve_equivalent(position));
    closure
}

/// Non-identity rows of the mapping, in declaration order
pub fn equivalence_table() -> Vec<(Position, Equivalent)> {
    Position::ALL
        .into_iter()
        .map(|p| (p, resolve_equivalent(p)))
        .filter(|(p, eq)| *eq != Equivalent::Position(*p))
        .collect()
}

/// Every position whose closure contains `target`
pub fn positions_equivalent_to(target: Equivalent) -> Vec<Position> {
    Position::ALL
        .into_iter()
        .filter(|p| equivalence_closure(*p).contains(&target))
        .collect()
}
