//! Route Guard
//!
//! Admits a subject to a route or sends it back to the landing page

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::table::RouteTable;
use crate::engine::rbac::{can_write, evaluate, Subject};

/// Result of guarding a route. A redirect never says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    Admit,
    Redirect { to: String },
}

impl GuardOutcome {
    pub fn is_admitted(&self) -> bool {
        matches!(self, GuardOutcome::Admit)
    }
}

pub struct RouteGuard {
    table: RouteTable,
}

impl RouteGuard {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn check(&self, path: &str, subject: &Subject) -> GuardOutcome {
        let Some(rule) = self.table.lookup(path) else {
            debug!(path, "no route rule, admitting");
            return GuardOutcome::Admit;
        };

        let admitted = evaluate(subject, &rule.policy).is_some() && (!rule.write || can_write(subject));
        debug!(path, rule = %rule.path, subject = %subject, admitted, "route guarded");

        if admitted {
            GuardOutcome::Admit
        } else {
            GuardOutcome::Redirect {
                to: self.table.landing_page.clone(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rbac::{Position, Role};

    fn guard() -> RouteGuard {
        RouteGuard::new(RouteTable::default_table())
    }

    fn redirect() -> GuardOutcome {
        GuardOutcome::Redirect {
            to: "/dashboard".to_string(),
        }
    }

    #[test]
    fn test_unlisted_routes_are_open() {
        assert_eq!(guard().check("/dashboard", &Subject::default()), GuardOutcome::Admit);
        assert_eq!(guard().check("/profile", &Subject::from_raw("", "")), GuardOutcome::Admit);
    }

    #[test]
    fn test_equivalent_positions_reach_activities() {
        let welder = Subject::new(Role::Users, Position::Welder);
        assert!(guard().check("/activities/17", &welder).is_admitted());
        assert!(guard().check("/activities/new", &welder).is_admitted());
        assert_eq!(guard().check("/activities/approve", &welder), redirect());

        let tyre_lead = Subject::new(Role::Users, Position::GroupLeaderTyre);
        assert!(guard().check("/activities/approve", &tyre_lead).is_admitted());
    }

    #[test]
    fn test_read_only_management_views_but_cannot_write() {
        let manager = Subject::new(Role::Users, Position::Management);
        assert!(guard().check("/reports/monthly", &manager).is_admitted());
        assert!(guard().check("/activities/17", &manager).is_admitted());
        assert_eq!(guard().check("/activities/new", &manager), redirect());
        assert_eq!(guard().check("/users/3", &manager), redirect());

        let elevated = Subject::new(Role::Admin, Position::Management);
        assert!(guard().check("/activities/new", &elevated).is_admitted());
    }

    #[test]
    fn test_custom_landing_page() {
        let mut table = RouteTable::default_table();
        table.landing_page = "/home".to_string();
        let outcome = RouteGuard::new(table).check("/users", &Subject::default());
        assert_eq!(outcome, GuardOutcome::Redirect { to: "/home".to_string() });
    }
}
