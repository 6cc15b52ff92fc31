//! Route Guard Module
//!
//! Declarative route table and the guard that evaluates it

pub mod table;
pub mod route_guard;

pub use table::{RouteRule, RouteTable, RouteTableError, DEFAULT_LANDING_PAGE, ROUTES_VERSION};
pub use route_guard::{GuardOutcome, RouteGuard};
