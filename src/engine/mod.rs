// MechTrack Engine - Core module structure
pub mod rbac;
pub mod guard;
pub mod config;
pub mod cli;

pub use config::Config;
pub use guard::{GuardOutcome, RouteGuard, RouteTable};
pub use rbac::{has_access, is_read_only, can_write, AccessPolicy, Position, Role, Subject};
