//! RBAC Module
//!
//! Role and position based access resolution with static position equivalence

pub mod model;
pub mod equivalence;
pub mod policy;
pub mod enforcer;

pub use model::{ParseAccessError, Position, Role, Subject};
pub use equivalence::{equivalence_closure, equivalence_table, positions_equivalent_to, resolve_equivalent, Equivalent};
pub use policy::AccessPolicy;
pub use enforcer::{can_write, evaluate, has_access, has_access_raw, is_read_only, Admission};
