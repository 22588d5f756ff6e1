//! Services used by the route handlers.

pub mod rate_limit;
pub mod vision;
