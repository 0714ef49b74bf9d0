//! Authentication and role checks

pub(crate) mod middleware;
pub(crate) mod permissions;
