//! Little Lemon domain services, persistence and API token authentication.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod pagination;

#[cfg(test)]
mod test;

mod uuids;
