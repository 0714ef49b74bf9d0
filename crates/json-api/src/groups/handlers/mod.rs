//! Group Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
