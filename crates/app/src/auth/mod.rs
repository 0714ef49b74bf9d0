//! Authentication

mod errors;
mod models;
pub mod openbao;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use openbao::{OpenBaoClient, OpenBaoConfig, OpenBaoError};
pub use service::*;
pub use token::*;
