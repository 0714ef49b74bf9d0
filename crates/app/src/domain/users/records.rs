//! User Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use smallvec::SmallVec;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Roles held by a single user.
pub type Roles = SmallVec<[Role; 2]>;

/// Staff groups. A user in neither group is a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Manager,
    DeliveryCrew,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Manager, Role::DeliveryCrew];

    /// Name stored in `user_groups.group_name`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::DeliveryCrew => "delivery_crew",
        }
    }

    /// Path segment used by the group management routes.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::DeliveryCrew => "delivery-crew",
        }
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.slug() == slug)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Manager => f.write_str("Manager"),
            Self::DeliveryCrew => f.write_str("Delivery Crew"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| UnknownRole(value.to_string()))
    }
}

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub roles: Roles,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    #[must_use]
    pub fn is_customer(&self) -> bool {
        self.roles.is_empty()
    }
}
