//! Order Data

use std::str::FromStr;

use thiserror::Error;

use crate::{
    domain::{
        orders::records::{OrderStatus, OrderUuid},
        users::records::UserUuid,
    },
    pagination::PageRequest,
};

/// New Order Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub uuid: OrderUuid,
}

/// Order Update Data
///
/// `None` fields are left unchanged, so an assigned delivery crew member can be
/// replaced but never cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub delivery_crew_uuid: Option<UserUuid>,
    pub status: Option<OrderStatus>,
}

/// Which orders a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope {
    All,
    PlacedBy(UserUuid),
    AssignedTo(UserUuid),
}

impl OrderScope {
    #[must_use]
    pub const fn placed_by(self) -> Option<UserUuid> {
        match self {
            Self::PlacedBy(user) => Some(user),
            Self::All | Self::AssignedTo(_) => None,
        }
    }

    #[must_use]
    pub const fn assigned_to(self) -> Option<UserUuid> {
        match self {
            Self::AssignedTo(user) => Some(user),
            Self::All | Self::PlacedBy(_) => None,
        }
    }
}

/// Sort orders accepted by the order listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOrdering {
    CreatedAtAsc,
    CreatedAtDesc,
    TotalAsc,
    TotalDesc,
}

impl OrderOrdering {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAtAsc => "created_at",
            Self::CreatedAtDesc => "-created_at",
            Self::TotalAsc => "total",
            Self::TotalDesc => "-total",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported ordering `{0}`")]
pub struct UnknownOrderOrdering(pub String);

impl FromStr for OrderOrdering {
    type Err = UnknownOrderOrdering;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "created_at" => Ok(Self::CreatedAtAsc),
            "-created_at" => Ok(Self::CreatedAtDesc),
            "total" => Ok(Self::TotalAsc),
            "-total" => Ok(Self::TotalDesc),
            other => Err(UnknownOrderOrdering(other.to_string())),
        }
    }
}

/// Order listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub ordering: Option<OrderOrdering>,
    pub page: PageRequest,
}
