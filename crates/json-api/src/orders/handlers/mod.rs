//! Order Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lemon_app::domain::orders::records::{OrderItemRecord, OrderRecord};

/// Order Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub uuid: Uuid,

    pub menu_item_uuid: Uuid,

    pub quantity: u32,

    /// Price per unit in cents at the time the order was placed
    pub unit_price: u64,

    pub price: u64,
}

impl From<OrderItemRecord> for OrderItemResponse {
    fn from(item: OrderItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            menu_item_uuid: item.menu_item_uuid.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            price: item.price,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    /// The unique identifier of the order
    pub uuid: Uuid,

    /// The customer who placed the order
    pub user_uuid: Uuid,

    /// The delivery crew member assigned to the order, if any
    pub delivery_crew_uuid: Option<Uuid>,

    /// `pending` or `delivered`
    pub status: String,

    /// Order total in cents
    pub total: u64,

    pub items: Vec<OrderItemResponse>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.into(),
            delivery_crew_uuid: order.delivery_crew_uuid.map(Into::into),
            status: order.status.to_string(),
            total: order.total,
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}
