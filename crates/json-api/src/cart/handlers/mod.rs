//! Cart Handlers

pub(crate) mod clear;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use lemon_app::domain::carts::records::CartItemRecord;

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart line
    pub uuid: Uuid,

    /// The menu item in this line; also used to remove it
    pub menu_item_uuid: Uuid,

    pub quantity: u32,

    /// Price per unit in cents when the item was added
    pub unit_price: u64,

    /// `unit_price * quantity` in cents
    pub price: u64,

    /// The date and time the item was added to the cart
    pub created_at: String,
}

impl From<CartItemRecord> for CartItemResponse {
    fn from(item: CartItemRecord) -> Self {
        Self {
            uuid: item.uuid.into(),
            menu_item_uuid: item.menu_item_uuid.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            price: item.price,
            created_at: item.created_at.to_string(),
        }
    }
}
