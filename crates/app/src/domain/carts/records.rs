//! Cart Records

use jiff::Timestamp;

use crate::{
    domain::{menu_items::records::MenuItemUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// A user's cart. Every user has exactly one, possibly empty.
#[derive(Debug, Clone)]
pub struct CartRecord {
    pub user_uuid: UserUuid,
    pub items: Vec<CartItemRecord>,
    pub total: u64,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItemRecord>;

/// Cart Item Record
#[derive(Debug, Clone)]
pub struct CartItemRecord {
    pub uuid: CartItemUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub quantity: u32,

    /// Menu price captured when the line was added.
    pub unit_price: u64,

    /// `unit_price * quantity`
    pub price: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Sum of line prices, or `None` on overflow.
#[must_use]
pub fn checked_total(items: &[CartItemRecord]) -> Option<u64> {
    items
        .iter()
        .try_fold(0_u64, |total, item| total.checked_add(item.price))
}
