//! Cart Data

use crate::domain::{carts::records::CartItemUuid, menu_items::records::MenuItemUuid};

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub uuid: CartItemUuid,
    pub menu_item_uuid: MenuItemUuid,
    pub quantity: u32,
}
