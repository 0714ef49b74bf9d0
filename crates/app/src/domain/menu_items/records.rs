//! Menu Item Records

use jiff::Timestamp;

use crate::{domain::categories::records::CategoryUuid, uuids::TypedUuid};

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItemRecord>;

/// Menu Item Record
#[derive(Debug, Clone)]
pub struct MenuItemRecord {
    pub uuid: MenuItemUuid,
    pub title: String,

    /// Price in minor units.
    pub price: u64,
    pub featured: bool,
    pub category_uuid: CategoryUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
