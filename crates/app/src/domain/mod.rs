//! Little Lemon Domain Concerns

pub mod carts;
pub mod categories;
pub mod menu_items;
pub mod orders;
pub mod users;
