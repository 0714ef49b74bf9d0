//! Test Helpers

use crate::{
    domain::{
        carts::{
            CartsService, CartsServiceError,
            data::NewCartItem,
            records::{CartItemRecord, CartItemUuid},
        },
        categories::{
            CategoriesService, CategoriesServiceError,
            data::NewCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        menu_items::{
            MenuItemsService, MenuItemsServiceError,
            data::NewMenuItem,
            records::{MenuItemRecord, MenuItemUuid},
        },
        orders::{
            OrdersService, OrdersServiceError,
            data::NewOrder,
            records::{OrderRecord, OrderUuid},
        },
        users::{
            UsersService, UsersServiceError,
            data::NewUser,
            records::{Role, UserRecord, UserUuid},
        },
    },
    test::TestContext,
};

pub(crate) async fn create_user(
    ctx: &TestContext,
    username: &str,
    roles: &[Role],
) -> Result<UserRecord, UsersServiceError> {
    ctx.users
        .create_user(NewUser {
            uuid: UserUuid::new(),
            username: username.to_string(),
            email: format!("{username}@littlelemon.test"),
            roles: roles.iter().copied().collect(),
        })
        .await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    title: &str,
) -> Result<CategoryRecord, CategoriesServiceError> {
    ctx.categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            title: title.to_string(),
            slug: None,
        })
        .await
}

pub(crate) async fn create_menu_item(
    ctx: &TestContext,
    category: CategoryUuid,
    title: &str,
    price: u64,
) -> Result<MenuItemRecord, MenuItemsServiceError> {
    ctx.menu_items
        .create_menu_item(NewMenuItem {
            uuid: MenuItemUuid::new(),
            title: title.to_string(),
            price,
            featured: false,
            category_uuid: category,
        })
        .await
}

pub(crate) async fn add_cart_item(
    ctx: &TestContext,
    user: UserUuid,
    menu_item: MenuItemUuid,
    quantity: u32,
) -> Result<CartItemRecord, CartsServiceError> {
    ctx.carts
        .add_item(
            user,
            NewCartItem {
                uuid: CartItemUuid::new(),
                menu_item_uuid: menu_item,
                quantity,
            },
        )
        .await
}

pub(crate) async fn place_order(
    ctx: &TestContext,
    user: UserUuid,
) -> Result<OrderRecord, OrdersServiceError> {
    ctx.orders
        .place_order(
            user,
            NewOrder {
                uuid: OrderUuid::new(),
            },
        )
        .await
}
