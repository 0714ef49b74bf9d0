//! Carts service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            records::{CartItemRecord, CartRecord, checked_total},
            repositories::PgCartItemsRepository,
        },
        menu_items::records::MenuItemUuid,
        users::records::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items_repository: PgCartItemsRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.items_repository.get_cart_items(&mut tx, user).await?;

        tx.commit().await?;

        let total = checked_total(&items).ok_or(CartsServiceError::InvalidData)?;

        Ok(CartRecord {
            user_uuid: user,
            items,
            total,
        })
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            user_uuid = %user,
            menu_item_uuid = %item.menu_item_uuid,
            quantity = item.quantity
        ),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError> {
        if item.quantity == 0 || i32::try_from(item.quantity).is_err() {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let item = self
            .items_repository
            .create_cart_item(&mut tx, user, &item)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        menu_item: MenuItemUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .items_repository
            .delete_cart_item(&mut tx, user, menu_item)
            .await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let removed = self.items_repository.clear_cart(&mut tx, user).await?;

        tx.commit().await?;

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with its total.
    async fn get_cart(&self, user: UserUuid) -> Result<CartRecord, CartsServiceError>;

    /// Add a menu item to the user's cart at its current price.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemRecord, CartsServiceError>;

    /// Remove the line for the given menu item.
    async fn remove_item(
        &self,
        user: UserUuid,
        menu_item: MenuItemUuid,
    ) -> Result<(), CartsServiceError>;

    /// Remove every line, returning how many were removed.
    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::records::CartItemUuid,
            menu_items::{MenuItemsService, data::MenuItemUpdate},
        },
        test::{
            TestContext,
            helpers::{add_cart_item, create_category, create_menu_item, create_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn get_cart_for_new_user_is_empty() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.user_uuid, user.uuid);
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_captures_unit_price_and_line_price() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let menu_item = create_menu_item(&ctx, category.uuid, "Pasta", 10_50).await?;
        let uuid = CartItemUuid::new();

        let item = ctx
            .carts
            .add_item(
                user.uuid,
                NewCartItem {
                    uuid,
                    menu_item_uuid: menu_item.uuid,
                    quantity: 3,
                },
            )
            .await?;

        assert_eq!(item.uuid, uuid);
        assert_eq!(item.menu_item_uuid, menu_item.uuid);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.unit_price, 10_50);
        assert_eq!(item.price, 31_50);

        Ok(())
    }

    #[tokio::test]
    async fn cart_total_sums_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let pasta = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;
        let salad = create_menu_item(&ctx, category.uuid, "Salad", 4_25).await?;

        add_cart_item(&ctx, user.uuid, pasta.uuid, 2).await?;
        add_cart_item(&ctx, user.uuid, salad.uuid, 1).await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.total, 24_25);

        Ok(())
    }

    #[tokio::test]
    async fn later_price_changes_do_not_affect_cart_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let pasta = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        add_cart_item(&ctx, user.uuid, pasta.uuid, 1).await?;

        ctx.menu_items
            .update_menu_item(
                pasta.uuid,
                MenuItemUpdate {
                    price: Some(99_00),
                    ..MenuItemUpdate::default()
                },
            )
            .await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.total, 10_00);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_zero_quantity_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let menu_item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        let result = add_cart_item(&ctx, user.uuid, menu_item.uuid, 0).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_quantity_beyond_integer_column_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let menu_item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        let result = add_cart_item(&ctx, user.uuid, menu_item.uuid, u32::MAX).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_line_price_overflow_returns_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let menu_item = create_menu_item(&ctx, category.uuid, "Caviar", 5_000_000_000).await?;

        let result = add_cart_item(&ctx, user.uuid, menu_item.uuid, 2_000_000_000).await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert!(cart.items.is_empty(), "nothing should be stored");

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_menu_item_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;

        let result = add_cart_item(&ctx, user.uuid, MenuItemUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_twice_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let menu_item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        add_cart_item(&ctx, user.uuid, menu_item.uuid, 1).await?;

        let result = add_cart_item(&ctx, user.uuid, menu_item.uuid, 2).await;

        assert!(
            matches!(result, Err(CartsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn carts_are_per_user() -> TestResult {
        let ctx = TestContext::new().await;
        let alice = create_user(&ctx, "alice", &[]).await?;
        let bob = create_user(&ctx, "bob", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let menu_item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        add_cart_item(&ctx, alice.uuid, menu_item.uuid, 1).await?;
        add_cart_item(&ctx, bob.uuid, menu_item.uuid, 1).await?;

        ctx.carts.clear_cart(alice.uuid).await?;

        assert!(ctx.carts.get_cart(alice.uuid).await?.items.is_empty());
        assert_eq!(ctx.carts.get_cart(bob.uuid).await?.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_single_line() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let pasta = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;
        let salad = create_menu_item(&ctx, category.uuid, "Salad", 5_00).await?;

        add_cart_item(&ctx, user.uuid, pasta.uuid, 1).await?;
        add_cart_item(&ctx, user.uuid, salad.uuid, 1).await?;

        ctx.carts.remove_item(user.uuid, pasta.uuid).await?;

        let cart = ctx.carts.get_cart(user.uuid).await?;

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].menu_item_uuid, salad.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_not_in_cart_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;

        let result = ctx.carts.remove_item(user.uuid, MenuItemUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn clear_cart_reports_removed_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "customer", &[]).await?;
        let category = create_category(&ctx, "Mains").await?;
        let pasta = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        add_cart_item(&ctx, user.uuid, pasta.uuid, 1).await?;

        assert_eq!(ctx.carts.clear_cart(user.uuid).await?, 1);
        assert_eq!(ctx.carts.clear_cart(user.uuid).await?, 0);

        Ok(())
    }
}
