//! Menu items service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::menu_items::{
        data::{MenuItemFilter, MenuItemUpdate, NewMenuItem},
        errors::MenuItemsServiceError,
        records::{MenuItemRecord, MenuItemUuid},
        repository::{MenuItemColumns, PgMenuItemsRepository},
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgMenuItemsService {
    db: Db,
    repository: PgMenuItemsRepository,
}

impl PgMenuItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgMenuItemsRepository::new(),
        }
    }
}

fn non_blank(title: &str) -> Result<&str, MenuItemsServiceError> {
    let title = title.trim();

    if title.is_empty() {
        return Err(MenuItemsServiceError::MissingRequiredData);
    }

    Ok(title)
}

#[async_trait]
impl MenuItemsService for PgMenuItemsService {
    async fn list_menu_items(
        &self,
        filter: MenuItemFilter,
    ) -> Result<Page<MenuItemRecord>, MenuItemsServiceError> {
        let max_price = filter.max_price.map(i64::try_from).transpose()?;

        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_menu_items(&mut tx, &filter, max_price)
            .await?;

        let total = self
            .repository
            .count_menu_items(&mut tx, &filter, max_price)
            .await?;

        tx.commit().await?;

        Ok(Page::new(items, filter.page, total))
    }

    async fn get_menu_item(
        &self,
        uuid: MenuItemUuid,
    ) -> Result<MenuItemRecord, MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.repository.get_menu_item(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, MenuItemsServiceError> {
        let title = non_blank(&item.title)?;
        let price = i64::try_from(item.price)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_menu_item(
                &mut tx,
                item.uuid,
                title,
                price,
                item.featured,
                item.category_uuid,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_menu_item(
        &self,
        uuid: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItemRecord, MenuItemsServiceError> {
        let title = update.title.as_deref().map(non_blank).transpose()?;
        let price = update.price.map(i64::try_from).transpose()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_menu_item(
                &mut tx,
                uuid,
                MenuItemColumns {
                    title,
                    price,
                    featured: update.featured,
                    category_uuid: update.category_uuid,
                },
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_menu_item(&self, uuid: MenuItemUuid) -> Result<(), MenuItemsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_menu_item(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(MenuItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MenuItemsService: Send + Sync {
    /// Retrieve a filtered, ordered page of live menu items.
    async fn list_menu_items(
        &self,
        filter: MenuItemFilter,
    ) -> Result<Page<MenuItemRecord>, MenuItemsServiceError>;

    /// Retrieve a single live menu item.
    async fn get_menu_item(
        &self,
        uuid: MenuItemUuid,
    ) -> Result<MenuItemRecord, MenuItemsServiceError>;

    /// Creates a new menu item with the given details.
    async fn create_menu_item(
        &self,
        item: NewMenuItem,
    ) -> Result<MenuItemRecord, MenuItemsServiceError>;

    /// Apply the given changes to a live menu item.
    async fn update_menu_item(
        &self,
        uuid: MenuItemUuid,
        update: MenuItemUpdate,
    ) -> Result<MenuItemRecord, MenuItemsServiceError>;

    /// Soft-delete a menu item, removing it from every cart.
    async fn delete_menu_item(&self, uuid: MenuItemUuid) -> Result<(), MenuItemsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            categories::records::CategoryUuid,
            menu_items::data::MenuItemOrdering,
        },
        pagination::PageRequest,
        test::{
            TestContext,
            helpers::{add_cart_item, create_category, create_menu_item, create_user},
        },
    };

    use super::*;

    #[tokio::test]
    async fn create_menu_item_returns_created_item() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;
        let uuid = MenuItemUuid::new();

        let item = ctx
            .menu_items
            .create_menu_item(NewMenuItem {
                uuid,
                title: "Greek Salad".to_string(),
                price: 12_50,
                featured: true,
                category_uuid: category.uuid,
            })
            .await?;

        assert_eq!(item.uuid, uuid);
        assert_eq!(item.price, 12_50);
        assert!(item.featured);
        assert_eq!(item.category_uuid, category.uuid);
        assert!(item.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_menu_item_duplicate_title_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;

        create_menu_item(&ctx, category.uuid, "Bruschetta", 7_99).await?;

        let result = create_menu_item(&ctx, category.uuid, "bruschetta", 8_99).await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_menu_item_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = create_menu_item(&ctx, CategoryUuid::new(), "Lemon Cake", 5_00).await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_menu_item_price_beyond_bigint_returns_invalid_price() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;

        let result = create_menu_item(&ctx, category.uuid, "Gold Leaf", u64::MAX).await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::InvalidPrice(_))),
            "expected InvalidPrice, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_menu_item_changes_only_given_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;
        let item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        let updated = ctx
            .menu_items
            .update_menu_item(
                item.uuid,
                MenuItemUpdate {
                    price: Some(11_00),
                    featured: Some(true),
                    ..MenuItemUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.title, "Pasta");
        assert_eq!(updated.price, 11_00);
        assert!(updated.featured);

        Ok(())
    }

    #[tokio::test]
    async fn update_menu_item_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .menu_items
            .update_menu_item(MenuItemUuid::new(), MenuItemUpdate::default())
            .await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_menu_item_hides_it_and_empties_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;
        let item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;
        let customer = create_user(&ctx, "customer", &[]).await?;

        add_cart_item(&ctx, customer.uuid, item.uuid, 2).await?;

        ctx.menu_items.delete_menu_item(item.uuid).await?;

        let result = ctx.menu_items.get_menu_item(item.uuid).await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let cart = ctx.carts.get_cart(customer.uuid).await?;

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_title_can_be_reused() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;
        let item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        ctx.menu_items.delete_menu_item(item.uuid).await?;

        let replacement = create_menu_item(&ctx, category.uuid, "Pasta", 12_00).await?;

        assert_ne!(replacement.uuid, item.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn delete_menu_item_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;
        let item = create_menu_item(&ctx, category.uuid, "Pasta", 10_00).await?;

        ctx.menu_items.delete_menu_item(item.uuid).await?;

        let result = ctx.menu_items.delete_menu_item(item.uuid).await;

        assert!(
            matches!(result, Err(MenuItemsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_menu_items_filters_and_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let mains = create_category(&ctx, "Mains").await?;
        let desserts = create_category(&ctx, "Desserts").await?;

        create_menu_item(&ctx, mains.uuid, "Moussaka", 15_00).await?;
        create_menu_item(&ctx, mains.uuid, "Greek Salad", 9_00).await?;
        create_menu_item(&ctx, mains.uuid, "Lamb Souvlaki", 18_00).await?;
        create_menu_item(&ctx, desserts.uuid, "Lemon Dessert", 6_00).await?;

        let page = ctx
            .menu_items
            .list_menu_items(MenuItemFilter {
                category: Some("mains".to_string()),
                max_price: Some(16_00),
                ordering: Some(MenuItemOrdering::PriceDesc),
                ..MenuItemFilter::default()
            })
            .await?;

        let titles: Vec<_> = page.items.iter().map(|item| item.title.as_str()).collect();

        assert_eq!(titles, vec!["Moussaka", "Greek Salad"]);
        assert_eq!(page.total, 2);

        Ok(())
    }

    #[tokio::test]
    async fn list_menu_items_search_is_case_insensitive() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;

        create_menu_item(&ctx, category.uuid, "Lemon Dessert", 6_00).await?;
        create_menu_item(&ctx, category.uuid, "Bruschetta", 7_00).await?;

        let page = ctx
            .menu_items
            .list_menu_items(MenuItemFilter {
                search: Some("LEMON".to_string()),
                ..MenuItemFilter::default()
            })
            .await?;

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Lemon Dessert");

        Ok(())
    }

    #[tokio::test]
    async fn list_menu_items_paginates_with_total() -> TestResult {
        let ctx = TestContext::new().await;
        let category = create_category(&ctx, "Mains").await?;

        for (title, price) in [("A", 1_00), ("B", 2_00), ("C", 3_00)] {
            create_menu_item(&ctx, category.uuid, title, price).await?;
        }

        let page = ctx
            .menu_items
            .list_menu_items(MenuItemFilter {
                ordering: Some(MenuItemOrdering::TitleAsc),
                page: PageRequest::new(Some(2), Some(2)),
                ..MenuItemFilter::default()
            })
            .await?;

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "C");

        Ok(())
    }
}
