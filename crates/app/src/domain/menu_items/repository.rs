//! Menu Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;

use crate::{
    database::try_get_amount,
    domain::{
        categories::records::CategoryUuid,
        menu_items::{
            data::MenuItemFilter,
            records::{MenuItemRecord, MenuItemUuid},
        },
    },
};

const LIST_MENU_ITEMS_SQL: &str = include_str!("sql/list_menu_items.sql");
const COUNT_MENU_ITEMS_SQL: &str = include_str!("sql/count_menu_items.sql");
const GET_MENU_ITEM_SQL: &str = include_str!("sql/get_menu_item.sql");
const CREATE_MENU_ITEM_SQL: &str = include_str!("sql/create_menu_item.sql");
const UPDATE_MENU_ITEM_SQL: &str = include_str!("sql/update_menu_item.sql");
const DELETE_MENU_ITEM_SQL: &str = include_str!("sql/delete_menu_item.sql");
const REMOVE_MENU_ITEM_FROM_CARTS_SQL: &str = include_str!("sql/remove_menu_item_from_carts.sql");

/// Menu item values already converted to their column types.
pub(crate) struct MenuItemColumns<'a> {
    pub title: Option<&'a str>,
    pub price: Option<i64>,
    pub featured: Option<bool>,
    pub category_uuid: Option<CategoryUuid>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgMenuItemsRepository;

impl PgMenuItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &MenuItemFilter,
        max_price: Option<i64>,
    ) -> Result<Vec<MenuItemRecord>, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(LIST_MENU_ITEMS_SQL)
            .bind(filter.category.as_deref())
            .bind(filter.featured)
            .bind(max_price)
            .bind(filter.search_pattern())
            .bind(filter.ordering.map(|ordering| ordering.as_str()))
            .bind(filter.page.limit())
            .bind(filter.page.offset())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_menu_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &MenuItemFilter,
        max_price: Option<i64>,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(COUNT_MENU_ITEMS_SQL)
            .bind(filter.category.as_deref())
            .bind(filter.featured)
            .bind(max_price)
            .bind(filter.search_pattern())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }

    pub(crate) async fn get_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(GET_MENU_ITEM_SQL)
            .bind(uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
        title: &str,
        price: i64,
        featured: bool,
        category_uuid: CategoryUuid,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(CREATE_MENU_ITEM_SQL)
            .bind(uuid)
            .bind(title)
            .bind(price)
            .bind(featured)
            .bind(category_uuid)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
        columns: MenuItemColumns<'_>,
    ) -> Result<MenuItemRecord, sqlx::Error> {
        query_as::<Postgres, MenuItemRecord>(UPDATE_MENU_ITEM_SQL)
            .bind(uuid)
            .bind(columns.title)
            .bind(columns.price)
            .bind(columns.featured)
            .bind(columns.category_uuid)
            .fetch_one(&mut **tx)
            .await
    }

    /// Soft-delete a menu item and drop it from every cart.
    pub(crate) async fn delete_menu_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: MenuItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_MENU_ITEM_SQL)
            .bind(uuid)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        if rows_affected > 0 {
            let removed = query(REMOVE_MENU_ITEM_FROM_CARTS_SQL)
                .bind(uuid)
                .execute(&mut **tx)
                .await?
                .rows_affected();

            debug!(menu_item = %uuid, cart_items = removed, "removed deleted menu item from carts");
        }

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for MenuItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            title: row.try_get("title")?,
            price: try_get_amount(row, "price")?,
            featured: row.try_get("featured")?,
            category_uuid: row.try_get("category_uuid")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
