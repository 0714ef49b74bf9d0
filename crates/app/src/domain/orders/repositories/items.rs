//! Order Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    domain::{
        carts::records::CartItemRecord,
        orders::records::{OrderItemRecord, OrderItemUuid, OrderUuid},
    },
};

const LIST_ORDER_ITEMS_SQL: &str = include_str!("../sql/list_order_items.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("../sql/create_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrderItemsRepository;

impl PgOrderItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Items for every given order, grouped by order.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let orders: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await
    }

    /// Copy cart lines into the order in a single statement.
    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[CartItemRecord],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        let mut uuids = Vec::with_capacity(lines.len());
        let mut menu_items = Vec::with_capacity(lines.len());
        let mut quantities = Vec::with_capacity(lines.len());
        let mut unit_prices = Vec::with_capacity(lines.len());
        let mut prices = Vec::with_capacity(lines.len());

        for line in lines {
            uuids.push(OrderItemUuid::new().into_uuid());
            menu_items.push(line.menu_item_uuid.into_uuid());
            quantities.push(quantity_to_i32(line.quantity)?);
            unit_prices.push(amount_to_i64(line.unit_price)?);
            prices.push(amount_to_i64(line.price)?);
        }

        query_as::<Postgres, OrderItemRecord>(CREATE_ORDER_ITEMS_SQL)
            .bind(order)
            .bind(uuids)
            .bind(menu_items)
            .bind(quantities)
            .bind(unit_prices)
            .bind(prices)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            order_uuid: row.try_get("order_uuid")?,
            menu_item_uuid: row.try_get("menu_item_uuid")?,
            quantity: try_get_quantity(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            price: try_get_amount(row, "price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
