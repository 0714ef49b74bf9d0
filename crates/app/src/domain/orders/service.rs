//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartItemUuid, checked_total},
            repositories::PgCartItemsRepository,
        },
        orders::{
            data::{NewOrder, OrderFilter, OrderScope, OrderUpdate},
            errors::OrdersServiceError,
            records::{OrderItemRecord, OrderRecord, OrderUuid},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
        users::records::UserUuid,
    },
    pagination::Page,
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    cart_items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            cart_items_repository: PgCartItemsRepository::new(),
        }
    }
}

fn attach_items(orders: &mut [OrderRecord], items: Vec<OrderItemRecord>) {
    let mut by_order: FxHashMap<OrderUuid, Vec<OrderItemRecord>> = FxHashMap::default();

    for item in items {
        by_order.entry(item.order_uuid).or_default().push(item);
    }

    for order in orders {
        if let Some(items) = by_order.remove(&order.uuid) {
            order.items = items;
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_orders(
        &self,
        scope: OrderScope,
        filter: OrderFilter,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self
            .orders_repository
            .list_orders(&mut tx, scope, &filter)
            .await?;

        let total = self
            .orders_repository
            .count_orders(&mut tx, scope, &filter)
            .await?;

        let uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let items = self.items_repository.list_order_items(&mut tx, &uuids).await?;

        tx.commit().await?;

        attach_items(&mut orders, items);

        Ok(Page::new(orders, filter.page, total))
    }

    async fn get_order(
        &self,
        scope: OrderScope,
        uuid: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.orders_repository.get_order(&mut tx, scope, uuid).await?;

        order.items = self.items_repository.list_order_items(&mut tx, &[uuid]).await?;

        tx.commit().await?;

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(user_uuid = %user, order_uuid = %order.uuid),
        err
    )]
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self
            .cart_items_repository
            .lock_cart_items(&mut tx, user)
            .await?;

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let total = checked_total(&lines).ok_or(OrdersServiceError::InvalidData)?;

        let mut created = self
            .orders_repository
            .create_order(&mut tx, order.uuid, user, total)
            .await?;

        created.items = self
            .items_repository
            .create_order_items(&mut tx, created.uuid, &lines)
            .await?;

        let ordered: Vec<CartItemUuid> = lines.iter().map(|line| line.uuid).collect();

        self.cart_items_repository
            .delete_cart_items(&mut tx, user, &ordered)
            .await?;

        tx.commit().await?;

        info!(order = %created.uuid, items = created.items.len(), total, "order placed");

        Ok(created)
    }

    #[tracing::instrument(
        name = "orders.service.update_order",
        skip(self, update),
        fields(order_uuid = %uuid),
        err
    )]
    async fn update_order(
        &self,
        scope: OrderScope,
        uuid: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        if let Some(crew) = update.delivery_crew_uuid
            && !self.orders_repository.is_delivery_crew(&mut tx, crew).await?
        {
            return Err(OrdersServiceError::InvalidAssignee);
        }

        let mut updated = self
            .orders_repository
            .update_order(&mut tx, scope, uuid, &update)
            .await?;

        updated.items = self.items_repository.list_order_items(&mut tx, &[uuid]).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_order(&self, uuid: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders_repository.delete_order(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Retrieve a filtered, ordered page of orders visible in `scope`, with their items.
    async fn list_orders(
        &self,
        scope: OrderScope,
        filter: OrderFilter,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Retrieve a single order visible in `scope`.
    async fn get_order(
        &self,
        scope: OrderScope,
        uuid: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Turn the user's cart into an order and empty the cart.
    async fn place_order(
        &self,
        user: UserUuid,
        order: NewOrder,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Assign a delivery crew member and/or change the status of an order in `scope`.
    async fn update_order(
        &self,
        scope: OrderScope,
        uuid: OrderUuid,
        update: OrderUpdate,
    ) -> Result<OrderRecord, OrdersServiceError>;

    /// Delete an order and its items.
    async fn delete_order(&self, uuid: OrderUuid) -> Result<(), OrdersServiceError>;
}
