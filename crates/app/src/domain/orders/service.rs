//! Orders service.
//!
//! Cart mutations are serialised per user: every mutation locks the pending
//! order row first, so two tabs adding items concurrently queue up instead of
//! losing writes. Checkout additionally locks the purchased product rows and
//! runs entirely in one transaction.

use std::collections::HashMap;

use async_trait::async_trait;
use mockall::automock;
use pantry::{
    lifecycle::OrderStatus,
    pricing::{QuoteLine, quote},
};
use sqlx::{Postgres, Transaction};
use tracing::Span;

use crate::{
    database::Db,
    domain::{
        orders::{
            errors::OrdersServiceError,
            models::{
                CheckoutRequest, Order, OrderItem, OrderUuid, PLACEHOLDER_PHONE, ShippingAddress,
            },
            repository::{PgOrdersRepository, Totals},
        },
        products::models::ProductUuid,
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    repository: PgOrdersRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgOrdersRepository::new(),
        }
    }

    /// Locks the user's pending cart, creating it if this is the user's
    /// first cart interaction.
    async fn obtain_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Order, OrdersServiceError> {
        if let Some(cart) = self.repository.find_pending_order_for_update(tx, user).await? {
            return Ok(cart);
        }

        self.repository
            .insert_pending_order(
                tx,
                OrderUuid::new(),
                user,
                &ShippingAddress::placeholder(),
                PLACEHOLDER_PHONE,
            )
            .await
            .map_err(|error| match OrdersServiceError::from(error) {
                // The only FK here is orders.user_uuid.
                OrdersServiceError::ProductNotFound => OrdersServiceError::UnknownUser,
                other => other,
            })?;

        // The insert is a no-op when another request created the cart first;
        // either way the row exists now, so lock it.
        match self.repository.find_pending_order_for_update(tx, user).await? {
            Some(cart) => Ok(cart),
            None => Err(OrdersServiceError::NotFound),
        }
    }

    async fn load_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Vec<OrderItem>, OrdersServiceError> {
        let rows = self.repository.list_order_items(tx, &[order]).await?;

        Ok(rows.into_iter().map(|row| row.item).collect())
    }

    fn totals_for(items: &[OrderItem], country: &str) -> Result<Totals, OrdersServiceError> {
        let lines: Vec<QuoteLine> = items
            .iter()
            .map(|item| QuoteLine {
                unit_price: item.price_at_purchase,
                quantity: item.quantity,
            })
            .collect();

        let quote = quote(&lines, country)?;

        Ok(Totals {
            subtotal: quote.subtotal,
            shipping_fee: quote.shipping_fee,
            tax: quote.tax,
            total: quote.total,
            currency: quote.currency,
        })
    }

    /// Recomputes totals after a cart mutation and returns the refreshed
    /// cart, version bump included.
    async fn recompute_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        country: &str,
    ) -> Result<Order, OrdersServiceError> {
        let items = self.load_items(tx, order).await?;
        let totals = Self::totals_for(&items, country)?;

        self.repository.update_cart_totals(tx, order, totals).await?;

        let mut refreshed = self.repository.get_order(tx, order).await?;
        refreshed.items = items;

        Ok(refreshed)
    }

    /// Batch-loads items for a page of orders.
    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        mut orders: Vec<Order>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let order_uuids: Vec<OrderUuid> = orders.iter().map(|order| order.uuid).collect();

        let mut grouped: HashMap<OrderUuid, Vec<OrderItem>> = HashMap::new();

        for row in self.repository.list_order_items(tx, &order_uuids).await? {
            grouped.entry(row.order_uuid).or_default().push(row.item);
        }

        for order in &mut orders {
            order.items = grouped.remove(&order.uuid).unwrap_or_default();
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn get_cart(&self, user: UserUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self.obtain_cart(&mut tx, user).await?;
        cart.items = self.load_items(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "orders.service.add_item",
        skip(self),
        fields(user_uuid = %user, product_uuid = %product, quantity),
        err
    )]
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Order, OrdersServiceError> {
        if quantity == 0 {
            return Err(OrdersServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await?;

        let cart = self.obtain_cart(&mut tx, user).await?;

        let snapshot = self
            .repository
            .get_product_snapshot(&mut tx, product)
            .await?
            .ok_or(OrdersServiceError::ProductNotFound)?;

        self.repository
            .upsert_item(&mut tx, cart.uuid, product, quantity, snapshot.price)
            .await?;

        let cart = self
            .recompute_cart(&mut tx, cart.uuid, &cart.shipping_address.country)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn update_item_quantity(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .repository
            .find_pending_order_for_update(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::ItemNotInCart)?;

        let rows_affected = if quantity == 0 {
            self.repository.delete_item(&mut tx, cart.uuid, product).await?
        } else {
            self.repository
                .set_item_quantity(&mut tx, cart.uuid, product, quantity)
                .await?
        };

        if rows_affected == 0 {
            return Err(OrdersServiceError::ItemNotInCart);
        }

        let cart = self
            .recompute_cart(&mut tx, cart.uuid, &cart.shipping_address.country)
            .await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Order, OrdersServiceError> {
        self.update_item_quantity(user, product, 0).await
    }

    #[tracing::instrument(
        name = "orders.service.checkout",
        skip(self, request),
        fields(
            user_uuid = %user,
            order_uuid = tracing::field::Empty,
            item_count = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn checkout(
        &self,
        user: UserUuid,
        request: CheckoutRequest,
    ) -> Result<Order, OrdersServiceError> {
        if !request.shipping_address.is_complete() || request.phone.trim().is_empty() {
            return Err(OrdersServiceError::IncompleteShipping);
        }

        let mut tx = self.db.begin().await?;

        let cart = self
            .repository
            .find_pending_order_for_update(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::EmptyCart)?;

        let mut items = self.load_items(&mut tx, cart.uuid).await?;

        if items.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let span = Span::current();

        span.record("order_uuid", tracing::field::display(cart.uuid));
        span.record("item_count", tracing::field::display(items.len()));

        let product_uuids: Vec<ProductUuid> =
            items.iter().map(|item| item.product_uuid).collect();

        let snapshots = self
            .repository
            .lock_products_for_checkout(&mut tx, &product_uuids)
            .await?;

        let by_uuid: HashMap<ProductUuid, _> = snapshots
            .into_iter()
            .map(|snapshot| (snapshot.uuid, snapshot))
            .collect();

        for item in &mut items {
            let snapshot = by_uuid
                .get(&item.product_uuid)
                .ok_or(OrdersServiceError::ProductNotFound)?;

            if u32::from(snapshot.count_in_stock) < item.quantity {
                return Err(OrdersServiceError::InsufficientStock {
                    name: snapshot.name.clone(),
                    available: snapshot.count_in_stock,
                    requested: item.quantity,
                });
            }

            // The catalog price is authoritative at checkout.
            if snapshot.price != item.price_at_purchase {
                self.repository
                    .update_item_price(&mut tx, cart.uuid, item.product_uuid, snapshot.price)
                    .await?;
                item.price_at_purchase = snapshot.price;
            }
        }

        let totals = Self::totals_for(&items, &request.shipping_address.country)?;

        span.record("total", tracing::field::display(totals.total));

        for item in &items {
            self.repository
                .decrement_stock(&mut tx, item.product_uuid, item.quantity)
                .await?;
        }

        let payment_status = request.payment_method.initial_payment_status();

        let rows_affected = self
            .repository
            .promote_order(
                &mut tx,
                cart.uuid,
                request.payment_method.as_str(),
                payment_status.as_str(),
                &request.shipping_address,
                request.phone.trim(),
                totals,
            )
            .await?;

        // Unreachable while we hold the row lock, but never promote twice.
        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        let mut placed = self.repository.get_order(&mut tx, cart.uuid).await?;
        placed.items = items;

        tx.commit().await?;

        Ok(placed)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_orders(&mut tx).await?;
        let orders = self.attach_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn get_order(
        &self,
        order: OrderUuid,
        caller: UserUuid,
        caller_is_admin: bool,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.get_order(&mut tx, order).await?;

        // Non-admins only see their own orders; do not reveal existence.
        if !caller_is_admin && found.user_uuid != caller {
            return Err(OrdersServiceError::NotFound);
        }

        let mut found = found;
        found.items = self.load_items(&mut tx, found.uuid).await?;

        tx.commit().await?;

        Ok(found)
    }

    async fn user_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_user_orders(&mut tx, user).await?;
        let orders = self.attach_items(&mut tx, orders).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.get_order(&mut tx, order).await?;

        if !current.order_status.can_transition(status) {
            return Err(OrdersServiceError::InvalidTransition {
                from: current.order_status,
                to: status,
            });
        }

        self.repository
            .update_order_status(&mut tx, order, status.as_str())
            .await?;

        let mut updated = self.repository.get_order(&mut tx, order).await?;
        updated.items = self.load_items(&mut tx, updated.uuid).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

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
    /// Obtain-or-create the user's pending cart.
    async fn get_cart(&self, user: UserUuid) -> Result<Order, OrdersServiceError>;

    /// Adds a product to the cart, merging quantities if it is already there.
    /// The catalog price is snapshotted on first add.
    async fn add_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Order, OrdersServiceError>;

    /// Sets a line's quantity; zero removes the line.
    async fn update_item_quantity(
        &self,
        user: UserUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<Order, OrdersServiceError>;

    /// Removes a line from the cart.
    async fn remove_item(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Converts the pending cart into a placed order: re-snapshots prices,
    /// checks and decrements stock, computes authoritative totals, and sets
    /// the order on its lifecycle. All in one transaction.
    async fn checkout(
        &self,
        user: UserUuid,
        request: CheckoutRequest,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieves every order, newest first.
    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve a single order, scoped to its owner unless the caller is an
    /// admin.
    async fn get_order(
        &self,
        order: OrderUuid,
        caller: UserUuid,
        caller_is_admin: bool,
    ) -> Result<Order, OrdersServiceError>;

    /// A user's placed orders, newest first. Excludes the pending cart.
    async fn user_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Moves an order along its lifecycle.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Deletes an order with the given UUID.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}
