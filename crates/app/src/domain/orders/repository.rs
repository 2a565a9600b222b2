//! Orders Repository
//!
//! Every method runs inside the caller's transaction; cart mutations rely on
//! the row lock taken by `find_pending_order_for_update`.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::domain::{
    orders::models::{Order, OrderItem, OrderUuid, ShippingAddress},
    products::models::ProductUuid,
    rows::{amount_to_db, try_get_amount, try_get_parsed, try_get_quantity, try_get_stock},
    users::models::UserUuid,
};

const FIND_PENDING_ORDER_FOR_UPDATE_SQL: &str = include_str!("sql/find_pending_order_for_update.sql");
const INSERT_PENDING_ORDER_SQL: &str = include_str!("sql/insert_pending_order.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const UPSERT_ITEM_SQL: &str = include_str!("sql/upsert_item.sql");
const SET_ITEM_QUANTITY_SQL: &str = include_str!("sql/set_item_quantity.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");
const UPDATE_CART_TOTALS_SQL: &str = include_str!("sql/update_cart_totals.sql");
const GET_PRODUCT_SNAPSHOT_SQL: &str = include_str!("sql/get_product_snapshot.sql");
const LOCK_PRODUCTS_FOR_CHECKOUT_SQL: &str = include_str!("sql/lock_products_for_checkout.sql");
const UPDATE_ITEM_PRICE_SQL: &str = include_str!("sql/update_item_price.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const PROMOTE_ORDER_SQL: &str = include_str!("sql/promote_order.sql");
const UPDATE_ORDER_STATUS_SQL: &str = include_str!("sql/update_order_status.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");

/// What checkout needs to know about a product while holding its row lock.
#[derive(Debug, Clone)]
pub(crate) struct ProductSnapshot {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub count_in_stock: u16,
}

/// An order line paired with the order it belongs to, for grouping.
#[derive(Debug, Clone)]
pub(crate) struct OrderItemRow {
    pub order_uuid: OrderUuid,
    pub item: OrderItem,
}

/// New totals written back after a cart mutation or at checkout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Totals {
    pub subtotal: u64,
    pub shipping_fee: u64,
    pub tax: u64,
    pub total: u64,
    pub currency: pantry::money::Currency,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Locks and returns the user's pending order, if any.
    pub(crate) async fn find_pending_order_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(FIND_PENDING_ORDER_FOR_UPDATE_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Inserts an empty pending order with placeholder shipping details.
    /// A concurrent insert for the same user is swallowed by the partial
    /// unique index conflict target; callers re-select afterwards.
    pub(crate) async fn insert_pending_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        address: &ShippingAddress,
        phone: &str,
    ) -> Result<(), sqlx::Error> {
        query(INSERT_PENDING_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(user.into_uuid())
            .bind(&address.country)
            .bind(&address.city)
            .bind(&address.address)
            .bind(&address.postal_code)
            .bind(&address.special_instructions)
            .bind(phone)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[OrderUuid],
    ) -> Result<Vec<OrderItemRow>, sqlx::Error> {
        let order_uuids: Vec<Uuid> = orders.iter().copied().map(OrderUuid::into_uuid).collect();

        query_as::<Postgres, OrderItemRow>(LIST_ORDER_ITEMS_SQL)
            .bind(order_uuids)
            .fetch_all(&mut **tx)
            .await
    }

    /// Adds a line to the order, merging quantities when the product is
    /// already present. The original price snapshot is kept on merge.
    pub(crate) async fn upsert_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        quantity: u32,
        price_at_purchase: u64,
    ) -> Result<(), sqlx::Error> {
        let price_i64 = amount_to_db(price_at_purchase, "price_at_purchase")?;

        query(UPSERT_ITEM_SQL)
            .bind(Uuid::now_v7())
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
                index: "quantity".to_string(),
                source: Box::new(e),
            })?)
            .bind(price_i64)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn set_item_quantity(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<u64, sqlx::Error> {
        let quantity_i32 = i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        let rows_affected = query(SET_ITEM_QUANTITY_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(quantity_i32)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_cart_totals(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        totals: Totals,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_CART_TOTALS_SQL)
            .bind(order.into_uuid())
            .bind(amount_to_db(totals.subtotal, "subtotal")?)
            .bind(amount_to_db(totals.shipping_fee, "shipping_fee")?)
            .bind(amount_to_db(totals.tax, "tax")?)
            .bind(amount_to_db(totals.total, "total")?)
            .bind(totals.currency.as_str())
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_product_snapshot(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductSnapshot>, sqlx::Error> {
        query_as::<Postgres, ProductSnapshot>(GET_PRODUCT_SNAPSHOT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Locks the products in a stable order to avoid deadlocking with
    /// concurrent checkouts touching an overlapping set.
    pub(crate) async fn lock_products_for_checkout(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductSnapshot>, sqlx::Error> {
        let product_uuids: Vec<Uuid> =
            products.iter().copied().map(ProductUuid::into_uuid).collect();

        query_as::<Postgres, ProductSnapshot>(LOCK_PRODUCTS_FOR_CHECKOUT_SQL)
            .bind(product_uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn update_item_price(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        product: ProductUuid,
        price_at_purchase: u64,
    ) -> Result<(), sqlx::Error> {
        let price_i64 = amount_to_db(price_at_purchase, "price_at_purchase")?;

        query(UPDATE_ITEM_PRICE_SQL)
            .bind(order.into_uuid())
            .bind(product.into_uuid())
            .bind(price_i64)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<(), sqlx::Error> {
        let quantity_i32 = i32::try_from(quantity).map_err(|e| sqlx::Error::ColumnDecode {
            index: "quantity".to_string(),
            source: Box::new(e),
        })?;

        query(DECREMENT_STOCK_SQL)
            .bind(product.into_uuid())
            .bind(quantity_i32)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Converts the pending cart into a placed order. Returns the number of
    /// rows affected; zero means the cart was promoted concurrently.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn promote_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        payment_method: &str,
        payment_status: &str,
        address: &ShippingAddress,
        phone: &str,
        totals: Totals,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PROMOTE_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(payment_method)
            .bind(payment_status)
            .bind(&address.country)
            .bind(&address.city)
            .bind(&address.address)
            .bind(&address.postal_code)
            .bind(&address.special_instructions)
            .bind(phone)
            .bind(amount_to_db(totals.subtotal, "subtotal")?)
            .bind(amount_to_db(totals.shipping_fee, "shipping_fee")?)
            .bind(amount_to_db(totals.tax, "tax")?)
            .bind(amount_to_db(totals.total, "total")?)
            .bind(totals.currency.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn update_order_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        status: &str,
    ) -> Result<(), sqlx::Error> {
        query(UPDATE_ORDER_STATUS_SQL)
            .bind(order.into_uuid())
            .bind(status)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let version_i64: i64 = row.try_get("version")?;

        let version = u64::try_from(version_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order_status: try_get_parsed(row, "order_status")?,
            payment_method: try_get_parsed(row, "payment_method")?,
            payment_status: try_get_parsed(row, "payment_status")?,
            shipping_address: ShippingAddress {
                country: row.try_get("ship_country")?,
                city: row.try_get("ship_city")?,
                address: row.try_get("ship_address")?,
                postal_code: row.try_get("ship_postal_code")?,
                special_instructions: row.try_get("ship_instructions")?,
            },
            phone: row.try_get("phone")?,
            items: Vec::new(),
            subtotal: try_get_amount(row, "subtotal")?,
            shipping_fee: try_get_amount(row, "shipping_fee")?,
            tax: try_get_amount(row, "tax")?,
            total: try_get_amount(row, "total")?,
            currency: try_get_parsed(row, "currency")?,
            version,
            date_ordered: row.try_get::<SqlxTimestamp, _>("date_ordered")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderItemRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            item: OrderItem {
                product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
                product_name: row.try_get("product_name")?,
                product_image: row.try_get("product_image")?,
                product_brand: row.try_get("product_brand")?,
                country_name: row.try_get("country_name")?,
                category_name: row.try_get("category_name")?,
                quantity: try_get_quantity(row, "quantity")?,
                price_at_purchase: try_get_amount(row, "price_at_purchase")?,
            },
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSnapshot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: try_get_amount(row, "price")?,
            count_in_stock: try_get_stock(row, "count_in_stock")?,
        })
    }
}
