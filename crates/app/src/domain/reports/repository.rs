//! Reports Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    orders::models::OrderUuid,
    reports::models::SalesRow,
    rows::{try_get_amount, try_get_parsed, try_get_quantity},
};

const TOTAL_SALES_SQL: &str = include_str!("sql/total_sales.sql");
const ORDER_COUNT_SQL: &str = include_str!("sql/order_count.sql");
const SALES_ROWS_SQL: &str = include_str!("sql/sales_rows.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn total_sales(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let row = query(TOTAL_SALES_SQL).fetch_one(&mut **tx).await?;

        try_get_amount(&row, "total_sales")
    }

    pub(crate) async fn order_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let row = query(ORDER_COUNT_SQL).fetch_one(&mut **tx).await?;

        try_get_amount(&row, "order_count")
    }

    pub(crate) async fn sales_rows(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<SalesRow>, sqlx::Error> {
        query_as::<Postgres, SalesRow>(SALES_ROWS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for SalesRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_uuid: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            date_ordered: row.try_get::<SqlxTimestamp, _>("date_ordered")?.to_jiff(),
            customer_name: row.try_get("customer_name")?,
            customer_email: row.try_get("customer_email")?,
            order_status: try_get_parsed(row, "order_status")?,
            payment_status: try_get_parsed(row, "payment_status")?,
            currency: try_get_parsed(row, "currency")?,
            product_name: row.try_get("product_name")?,
            quantity: try_get_quantity(row, "quantity")?,
            price_at_purchase: try_get_amount(row, "price_at_purchase")?,
            order_total: try_get_amount(row, "order_total")?,
        })
    }
}
