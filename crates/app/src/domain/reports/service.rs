//! Reports service.

use std::fmt::Write;

use async_trait::async_trait;
use mockall::automock;
use pantry::money::format_minor;

use crate::{
    database::Db,
    domain::reports::{
        errors::ReportsServiceError, models::SalesRow, repository::PgReportsRepository,
    },
};

const SALES_CSV_HEADER: &str = "order_uuid,date_ordered,customer_name,customer_email,\
order_status,payment_status,currency,product_name,quantity,price_at_purchase,\
line_total,order_total";

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

/// Quote a CSV field per RFC 4180: fields containing commas, quotes or
/// line breaks are wrapped in double quotes, with inner quotes doubled.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_line(row: &SalesRow) -> String {
    [
        row.order_uuid.into_uuid().to_string(),
        row.date_ordered.to_string(),
        csv_field(&row.customer_name),
        csv_field(&row.customer_email),
        row.order_status.as_str().to_string(),
        row.payment_status.as_str().to_string(),
        row.currency.as_str().to_string(),
        csv_field(&row.product_name),
        row.quantity.to_string(),
        format_minor(row.price_at_purchase),
        format_minor(row.line_total()),
        format_minor(row.order_total),
    ]
    .join(",")
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn total_sales(&self) -> Result<u64, ReportsServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.repository.total_sales(&mut tx).await?;

        tx.commit().await?;

        Ok(total)
    }

    async fn order_count(&self) -> Result<u64, ReportsServiceError> {
        let mut tx = self.db.begin().await?;

        let count = self.repository.order_count(&mut tx).await?;

        tx.commit().await?;

        Ok(count)
    }

    async fn sales_csv(&self) -> Result<String, ReportsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows = self.repository.sales_rows(&mut tx).await?;

        tx.commit().await?;

        let mut csv = String::from(SALES_CSV_HEADER);

        for row in &rows {
            // Infallible on String.
            let _ = write!(csv, "\r\n{}", csv_line(row));
        }

        csv.push_str("\r\n");

        Ok(csv)
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Sum of `total` across every order, carts included.
    async fn total_sales(&self) -> Result<u64, ReportsServiceError>;

    /// Number of orders, carts included.
    async fn order_count(&self) -> Result<u64, ReportsServiceError>;

    /// Sales export, one CSV row per order line item with the order-level
    /// fields repeated. Placed orders first, newest first.
    async fn sales_csv(&self) -> Result<String, ReportsServiceError>;
}

#[cfg(test)]
mod tests {
    use pantry::lifecycle::PaymentMethod;
    use testresult::TestResult;

    use crate::{
        domain::orders::models::{CheckoutRequest, ShippingAddress},
        test::TestContext,
    };

    use super::*;

    fn checkout_request() -> CheckoutRequest {
        CheckoutRequest {
            shipping_address: ShippingAddress {
                country: "USA".to_string(),
                city: "Springfield".to_string(),
                address: "12 Elm Street".to_string(),
                postal_code: "62704".to_string(),
                special_instructions: String::new(),
            },
            phone: "555-0199".to_string(),
            payment_method: PaymentMethod::CreditCard,
        }
    }

    #[test]
    fn plain_fields_are_left_unquoted() {
        assert_eq!(csv_field("Wasabi Peas"), "Wasabi Peas");
    }

    #[test]
    fn fields_with_separators_and_quotes_are_escaped() {
        assert_eq!(csv_field("Sweet, Salty"), "\"Sweet, Salty\"");
        assert_eq!(csv_field("The \"Best\""), "\"The \"\"Best\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[tokio::test]
    async fn empty_database_reports_zeroes_and_a_bare_header() -> TestResult {
        let ctx = TestContext::new().await;

        assert_eq!(ctx.reports.total_sales().await?, 0);
        assert_eq!(ctx.reports.order_count().await?, 0);

        let csv = ctx.reports.sales_csv().await?;

        assert_eq!(csv, format!("{SALES_CSV_HEADER}\r\n"));

        Ok(())
    }

    #[tokio::test]
    async fn totals_include_pending_carts() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx
            .products
            .create_product(ctx.new_product("Sesame Snaps", 7_50, 10).await?)
            .await?;

        ctx.orders.add_item(ctx.user_uuid, product.product.uuid, 2).await?;
        let placed = ctx.orders.checkout(ctx.user_uuid, checkout_request()).await?;

        // A new pending cart with one line: its totals count too.
        let cart = ctx.orders.add_item(ctx.user_uuid, product.product.uuid, 1).await?;

        assert_eq!(ctx.reports.total_sales().await?, placed.total + cart.total);
        assert_eq!(ctx.reports.order_count().await?, 2);

        Ok(())
    }

    #[tokio::test]
    async fn sales_csv_repeats_order_fields_per_line_item() -> TestResult {
        let ctx = TestContext::new().await;
        let first = ctx
            .products
            .create_product(ctx.new_product("Dried Mango", 4_00, 10).await?)
            .await?;
        let second = ctx
            .products
            .create_product(ctx.new_product("Cashews, Roasted", 9_00, 10).await?)
            .await?;

        ctx.orders.add_item(ctx.user_uuid, first.product.uuid, 2).await?;
        ctx.orders.add_item(ctx.user_uuid, second.product.uuid, 1).await?;
        let placed = ctx.orders.checkout(ctx.user_uuid, checkout_request()).await?;

        let csv = ctx.reports.sales_csv().await?;
        let lines: Vec<&str> = csv.trim_end().lines().collect();

        assert_eq!(lines[0], SALES_CSV_HEADER);
        // One row per line item, both carrying the same order uuid.
        assert_eq!(lines.len(), 3);
        let order_uuid = placed.uuid.into_uuid().to_string();
        assert!(lines[1].starts_with(&order_uuid));
        assert!(lines[2].starts_with(&order_uuid));

        assert!(csv.contains("Dried Mango"));
        assert!(csv.contains("\"Cashews, Roasted\""));

        Ok(())
    }
}
