//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    categories::models::CategoryUuid,
    countries::models::CountryUuid,
    products::models::{NewProduct, Product, ProductDetails, ProductFilter, ProductUpdate, ProductUuid},
    rows::{amount_to_db, try_get_amount, try_get_stock},
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetails>, sqlx::Error> {
        query_as::<Postgres, ProductDetails>(LIST_PRODUCTS_SQL)
            .bind(filter.category_uuid.map(CategoryUuid::into_uuid))
            .bind(filter.country_uuid.map(CountryUuid::into_uuid))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductDetails, sqlx::Error> {
        query_as::<Postgres, ProductDetails>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<(), sqlx::Error> {
        let price_i64 = amount_to_db(product.price, "price")?;

        query(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(&product.name)
            .bind(&product.description)
            .bind(&product.rich_description)
            .bind(&product.brand)
            .bind(&product.image)
            .bind(&product.images)
            .bind(price_i64)
            .bind(product.category_uuid.into_uuid())
            .bind(product.country_uuid.into_uuid())
            .bind(i32::from(product.count_in_stock))
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        update: &ProductUpdate,
    ) -> Result<u64, sqlx::Error> {
        let price_i64 = amount_to_db(update.price, "price")?;

        let rows_affected = query(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(&update.name)
            .bind(&update.description)
            .bind(&update.rich_description)
            .bind(&update.brand)
            .bind(&update.image)
            .bind(&update.images)
            .bind(price_i64)
            .bind(update.category_uuid.into_uuid())
            .bind(update.country_uuid.into_uuid())
            .bind(i32::from(update.count_in_stock))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            rich_description: row.try_get("rich_description")?,
            brand: row.try_get("brand")?,
            image: row.try_get("image")?,
            images: row.try_get("images")?,
            price: try_get_amount(row, "price")?,
            category_uuid: CategoryUuid::from_uuid(row.try_get("category_uuid")?),
            country_uuid: CountryUuid::from_uuid(row.try_get("country_uuid")?),
            count_in_stock: try_get_stock(row, "count_in_stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductDetails {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: Product::from_row(row)?,
            category_name: row.try_get("category_name")?,
            country_name: row.try_get("country_name")?,
            country_code: row.try_get("country_code")?,
        })
    }
}
