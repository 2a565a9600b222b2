//! Bundles Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::{
    bundles::models::{Bundle, BundleUpdate, BundleUuid, NewBundle},
    products::models::ProductUuid,
    rows::{amount_to_db, try_get_amount},
};

const LIST_BUNDLES_SQL: &str = include_str!("sql/list_bundles.sql");
const GET_BUNDLE_SQL: &str = include_str!("sql/get_bundle.sql");
const CREATE_BUNDLE_SQL: &str = include_str!("sql/create_bundle.sql");
const UPDATE_BUNDLE_SQL: &str = include_str!("sql/update_bundle.sql");
const DELETE_BUNDLE_SQL: &str = include_str!("sql/delete_bundle.sql");
const COUNT_KNOWN_PRODUCTS_SQL: &str = include_str!("sql/count_known_products.sql");

fn product_uuids_to_db(product_uuids: &[ProductUuid]) -> Vec<Uuid> {
    product_uuids.iter().copied().map(ProductUuid::into_uuid).collect()
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBundlesRepository;

impl PgBundlesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_bundles(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Bundle>, sqlx::Error> {
        query_as::<Postgres, Bundle>(LIST_BUNDLES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_bundle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        bundle: BundleUuid,
    ) -> Result<Bundle, sqlx::Error> {
        query_as::<Postgres, Bundle>(GET_BUNDLE_SQL)
            .bind(bundle.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    /// Counts how many of the given product UUIDs exist in the catalog.
    pub(crate) async fn count_known_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product_uuids: &[ProductUuid],
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_KNOWN_PRODUCTS_SQL)
            .bind(product_uuids_to_db(product_uuids))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_bundle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        bundle: &NewBundle,
    ) -> Result<Bundle, sqlx::Error> {
        let price_i64 = amount_to_db(bundle.price, "price")?;

        query_as::<Postgres, Bundle>(CREATE_BUNDLE_SQL)
            .bind(bundle.uuid.into_uuid())
            .bind(&bundle.title)
            .bind(&bundle.category)
            .bind(&bundle.description)
            .bind(&bundle.image)
            .bind(price_i64)
            .bind(product_uuids_to_db(&bundle.product_uuids))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_bundle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        bundle: BundleUuid,
        update: &BundleUpdate,
    ) -> Result<Bundle, sqlx::Error> {
        let price_i64 = amount_to_db(update.price, "price")?;

        query_as::<Postgres, Bundle>(UPDATE_BUNDLE_SQL)
            .bind(bundle.into_uuid())
            .bind(&update.title)
            .bind(&update.category)
            .bind(&update.description)
            .bind(&update.image)
            .bind(price_i64)
            .bind(product_uuids_to_db(&update.product_uuids))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_bundle(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        bundle: BundleUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BUNDLE_SQL)
            .bind(bundle.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Bundle {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let product_uuids: Vec<Uuid> = row.try_get("product_uuids")?;

        Ok(Self {
            uuid: BundleUuid::from_uuid(row.try_get("uuid")?),
            title: row.try_get("title")?,
            category: row.try_get("category")?,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            price: try_get_amount(row, "price")?,
            product_uuids: product_uuids.into_iter().map(ProductUuid::from_uuid).collect(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
