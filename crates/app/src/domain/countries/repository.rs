//! Countries Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    countries::models::{Country, CountryUpdate, CountryUuid, NewCountry},
    rows::{amount_to_db, try_get_amount, try_get_parsed},
};

const LIST_COUNTRIES_SQL: &str = include_str!("sql/list_countries.sql");
const GET_COUNTRY_SQL: &str = include_str!("sql/get_country.sql");
const CREATE_COUNTRY_SQL: &str = include_str!("sql/create_country.sql");
const UPDATE_COUNTRY_SQL: &str = include_str!("sql/update_country.sql");
const DELETE_COUNTRY_SQL: &str = include_str!("sql/delete_country.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCountriesRepository;

impl PgCountriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_countries(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Country>, sqlx::Error> {
        query_as::<Postgres, Country>(LIST_COUNTRIES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_country(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        country: CountryUuid,
    ) -> Result<Country, sqlx::Error> {
        query_as::<Postgres, Country>(GET_COUNTRY_SQL)
            .bind(country.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_country(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        country: &NewCountry,
    ) -> Result<Country, sqlx::Error> {
        let stock_i64 = amount_to_db(country.stock, "stock")?;

        query_as::<Postgres, Country>(CREATE_COUNTRY_SQL)
            .bind(country.uuid.into_uuid())
            .bind(&country.name)
            .bind(&country.code)
            .bind(&country.flag_image)
            .bind(&country.description)
            .bind(stock_i64)
            .bind(country.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_country(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        country: CountryUuid,
        update: &CountryUpdate,
    ) -> Result<Country, sqlx::Error> {
        let stock_i64 = amount_to_db(update.stock, "stock")?;

        query_as::<Postgres, Country>(UPDATE_COUNTRY_SQL)
            .bind(country.into_uuid())
            .bind(&update.name)
            .bind(&update.code)
            .bind(&update.flag_image)
            .bind(&update.description)
            .bind(stock_i64)
            .bind(update.status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_country(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        country: CountryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_COUNTRY_SQL)
            .bind(country.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Country {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CountryUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            code: row.try_get("code")?,
            flag_image: row.try_get("flag_image")?,
            description: row.try_get("description")?,
            stock: try_get_amount(row, "stock")?,
            status: try_get_parsed(row, "status")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
