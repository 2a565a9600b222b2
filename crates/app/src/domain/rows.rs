//! Row decoding helpers shared by the repositories.

use std::str::FromStr;

use sqlx::{Row, postgres::PgRow};

fn decode_error<E>(col: &str, source: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(source),
    }
}

/// Decode a BIGINT amount column into minor units.
pub(crate) fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| decode_error(col, e))
}

/// Decode an INTEGER quantity column.
pub(crate) fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| decode_error(col, e))
}

/// Decode a stock-count column constrained to 0–255.
pub(crate) fn try_get_stock(row: &PgRow, col: &str) -> Result<u16, sqlx::Error> {
    let stock_i32: i32 = row.try_get(col)?;

    u16::try_from(stock_i32).map_err(|e| decode_error(col, e))
}

/// Decode a TEXT column into one of the parseable domain enums.
pub(crate) fn try_get_parsed<T>(row: &PgRow, col: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: String = row.try_get(col)?;

    value.parse::<T>().map_err(|e| decode_error(col, e))
}

/// Convert a minor-unit amount into a bindable BIGINT.
pub(crate) fn amount_to_db(amount: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(amount).map_err(|e| decode_error(col, e))
}
