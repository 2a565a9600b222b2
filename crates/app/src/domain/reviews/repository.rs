//! Reviews Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    products::models::ProductUuid,
    reviews::models::{NewReview, Review, ReviewUuid},
    users::models::UserUuid,
};

const LIST_PRODUCT_REVIEWS_SQL: &str = include_str!("sql/list_product_reviews.sql");
const GET_REVIEW_SQL: &str = include_str!("sql/get_review.sql");
const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const APPROVE_REVIEW_SQL: &str = include_str!("sql/approve_review.sql");
const DELETE_REVIEW_SQL: &str = include_str!("sql/delete_review.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReviewsRepository;

impl PgReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_product_reviews(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        only_approved: bool,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Postgres, Review>(LIST_PRODUCT_REVIEWS_SQL)
            .bind(product.into_uuid())
            .bind(only_approved)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Postgres, Review>(GET_REVIEW_SQL)
            .bind(review.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: &NewReview,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(review.product_uuid.into_uuid())
            .bind(review.user_uuid.into_uuid())
            .bind(&review.reviewer_type)
            .bind(i32::from(review.rating))
            .bind(&review.review_text)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn approve_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(APPROVE_REVIEW_SQL)
            .bind(review.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_review(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        review: ReviewUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_REVIEW_SQL)
            .bind(review.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Review {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let rating_i32: i32 = row.try_get("rating")?;

        let rating = u8::try_from(rating_i32).map_err(|e| sqlx::Error::ColumnDecode {
            index: "rating".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            reviewer_name: row.try_get("reviewer_name")?,
            reviewer_type: row.try_get("reviewer_type")?,
            rating,
            review_text: row.try_get("review_text")?,
            approved: row.try_get("approved")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
