//! Reviews service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        products::models::ProductUuid,
        reviews::{
            errors::ReviewsServiceError,
            models::{MIN_REVIEW_TEXT_LEN, NewReview, Review, ReviewUuid},
            repository::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn list_product_reviews(
        &self,
        product: ProductUuid,
        only_approved: bool,
    ) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self
            .repository
            .list_product_reviews(&mut tx, product, only_approved)
            .await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn create_review(&self, review: NewReview) -> Result<Review, ReviewsServiceError> {
        if !(1..=5).contains(&review.rating) {
            return Err(ReviewsServiceError::InvalidRating);
        }

        if review.review_text.trim().chars().count() < MIN_REVIEW_TEXT_LEN {
            return Err(ReviewsServiceError::TextTooShort);
        }

        let mut tx = self.db.begin().await?;

        self.repository.create_review(&mut tx, &review).await?;

        let created = self.repository.get_review(&mut tx, review.uuid).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn approve_review(&self, review: ReviewUuid) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.approve_review(&mut tx, review).await?;

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete_review(&self, review: ReviewUuid) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_review(&mut tx, review).await?;

        if rows_affected == 0 {
            return Err(ReviewsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Retrieves the reviews left on a product, newest first. The storefront
    /// passes `only_approved`; moderation views list everything.
    async fn list_product_reviews(
        &self,
        product: ProductUuid,
        only_approved: bool,
    ) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Records a review after validating its rating and text. New reviews
    /// await moderation.
    async fn create_review(&self, review: NewReview) -> Result<Review, ReviewsServiceError>;

    /// Marks a review as approved for storefront display.
    async fn approve_review(&self, review: ReviewUuid) -> Result<(), ReviewsServiceError>;

    /// Deletes a review with the given UUID.
    async fn delete_review(&self, review: ReviewUuid) -> Result<(), ReviewsServiceError>;
}
