//! Carousel service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::carousel::{
        errors::CarouselServiceError,
        models::{CarouselItem, CarouselItemUpdate, CarouselItemUuid, NewCarouselItem},
        repository::PgCarouselRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCarouselService {
    db: Db,
    repository: PgCarouselRepository,
}

impl PgCarouselService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCarouselRepository::new(),
        }
    }
}

#[async_trait]
impl CarouselService for PgCarouselService {
    async fn list_carousel_items(
        &self,
        only_active: bool,
    ) -> Result<Vec<CarouselItem>, CarouselServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_carousel_items(&mut tx, only_active)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn create_carousel_item(
        &self,
        item: NewCarouselItem,
    ) -> Result<CarouselItem, CarouselServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_carousel_item(&mut tx, &item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_carousel_item(
        &self,
        item: CarouselItemUuid,
        update: CarouselItemUpdate,
    ) -> Result<CarouselItem, CarouselServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_carousel_item(&mut tx, item, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_carousel_item(
        &self,
        item: CarouselItemUuid,
    ) -> Result<(), CarouselServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_carousel_item(&mut tx, item).await?;

        if rows_affected == 0 {
            return Err(CarouselServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CarouselService: Send + Sync {
    /// Retrieves banner slides in display order. The storefront passes
    /// `only_active`; the back office lists everything.
    async fn list_carousel_items(
        &self,
        only_active: bool,
    ) -> Result<Vec<CarouselItem>, CarouselServiceError>;

    /// Adds a banner slide.
    async fn create_carousel_item(
        &self,
        item: NewCarouselItem,
    ) -> Result<CarouselItem, CarouselServiceError>;

    /// Updates a banner slide.
    async fn update_carousel_item(
        &self,
        item: CarouselItemUuid,
        update: CarouselItemUpdate,
    ) -> Result<CarouselItem, CarouselServiceError>;

    /// Removes a banner slide.
    async fn delete_carousel_item(
        &self,
        item: CarouselItemUuid,
    ) -> Result<(), CarouselServiceError>;
}
