//! Carousel Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::carousel::models::{
    CarouselItem, CarouselItemUpdate, CarouselItemUuid, NewCarouselItem,
};

const LIST_CAROUSEL_ITEMS_SQL: &str = include_str!("sql/list_carousel_items.sql");
const CREATE_CAROUSEL_ITEM_SQL: &str = include_str!("sql/create_carousel_item.sql");
const UPDATE_CAROUSEL_ITEM_SQL: &str = include_str!("sql/update_carousel_item.sql");
const DELETE_CAROUSEL_ITEM_SQL: &str = include_str!("sql/delete_carousel_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCarouselRepository;

impl PgCarouselRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_carousel_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        only_active: bool,
    ) -> Result<Vec<CarouselItem>, sqlx::Error> {
        query_as::<Postgres, CarouselItem>(LIST_CAROUSEL_ITEMS_SQL)
            .bind(only_active)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_carousel_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: &NewCarouselItem,
    ) -> Result<CarouselItem, sqlx::Error> {
        query_as::<Postgres, CarouselItem>(CREATE_CAROUSEL_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(&item.image_src)
            .bind(&item.alt_text)
            .bind(&item.title)
            .bind(&item.subtitle)
            .bind(&item.button_link)
            .bind(&item.button_text)
            .bind(item.position)
            .bind(item.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_carousel_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CarouselItemUuid,
        update: &CarouselItemUpdate,
    ) -> Result<CarouselItem, sqlx::Error> {
        query_as::<Postgres, CarouselItem>(UPDATE_CAROUSEL_ITEM_SQL)
            .bind(item.into_uuid())
            .bind(&update.image_src)
            .bind(&update.alt_text)
            .bind(&update.title)
            .bind(&update.subtitle)
            .bind(&update.button_link)
            .bind(&update.button_text)
            .bind(update.position)
            .bind(update.is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_carousel_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        item: CarouselItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CAROUSEL_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CarouselItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CarouselItemUuid::from_uuid(row.try_get("uuid")?),
            image_src: row.try_get("image_src")?,
            alt_text: row.try_get("alt_text")?,
            title: row.try_get("title")?,
            subtitle: row.try_get("subtitle")?,
            button_link: row.try_get("button_link")?,
            button_text: row.try_get("button_text")?,
            position: row.try_get("position")?,
            is_active: row.try_get("is_active")?,
        })
    }
}
