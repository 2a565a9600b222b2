//! Carousel Models

use crate::uuids::TypedUuid;

/// Carousel item UUID
pub type CarouselItemUuid = TypedUuid<CarouselItem>;

/// A storefront banner slide.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselItem {
    pub uuid: CarouselItemUuid,
    pub image_src: String,
    pub alt_text: String,
    pub title: String,
    pub subtitle: String,
    pub button_link: String,
    pub button_text: String,
    pub position: i32,
    pub is_active: bool,
}

/// New Carousel Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCarouselItem {
    pub uuid: CarouselItemUuid,
    pub image_src: String,
    pub alt_text: String,
    pub title: String,
    pub subtitle: String,
    pub button_link: String,
    pub button_text: String,
    pub position: i32,
    pub is_active: bool,
}

/// Carousel Item Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselItemUpdate {
    pub image_src: String,
    pub alt_text: String,
    pub title: String,
    pub subtitle: String,
    pub button_link: String,
    pub button_text: String,
    pub position: i32,
    pub is_active: bool,
}
