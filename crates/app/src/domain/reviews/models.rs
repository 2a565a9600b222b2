//! Review Models

use jiff::Timestamp;

use crate::{
    domain::{products::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<Review>;

/// Shortest review text accepted.
pub const MIN_REVIEW_TEXT_LEN: usize = 10;

/// Review Model
#[derive(Debug, Clone)]
pub struct Review {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub user_uuid: UserUuid,
    pub reviewer_name: String,
    pub reviewer_type: String,
    pub rating: u8,
    pub review_text: String,
    pub approved: bool,
    pub created_at: Timestamp,
}

/// New Review Model
///
/// Reviews start unapproved and become visible once moderated.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub user_uuid: UserUuid,
    pub reviewer_type: String,
    pub rating: u8,
    pub review_text: String,
}
