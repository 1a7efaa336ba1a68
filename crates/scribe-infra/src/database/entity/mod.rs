//! SeaORM entities for the Scribe schema.

pub mod category;
pub mod draft;
pub mod interest;
pub mod interest_category;
pub mod interest_follow;
pub mod post;
pub mod post_comment;
pub mod post_like;
