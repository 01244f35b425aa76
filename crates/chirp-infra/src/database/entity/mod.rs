//! SeaORM entities and their domain conversions.

pub mod comment;
pub mod follow;
pub mod like;
pub mod profile;
pub mod tweet;
pub mod user;
