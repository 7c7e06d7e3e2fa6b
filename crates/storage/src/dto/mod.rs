pub mod common;
pub mod match_rating;
pub mod team;
