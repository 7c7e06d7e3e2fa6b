pub mod match_ratings;
pub mod teams;
