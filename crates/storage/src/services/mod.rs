pub mod match_ratings;
pub mod rating_aggregation;
