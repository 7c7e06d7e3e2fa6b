mod entity_type;
mod match_rating;
mod rating_submission;
mod team;

pub use entity_type::EntityType;
pub use match_rating::{MatchRating, NewMatchRating};
pub use rating_submission::{NewRatingSubmission, RatingSubmission};
pub use team::{Team, TeamClassification, UpsertTeam};
