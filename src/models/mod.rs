pub mod movie;
pub mod recommendation;

pub use movie::{CrewMember, MovieId, MovieRecord};
pub use recommendation::{EnrichedRecommendation, MovieDetails, Recommendation};
