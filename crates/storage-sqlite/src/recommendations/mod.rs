mod model;
mod repository;

pub use model::RecommendationDB;
pub use repository::RecommendationRepository;
