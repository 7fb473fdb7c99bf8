pub mod component_scores;
pub mod export;
pub mod model_config;
pub mod persist;
pub mod predict;
pub mod ratings;
pub mod ratings_cache;
pub mod sample_data;
pub mod season_load;
pub mod state;
pub mod table;
