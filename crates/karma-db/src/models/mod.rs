//! Database row models

mod score;

pub use score::ScoreModel;
