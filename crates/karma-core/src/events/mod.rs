//! Domain events

mod score_event;

pub use score_event::ScoreChanged;
