//! Loyalty handlers.

mod get_level_progress;

pub use get_level_progress::{
    GetLevelProgressHandler, GetLevelProgressQuery, GetLevelProgressResult, LevelProgressView,
};
