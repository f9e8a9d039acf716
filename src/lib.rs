// Cafe like star - like indicator for a cafe detail page
// Fetches the like status from the cafes API and toggles it on click

pub mod models;
pub mod client;
pub mod indicator;
pub mod controller;
pub mod debug;
pub mod config;
pub mod verbosity;

pub use models::{EntityId, IndicatorState, LikeAction, LikeStatus};
pub use client::{CafeLikesClient, LikesApi};
pub use indicator::{IndicatorHandle, StarIcon};
pub use controller::{ClickOutcome, LikeIndicatorController};
pub use config::LikeStarConfig;

pub type LikeResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Constants
pub const API_BASE_URL: &str = "http://localhost:5000/api";
pub const CONFIG_FILE: &str = "like_star.toml";
pub const API_LOG_FILE: &str = "api_debug.log";
