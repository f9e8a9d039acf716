// Client module - cafe likes API client
pub mod api;

pub use api::{CafeLikesClient, LikesApi};
