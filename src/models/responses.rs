use serde::{Deserialize, Serialize};

use crate::models::EntityId;

// API payloads

#[derive(Debug, Deserialize)]
pub struct LikesResponse {
    /// Absent when the API answers with an error object; reads as not liked.
    #[serde(default)]
    pub likes: bool,
}

#[derive(Debug, Serialize)]
pub struct ToggleRequest<'a> {
    pub cafe_id: &'a EntityId,
}
