use serde::{Serialize, Serializer};
use std::fmt;

/// Identifier of the cafe the indicator reflects.
///
/// Taken verbatim from the last path segment of the page URL. Nothing is
/// validated: a malformed URL yields whatever token follows the final `/`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Everything after the last `/` of `page_url`, or the whole string when
    /// it contains no `/`.
    pub fn from_page_url(page_url: &str) -> Self {
        let token = match page_url.rfind('/') {
            Some(idx) => &page_url[idx + 1..],
            None => page_url,
        };
        Self(token.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form of the token, if it has one.
    pub fn as_number(&self) -> Option<i64> {
        self.0.parse::<i64>().ok()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Numeric ids go over the wire as JSON numbers ({"cafe_id": 42}).
impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_number() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

/// Whether the current user likes the cafe.
pub type LikeStatus = bool;

/// Visual state of the star icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Filled,
    Empty,
}

impl IndicatorState {
    pub fn from_status(likes: LikeStatus) -> Self {
        if likes {
            IndicatorState::Filled
        } else {
            IndicatorState::Empty
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            IndicatorState::Filled => IndicatorState::Empty,
            IndicatorState::Empty => IndicatorState::Filled,
        }
    }
}

/// Mutation a click sends to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeAction {
    Like,
    Unlike,
}

impl LikeAction {
    /// A liked cafe gets unliked, anything else gets liked.
    pub fn for_status(likes: LikeStatus) -> Self {
        if likes { LikeAction::Unlike } else { LikeAction::Like }
    }

    pub fn path(self) -> &'static str {
        match self {
            LikeAction::Like => "like",
            LikeAction::Unlike => "unlike",
        }
    }

    /// Like status once this action has been applied.
    pub fn resulting_status(self) -> LikeStatus {
        matches!(self, LikeAction::Like)
    }
}

impl fmt::Display for LikeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
