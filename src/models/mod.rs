// Models module - likes domain types and API payloads

pub mod like;
pub mod responses;

pub use like::*;
pub use responses::*;
