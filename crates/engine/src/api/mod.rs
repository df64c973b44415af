//! HTTP entry points.

mod character_routes;
mod chat_routes;
pub mod http;
mod persona_routes;
mod story_routes;

pub use http::{routes, ApiError};
