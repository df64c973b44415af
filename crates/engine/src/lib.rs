//! Taleweaver Engine library.
//!
//! This crate contains all server-side code for the narrator session engine.
//!
//! ## Structure
//!
//! - `stores/` - in-memory authoritative state (characters, personas, stories)
//! - `use_cases/` - the turn router and narration operations
//! - `infrastructure/` - external dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
