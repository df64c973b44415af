//! Taleweaver Domain - core story, character, and persona types.
//!
//! This crate owns the vocabulary of the narrator engine:
//!
//! - `entities/` - Character, Persona, and the Story session record
//! - `story_time` - the in-fiction clock (day + time-of-day cycle)
//! - `memory` - bounded short-term conversation memory
//! - `command` - slash-command parsing for chat messages
//! - `error` - the domain error taxonomy
//!
//! No I/O and no clocks live here; timestamps are injected by callers.

pub mod command;
pub mod entities;
pub mod error;
pub mod memory;
pub mod story_time;

pub use command::Command;
pub use entities::{Character, Persona, Story, DEFAULT_MODEL};
pub use error::DomainError;
pub use memory::{ShortTermMemory, TurnRecord, TurnRole};
pub use story_time::{StoryClock, TimeOfDay};
