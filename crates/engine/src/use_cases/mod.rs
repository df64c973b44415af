//! User story orchestration.

mod narration;
mod turn;

pub use narration::NarrationOps;
pub use turn::{TurnError, TurnOutcome, TurnRouter, CHAT_MAX_TOKENS, CHAT_TEMPERATURE};
