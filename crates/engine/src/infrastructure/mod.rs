//! External dependency implementations.
//!
//! `ports` holds the only abstraction in the engine: the LLM boundary
//! (could swap Ollama -> Claude/OpenAI). Everything else is concrete types.

pub mod ollama;
pub mod ports;
pub mod prompts;
pub mod snapshot;
