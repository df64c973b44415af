//! In-memory authoritative state.
//!
//! The keyed read-mostly stores (characters, personas) sit on concurrent
//! maps; the story directory guards its cross-entry invariants (single
//! active pointer, creation order) behind a single lock and gives each
//! story its own mutex so sessions mutate independently.

mod characters;
mod personas;
mod stories;

pub use characters::CharacterRegistry;
pub use personas::PersonaStore;
pub use stories::StoryDirectory;
