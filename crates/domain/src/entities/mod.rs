//! Domain entities.

mod character;
mod persona;
mod story;

pub use character::Character;
pub use persona::Persona;
pub use story::{Story, DEFAULT_MODEL};
