//! Character registry.

use std::collections::BTreeSet;

use dashmap::DashMap;

use taleweaver_domain::{Character, DomainError};

/// The set of defined characters, keyed by unique name. Read-mostly.
#[derive(Default)]
pub struct CharacterRegistry {
    characters: DashMap<String, Character>,
}

impl CharacterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character. Fails with `DuplicateId` if the name is taken.
    pub fn add(&self, character: Character) -> Result<(), DomainError> {
        match self.characters.entry(character.name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                Err(DomainError::duplicate_id("Character", character.name))
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(character);
                Ok(())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<Character> {
        self.characters.get(name).map(|c| c.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.characters.contains_key(name)
    }

    /// All characters, sorted by name for stable rendering.
    pub fn list(&self) -> Vec<Character> {
        let mut all: Vec<Character> = self
            .characters
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Resolve names against the registry, in registry order, skipping any
    /// that are stale.
    pub fn resolve_present<'a>(
        &self,
        names: impl IntoIterator<Item = &'a String>,
    ) -> Vec<Character> {
        let mut found: Vec<Character> =
            names.into_iter().filter_map(|n| self.get(n)).collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found
    }

    /// Keep only names the registry knows. Unknown names are dropped with a
    /// recorded warning, never a hard failure - stale client references must
    /// not break the session.
    pub fn filter_known(&self, names: impl IntoIterator<Item = String>) -> BTreeSet<String> {
        let mut known = BTreeSet::new();
        for name in names {
            if self.contains(&name) {
                known.insert(name);
            } else {
                tracing::warn!(character = %name, "Dropping unknown character from scene");
            }
        }
        known
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Replace the registry contents (snapshot restore).
    pub fn restore(&self, characters: Vec<Character>) {
        self.characters.clear();
        for character in characters {
            self.characters.insert(character.name.clone(), character);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lyra() -> Character {
        Character::new("Lyra", "*shimmer*", "archivist", "lyra").expect("character")
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let registry = CharacterRegistry::new();
        registry.add(lyra()).expect("first add");
        assert!(matches!(
            registry.add(lyra()),
            Err(DomainError::DuplicateId { .. })
        ));
    }

    #[test]
    fn list_is_sorted_by_name() {
        let registry = CharacterRegistry::new();
        registry
            .add(Character::new("Zeph", "", "", "zeph").expect("character"))
            .expect("add");
        registry.add(lyra()).expect("add");
        let names: Vec<_> = registry.list().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Lyra", "Zeph"]);
    }

    #[test]
    fn filter_known_drops_stale_names() {
        let registry = CharacterRegistry::new();
        registry.add(lyra()).expect("add");
        let kept = registry.filter_known(vec!["Lyra".to_string(), "Ghost".to_string()]);
        assert!(kept.contains("Lyra"));
        assert!(!kept.contains("Ghost"));
    }

    #[test]
    fn resolve_present_skips_missing_references() {
        let registry = CharacterRegistry::new();
        registry.add(lyra()).expect("add");
        let names = vec!["Lyra".to_string(), "Ghost".to_string()];
        let resolved = registry.resolve_present(names.iter());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name, "Lyra");
    }
}
