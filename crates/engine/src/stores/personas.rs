//! Persona store.

use dashmap::DashMap;

use taleweaver_domain::{DomainError, Persona};

/// Named user personas, keyed by name. Independent of characters and
/// sessions; CRUD only.
#[derive(Default)]
pub struct PersonaStore {
    personas: DashMap<String, Persona>,
}

impl PersonaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a persona under its name.
    pub fn upsert(&self, persona: Persona) -> Persona {
        self.personas
            .insert(persona.name.clone(), persona.clone());
        persona
    }

    /// Update an existing persona's description.
    pub fn update(&self, name: &str, description: String) -> Result<Persona, DomainError> {
        match self.personas.get_mut(name) {
            Some(mut entry) => {
                entry.description = description;
                Ok(entry.clone())
            }
            None => Err(DomainError::not_found("Persona", name)),
        }
    }

    pub fn delete(&self, name: &str) -> Result<(), DomainError> {
        self.personas
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Persona", name))
    }

    pub fn get(&self, name: &str) -> Option<Persona> {
        self.personas.get(name).map(|p| p.clone())
    }

    /// The speaking identity for a turn: the named persona if it exists,
    /// otherwise the guest identity.
    pub fn resolve_voice(&self, name: Option<&str>) -> Persona {
        name.and_then(|n| self.get(n)).unwrap_or_else(Persona::guest)
    }

    pub fn list(&self) -> Vec<Persona> {
        let mut all: Vec<Persona> = self
            .personas
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Replace the store contents (snapshot restore).
    pub fn restore(&self, personas: Vec<Persona>) {
        self.personas.clear();
        for persona in personas {
            self.personas.insert(persona.name.clone(), persona);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_overwrites_existing() {
        let store = PersonaStore::new();
        store.upsert(Persona::new("Alex", "old"));
        store.upsert(Persona::new("Alex", "new"));
        assert_eq!(store.get("Alex").map(|p| p.description), Some("new".into()));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn update_missing_persona_is_not_found() {
        let store = PersonaStore::new();
        assert!(matches!(
            store.update("Nobody", "desc".into()),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_missing_persona_is_not_found() {
        let store = PersonaStore::new();
        store.upsert(Persona::new("Alex", "desc"));
        store.delete("Alex").expect("delete");
        assert!(matches!(
            store.delete("Alex"),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn unknown_voice_falls_back_to_guest() {
        let store = PersonaStore::new();
        assert_eq!(store.resolve_voice(Some("Nobody")).name, "Guest");
        assert_eq!(store.resolve_voice(None).name, "Guest");
        store.upsert(Persona::new("Alex", "An adventurer."));
        assert_eq!(store.resolve_voice(Some("Alex")).name, "Alex");
    }
}
