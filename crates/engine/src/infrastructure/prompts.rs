//! Prompt assembly for narrator turns.
//!
//! The engine tells the model how to mark attribution: lines spoken by a
//! character must start with `Name:`; everything else is read as narration.
//! The turn router parses replies with that convention.

use std::fmt::Write as _;

use taleweaver_domain::{Character, Persona, StoryClock};

/// System prompt for a narrator turn over the active story.
pub fn narrator_system_prompt(
    scene: &str,
    clock: &StoryClock,
    present: &[Character],
    persona: &Persona,
) -> String {
    let mut prompt = String::from(
        "You are the narrator of an interactive story. Narrate vividly and \
         keep continuity with the scene and the characters present.\n",
    );

    let _ = writeln!(prompt, "It is {}.", clock.display());

    if scene.is_empty() {
        prompt.push_str("The scene has not been described yet.\n");
    } else {
        let _ = writeln!(prompt, "Current scene: {scene}");
    }

    if present.is_empty() {
        prompt.push_str("No characters are currently in the scene.\n");
    } else {
        prompt.push_str("Characters in the scene:\n");
        for character in present {
            let _ = writeln!(prompt, "- {}: {}", character.name, character.background);
        }
    }

    let _ = writeln!(
        prompt,
        "The user speaks as {} ({}).",
        persona.name, persona.description
    );

    prompt.push_str(
        "When a character in the scene speaks, begin your reply with their \
         name followed by a colon, e.g. `Lyra: ...`. Otherwise reply with \
         plain narration.",
    );

    prompt
}

/// User message for a forced narrator turn (POST /narrator/direct).
pub fn direct_scene_prompt(prompt: Option<&str>) -> String {
    match prompt {
        Some(p) if !p.trim().is_empty() => format!(
            "As the narrator, describe what happens next, guided by: {}",
            p.trim()
        ),
        _ => "As the narrator, describe what happens next in the scene.".to_string(),
    }
}

/// User message asking for a new-character sketch.
pub fn suggest_character_prompt(prompt: Option<&str>) -> String {
    let mut text = String::from(
        "Suggest a new character who would fit this story. Give a name, a \
         one-line introduction, and a short background.",
    );
    if let Some(p) = prompt {
        if !p.trim().is_empty() {
            let _ = write!(text, " The character should be: {}", p.trim());
        }
    }
    text
}
