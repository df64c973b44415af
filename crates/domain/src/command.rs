//! Slash-command parsing for chat messages.
//!
//! A chat message beginning with `/` is a direct session mutation rather than
//! in-character dialogue. Parsing happens once at the boundary; the turn
//! router matches the resulting variant exhaustively.

use crate::error::DomainError;

/// A recognized slash-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/add <name>` - bring a registered character into the scene.
    Add(String),
    /// `/remove <name>` - send a character out of the scene.
    Remove(String),
    /// `/time next` - advance the story clock one phase.
    TimeNext,
}

impl Command {
    /// Parse a chat message.
    ///
    /// Returns `None` for ordinary dialogue (no leading `/`). Messages that
    /// do start with `/` either parse to a command or fail with
    /// `UnknownCommand` / `Validation`; they are never treated as dialogue.
    pub fn parse(message: &str) -> Option<Result<Self, DomainError>> {
        let body = message.trim().strip_prefix('/')?;
        Some(Self::parse_body(body))
    }

    fn parse_body(body: &str) -> Result<Self, DomainError> {
        let mut words = body.split_whitespace();
        let verb = words.next().unwrap_or_default();
        // Character names may contain spaces; everything after the verb is
        // the argument.
        let arg = words.collect::<Vec<_>>().join(" ");

        match verb {
            "add" => {
                if arg.is_empty() {
                    Err(DomainError::validation("/add requires a character name"))
                } else {
                    Ok(Command::Add(arg))
                }
            }
            "remove" => {
                if arg.is_empty() {
                    Err(DomainError::validation("/remove requires a character name"))
                } else {
                    Ok(Command::Remove(arg))
                }
            }
            "time" if arg == "next" => Ok(Command::TimeNext),
            _ => Err(DomainError::UnknownCommand(body.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_dialogue_is_not_a_command() {
        assert!(Command::parse("Hello there").is_none());
        assert!(Command::parse("what does /add do?").is_none());
    }

    #[test]
    fn parses_add_and_remove() {
        assert_eq!(
            Command::parse("/add Lyra"),
            Some(Ok(Command::Add("Lyra".into())))
        );
        assert_eq!(
            Command::parse("/remove Lyra"),
            Some(Ok(Command::Remove("Lyra".into())))
        );
    }

    #[test]
    fn multiword_names_are_kept_whole() {
        assert_eq!(
            Command::parse("/add The Archivist"),
            Some(Ok(Command::Add("The Archivist".into())))
        );
    }

    #[test]
    fn parses_time_next() {
        assert_eq!(Command::parse("/time next"), Some(Ok(Command::TimeNext)));
    }

    #[test]
    fn unknown_commands_fail_without_falling_through() {
        match Command::parse("/dance") {
            Some(Err(DomainError::UnknownCommand(body))) => assert_eq!(body, "dance"),
            other => panic!("expected UnknownCommand, got {other:?}"),
        }
        // `/time tomorrow` is not the recognized form.
        assert!(matches!(
            Command::parse("/time tomorrow"),
            Some(Err(DomainError::UnknownCommand(_)))
        ));
    }

    #[test]
    fn missing_argument_is_a_validation_error() {
        assert!(matches!(
            Command::parse("/add"),
            Some(Err(DomainError::Validation(_)))
        ));
        assert!(matches!(
            Command::parse("/remove   "),
            Some(Err(DomainError::Validation(_)))
        ));
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        assert_eq!(
            Command::parse("  /time next"),
            Some(Ok(Command::TimeNext))
        );
    }
}
