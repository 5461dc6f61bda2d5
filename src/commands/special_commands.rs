//! Special commands parser for interactive chat mode
//!
//! Special commands are entered at the chat prompt and act on the session
//! instead of being submitted to the assistant:
//! - Switch assistant mode or tutor settings
//! - Show status, history and help
//! - Clear the conversation
//! - Dictate a message through the speech path
//! - Exit the session
//!
//! Commands are prefixed with `/` and are case-insensitive. The text given
//! to `/voice` keeps its original case.

use crate::assistant_mode::AssistantMode;
use crate::responders::{AgeGroup, Subject};
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Switch to a different assistant
    ///
    /// Refused while a reply is pending.
    SwitchMode(AssistantMode),

    /// Change the tutor subject
    SwitchSubject(Subject),

    /// Change the tutor age group
    SwitchAgeGroup(AgeGroup),

    /// Display mode, session and busy status
    ShowStatus,

    /// Print every message in the session
    ShowHistory,

    /// Empty the conversation and release the busy flag
    Clear,

    /// Dictate the given text through the speech path
    Voice(String),

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command
    ///
    /// The input should be submitted to the assistant.
    None,
}

/// Parse a user input string into a special command
///
/// # Arguments
///
/// * `input` - The user input string to parse
///
/// # Returns
///
/// Returns Ok(SpecialCommand) for valid commands or SpecialCommand::None for non-commands.
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is not a valid command.
/// Returns CommandError::UnsupportedArgument if a command receives an invalid argument.
/// Returns CommandError::MissingArgument if a command requires an argument but none was provided.
///
/// # Examples
///
/// ```
/// use edcare::assistant_mode::AssistantMode;
/// use edcare::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// let cmd = parse_special_command("/mode math").unwrap();
/// assert_eq!(cmd, SpecialCommand::SwitchMode(AssistantMode::Math));
///
/// let cmd = parse_special_command("hello there").unwrap();
/// assert_eq!(cmd, SpecialCommand::None);
///
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    // Only exit/quit are recognised without the leading slash
    if !trimmed.starts_with('/') && lower != "exit" && lower != "quit" {
        return Ok(SpecialCommand::None);
    }

    match lower.as_str() {
        "/mode" => Err(CommandError::MissingArgument {
            command: "/mode".to_string(),
            usage: format!("/mode <{}>", mode_names()),
        }),
        input if input.starts_with("/mode ") => {
            let arg = input[6..].trim();
            AssistantMode::parse_str(arg)
                .map(SpecialCommand::SwitchMode)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/mode".to_string(),
                    arg: arg.to_string(),
                })
        }

        "/subject" => Err(CommandError::MissingArgument {
            command: "/subject".to_string(),
            usage: "/subject <math|science|english|history|geography>".to_string(),
        }),
        input if input.starts_with("/subject ") => {
            let arg = input[9..].trim();
            arg.parse::<Subject>()
                .map(SpecialCommand::SwitchSubject)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/subject".to_string(),
                    arg: arg.to_string(),
                })
        }

        "/age" => Err(CommandError::MissingArgument {
            command: "/age".to_string(),
            usage: "/age <preschool|elementary|middle|high>".to_string(),
        }),
        input if input.starts_with("/age ") => {
            let arg = input[5..].trim();
            arg.parse::<AgeGroup>()
                .map(SpecialCommand::SwitchAgeGroup)
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/age".to_string(),
                    arg: arg.to_string(),
                })
        }

        "/voice" => Err(CommandError::MissingArgument {
            command: "/voice".to_string(),
            usage: "/voice <what you say>".to_string(),
        }),
        input if input.starts_with("/voice ") => {
            // Slice the untouched input so the dictated text keeps its case
            let spoken = trimmed[7..].trim();
            Ok(SpecialCommand::Voice(spoken.to_string()))
        }

        "/status" => Ok(SpecialCommand::ShowStatus),
        "/history" => Ok(SpecialCommand::ShowHistory),
        "/clear" => Ok(SpecialCommand::Clear),
        "/help" | "/?" => Ok(SpecialCommand::Help),

        "exit" | "quit" | "/exit" | "/quit" => Ok(SpecialCommand::Exit),

        input if input.starts_with('/') => {
            let cmd = input.split_whitespace().next().unwrap_or(input);
            Err(CommandError::UnknownCommand(cmd.to_string()))
        }

        _ => Ok(SpecialCommand::None),
    }
}

fn mode_names() -> String {
    AssistantMode::ALL
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join("|")
}

/// Display help text for special commands
pub fn print_help() {
    println!(
        r#"
Special Commands for Interactive Chat Mode
===========================================

ASSISTANT:
  /mode <name>    - Switch assistant ({modes})
  /subject <name> - Tutor subject (math, science, english, history, geography)
  /age <group>    - Tutor age group (preschool, elementary, middle, high)

INPUT:
  /voice <text>   - Dictate <text> through the microphone path

SESSION:
  /status         - Show assistant and session status
  /history        - Show every message in this session
  /clear          - Clear the conversation
  /help           - Show this help message
  /?              - Same as /help

SESSION CONTROL:
  exit            - Exit interactive mode
  quit            - Same as exit

NOTES:
  - Commands are case-insensitive
  - Regular text (not starting with /) is sent to the assistant
  - Nothing can be sent while the assistant is preparing a reply
  - The assistant can not be changed while a reply is pending
"#,
        modes = mode_names().replace('|', ", ")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode_switch() {
        assert_eq!(
            parse_special_command("/mode tutor").unwrap(),
            SpecialCommand::SwitchMode(AssistantMode::Tutor)
        );
        assert_eq!(
            parse_special_command("/MODE Health").unwrap(),
            SpecialCommand::SwitchMode(AssistantMode::Health)
        );
    }

    #[test]
    fn test_parse_mode_missing_argument() {
        let err = parse_special_command("/mode").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { .. }));
        assert!(err.to_string().contains("chat|math|tutor"));
    }

    #[test]
    fn test_parse_mode_unsupported_argument() {
        assert_eq!(
            parse_special_command("/mode cooking").unwrap_err(),
            CommandError::UnsupportedArgument {
                command: "/mode".to_string(),
                arg: "cooking".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_subject_and_age() {
        assert_eq!(
            parse_special_command("/subject science").unwrap(),
            SpecialCommand::SwitchSubject(Subject::Science)
        );
        assert_eq!(
            parse_special_command("/age high").unwrap(),
            SpecialCommand::SwitchAgeGroup(AgeGroup::High)
        );
        assert!(parse_special_command("/subject art").is_err());
        assert!(parse_special_command("/age").is_err());
    }

    #[test]
    fn test_parse_voice_keeps_case() {
        assert_eq!(
            parse_special_command("/voice What Is Gravity").unwrap(),
            SpecialCommand::Voice("What Is Gravity".to_string())
        );
    }

    #[test]
    fn test_parse_voice_missing_text() {
        assert!(matches!(
            parse_special_command("/voice   ").unwrap_err(),
            CommandError::MissingArgument { .. }
        ));
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(
            parse_special_command("/status").unwrap(),
            SpecialCommand::ShowStatus
        );
        assert_eq!(
            parse_special_command("/history").unwrap(),
            SpecialCommand::ShowHistory
        );
        assert_eq!(parse_special_command("/clear").unwrap(), SpecialCommand::Clear);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_parse_exit_aliases() {
        for input in ["exit", "QUIT", "/exit", "/quit", "  exit  "] {
            assert_eq!(parse_special_command(input).unwrap(), SpecialCommand::Exit);
        }
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse_special_command("/dance now").unwrap_err(),
            CommandError::UnknownCommand("/dance".to_string())
        );
    }

    #[test]
    fn test_regular_text_is_not_a_command() {
        assert_eq!(
            parse_special_command("what is 7 x 8?").unwrap(),
            SpecialCommand::None
        );
        assert_eq!(
            parse_special_command("exit the building").unwrap(),
            SpecialCommand::None
        );
    }
}
