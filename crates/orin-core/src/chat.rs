//! Chat wire types, request validation, and the interactive loop.
//!
//! The wire shapes mirror the prototype's JSON API: a request carries
//! the full message history for one user, a response carries the reply
//! plus suggested follow-up questions. The REPL keeps history in memory
//! only; nothing is persisted.

use std::fmt;
use std::io::{BufRead, Write};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assistant::Assistant;
use crate::config::Config;
use crate::directory::{self, UserRecord};
use crate::markdown;

const QUIT_COMMAND: &str = ":q";
const PROMPT_PREFIX: &str = "you> ";
const ASSISTANT_PREFIX: &str = "orin> ";

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A chat message with owned data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A chat request: the full message history for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// Returns the content of the last user-authored message.
    ///
    /// # Errors
    /// `InvalidRequest` for a blank user ID or empty history;
    /// `NoUserMessage` when no message carries the user role.
    pub fn latest_user_message(&self) -> Result<&str, ChatError> {
        if self.user_id.trim().is_empty() || self.messages.is_empty() {
            return Err(ChatError::invalid_request("Invalid request format"));
        }

        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.as_str())
            .ok_or_else(ChatError::no_user_message)
    }
}

/// A canned assistant response with suggested follow-up questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub follow_up_questions: Vec<String>,
}

/// Categories of rejected chat requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// Request shape is invalid (blank user ID, empty history)
    InvalidRequest,
    /// History contains no user-authored message
    NoUserMessage,
}

/// Structured error for rejected chat requests.
#[derive(Debug, Clone)]
pub struct ChatError {
    /// Error category
    pub kind: ChatErrorKind,
    /// One-line summary suitable for display
    pub message: String,
}

impl ChatError {
    /// Creates an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: ChatErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    /// Creates a no-user-message error.
    pub fn no_user_message() -> Self {
        Self {
            kind: ChatErrorKind::NoUserMessage,
            message: "No user message found".to_string(),
        }
    }
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ChatError {}

/// Options for the interactive chat loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatOptions {
    /// Print assistant replies as rendered HTML fragments instead of text.
    pub html: bool,
}

/// Runs the interactive chat loop.
///
/// Reads user input from `input`, writes replies to `output`. Exits on
/// `:q` or EOF. Each turn sends the accumulated history, so the
/// assistant always answers the latest user message.
pub async fn run_chat<R, W>(
    input: R,
    output: &mut W,
    user: &UserRecord,
    assistant: &Assistant,
    options: ChatOptions,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut history: Vec<Message> = Vec::new();

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        // Handle quit command
        if trimmed == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            break;
        }

        // Skip empty lines
        if trimmed.is_empty() {
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        history.push(Message::user(trimmed));
        let request = ChatRequest {
            user_id: user.id.to_string(),
            messages: history.clone(),
        };
        debug!(messages = request.messages.len(), "sending chat request");

        let response = match assistant.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                writeln!(output, "Error: {e}")?;
                // Remove the failed user message from history
                history.pop();
                write!(output, "{PROMPT_PREFIX}")?;
                output.flush()?;
                continue;
            }
        };

        let shown = if options.html {
            markdown::render(&response.reply)
        } else {
            response.reply.clone()
        };
        writeln!(output, "{ASSISTANT_PREFIX}{shown}")?;

        if !response.follow_up_questions.is_empty() {
            writeln!(output, "Try asking:")?;
            for question in &response.follow_up_questions {
                writeln!(output, "  - {question}")?;
            }
        }

        history.push(Message::assistant(response.reply));

        write!(output, "{PROMPT_PREFIX}")?;
        output.flush()?;
    }

    Ok(())
}

/// Runs the chat loop on stdin/stdout with a welcome banner.
///
/// The user ID must be registered in the directory; their devices are
/// listed before the first prompt, like the prototype's sidebar.
pub async fn run_interactive_chat(
    config: &Config,
    user_id: &str,
    options: ChatOptions,
) -> Result<()> {
    let user =
        directory::find(user_id).ok_or_else(|| anyhow::anyhow!("User not found: {user_id}"))?;

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "ORIN Chat (type :q to quit)")?;
    writeln!(
        stdout,
        "User {} has {} registered device(s):",
        user.id,
        user.devices.len()
    )?;
    for device in user.devices {
        writeln!(stdout, "  - {device}")?;
    }
    write!(stdout, "{PROMPT_PREFIX}")?;
    stdout.flush()?;

    let assistant = Assistant::new(config.reply_delay());
    run_chat(stdin.lock(), &mut stdout, user, &assistant, options).await
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::time::Duration;

    use super::*;

    fn test_assistant() -> Assistant {
        Assistant::new(Duration::ZERO)
    }

    fn seed_user() -> &'static UserRecord {
        directory::find("41651").expect("seed user should exist")
    }

    #[test]
    fn test_message_wire_format() {
        let message = Message::user("hi");
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);

        let parsed: Message = serde_json::from_str(r#"{"role":"assistant","content":"ok"}"#).unwrap();
        assert_eq!(parsed.role, Role::Assistant);
    }

    #[test]
    fn test_chat_response_wire_format() {
        let response = ChatResponse {
            reply: "sure".to_string(),
            follow_up_questions: vec!["and then?".to_string()],
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""reply":"sure""#));
        assert!(json.contains(r#""follow_up_questions":["and then?"]"#));
    }

    #[test]
    fn test_latest_user_message_picks_last() {
        let request = ChatRequest {
            user_id: "41651".to_string(),
            messages: vec![
                Message::user("first"),
                Message::assistant("reply"),
                Message::user("second"),
            ],
        };
        assert_eq!(request.latest_user_message().unwrap(), "second");
    }

    #[test]
    fn test_blank_user_id_is_invalid() {
        let request = ChatRequest {
            user_id: "  ".to_string(),
            messages: vec![Message::user("hi")],
        };
        let err = request.latest_user_message().unwrap_err();
        assert_eq!(err.kind, ChatErrorKind::InvalidRequest);
    }

    #[test]
    fn test_assistant_only_history_has_no_user_message() {
        let request = ChatRequest {
            user_id: "41651".to_string(),
            messages: vec![Message::assistant("hello from me")],
        };
        let err = request.latest_user_message().unwrap_err();
        assert_eq!(err.kind, ChatErrorKind::NoUserMessage);
    }

    #[tokio::test]
    async fn test_run_chat_replies_and_quits() {
        let input = Cursor::new("hello\n:q\n");
        let mut output = Vec::new();

        run_chat(
            input,
            &mut output,
            seed_user(),
            &test_assistant(),
            ChatOptions::default(),
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("orin> Hello! I'm ORIN AI"));
        assert!(output.contains("Try asking:"));
        assert!(output.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_run_chat_skips_empty_lines() {
        let input = Cursor::new("\n\n:q\n");
        let mut output = Vec::new();

        run_chat(
            input,
            &mut output,
            seed_user(),
            &test_assistant(),
            ChatOptions::default(),
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(!output.contains("orin>"));
        assert!(output.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_run_chat_exits_on_eof() {
        let input = Cursor::new("fuel\n");
        let mut output = Vec::new();

        run_chat(
            input,
            &mut output,
            seed_user(),
            &test_assistant(),
            ChatOptions::default(),
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("fuel efficiency"));
        assert!(!output.contains("Goodbye!"));
    }

    #[tokio::test]
    async fn test_run_chat_html_mode_renders_replies() {
        let input = Cursor::new("fuel\n:q\n");
        let mut output = Vec::new();

        run_chat(
            input,
            &mut output,
            seed_user(),
            &test_assistant(),
            ChatOptions { html: true },
        )
        .await
        .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("<ul><li><strong>Regular maintenance</strong>"));
        // Follow-up suggestions stay plain text
        assert!(output.contains("Try asking:"));
    }
}
