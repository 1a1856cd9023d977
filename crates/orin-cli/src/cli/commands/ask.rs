//! Ask command handler (one-shot question).
//!
//! Output contract: the reply goes to stdout, follow-up suggestions go
//! to stderr, so piped output stays clean.

use anyhow::{Context, Result};
use orin_core::assistant::Assistant;
use orin_core::chat::{ChatRequest, Message};
use orin_core::config::Config;
use orin_core::{directory, markdown};

pub async fn run(user_id: &str, prompt: &str, html: bool, config: &Config) -> Result<()> {
    let user = directory::find(user_id)
        .with_context(|| format!("User not found: {user_id}"))?;

    let assistant = Assistant::new(config.reply_delay());
    let request = ChatRequest {
        user_id: user.id.to_string(),
        messages: vec![Message::user(prompt)],
    };

    let response = assistant.send(&request).await.context("send chat request")?;

    if html {
        println!("{}", markdown::render(&response.reply));
    } else {
        println!("{}", response.reply);
    }

    if !response.follow_up_questions.is_empty() {
        eprintln!("Try asking:");
        for question in &response.follow_up_questions {
            eprintln!("  - {question}");
        }
    }

    Ok(())
}
