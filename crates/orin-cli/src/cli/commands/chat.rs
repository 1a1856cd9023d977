//! Chat command handler.

use anyhow::{Context, Result};
use orin_core::chat::{self, ChatOptions};
use orin_core::config::Config;

pub async fn run(user_id: &str, html: bool, config: &Config) -> Result<()> {
    chat::run_interactive_chat(config, user_id, ChatOptions { html })
        .await
        .context("interactive chat failed")
}
