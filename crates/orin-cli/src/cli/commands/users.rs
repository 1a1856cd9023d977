//! Users command handlers.

use anyhow::{Result, bail};
use orin_core::config::Config;
use orin_core::directory;

pub fn search(query: &str, json: bool, config: &Config) -> Result<()> {
    let ids = directory::search_ids(query, config.suggestion_limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&ids)?);
    } else {
        for id in ids {
            println!("{id}");
        }
    }

    Ok(())
}

pub fn show(id: &str, json: bool) -> Result<()> {
    let Some(user) = directory::find(id) else {
        bail!("User not found: {id}");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(user)?);
    } else {
        println!("User: {}", user.id);
        println!("Devices:");
        for device in user.devices {
            println!("  - {device}");
        }
        println!("API token: {}", user.api_token);
    }

    Ok(())
}
