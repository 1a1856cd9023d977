//! Render command handler.

use std::io::Read;

use anyhow::{Context, Result};
use orin_core::markdown;

pub fn run(text: Option<&str>) -> Result<()> {
    let input = match text {
        Some(text) => text.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .lock()
                .read_to_string(&mut buf)
                .context("read markdown from stdin")?;
            buf
        }
    };

    println!("{}", markdown::render(&input));
    Ok(())
}
