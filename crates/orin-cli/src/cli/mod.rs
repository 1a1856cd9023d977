//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use orin_core::config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "orin")]
#[command(version = "0.1")]
#[command(about = "ORIN vehicle telemetry assistant demo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Chat as this registered user ID (the default command is `chat`)
    #[arg(long, value_name = "ID")]
    user: Option<String>,

    /// Print assistant replies as rendered HTML fragments
    #[arg(long)]
    html: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Starts an interactive chat with the assistant
    Chat {
        /// Registered user ID to chat as
        #[arg(long, value_name = "ID")]
        user: String,

        /// Print assistant replies as rendered HTML fragments
        #[arg(long)]
        html: bool,
    },

    /// Asks a single question and prints the reply
    Ask {
        /// Registered user ID to ask as
        #[arg(long, value_name = "ID")]
        user: String,

        /// The question to send to the assistant
        #[arg(short, long)]
        prompt: String,

        /// Print the reply as a rendered HTML fragment
        #[arg(long)]
        html: bool,
    },

    /// Renders markdown text to an HTML fragment
    Render {
        /// Text to render (reads stdin when omitted)
        text: Option<String>,
    },

    /// Look up registered users
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum UserCommands {
    /// Lists user IDs matching a query
    Search {
        /// Substring to match against user IDs (case-insensitive)
        #[arg(default_value = "")]
        query: String,

        /// Print the matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Shows a user's registered devices
    Show {
        /// The ID of the user to show
        #[arg(value_name = "USER_ID")]
        id: String,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    let Cli {
        command,
        user,
        html,
        verbose: _,
    } = cli;

    // default to chat mode
    let Some(command) = command else {
        let user = user.context("--user <ID> is required to chat")?;
        return commands::chat::run(&user, html, &config).await;
    };

    match command {
        Commands::Chat { user, html } => commands::chat::run(&user, html, &config).await,
        Commands::Ask { user, prompt, html } => {
            commands::ask::run(&user, &prompt, html, &config).await
        }
        Commands::Render { text } => commands::render::run(text.as_deref()),

        Commands::Users { command } => match command {
            UserCommands::Search { query, json } => commands::users::search(&query, json, &config),
            UserCommands::Show { id, json } => commands::users::show(&id, json),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
