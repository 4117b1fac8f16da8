mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ica-cli", about = "ICA shopping list from the command line", version)]
struct Cli {
    /// Config file (default: $ICA_SHOPPING_LIST_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Show every item on the list
    List,

    /// Add an item
    Add {
        /// Product name
        name: String,
    },

    /// Mark an item as completed
    Complete {
        /// Display name of the item, e.g. "Kaffe"
        name: String,
    },

    /// Rename an item
    Rename {
        /// Offline id of the item
        item_id: String,
        /// New product name
        name: String,
    },

    /// Remove an item
    Remove {
        /// Display name of the item, e.g. "Kaffe"
        name: String,
    },

    /// Remove every completed item
    ClearCompleted,

    /// Show the most recently added items
    Last {
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Serve the HTTP views and websocket commands
    Serve {
        /// Port to listen on (0 picks a free one)
        #[arg(long, default_value = "0")]
        port: u16,
    },

    /// Store the account password in the OS keyring
    SetPassword {
        /// Password (read from stdin when omitted)
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::SetPassword { password } => {
            let config = app::load_config(config_path)?;
            commands::password::run(&config, password)?;
        }
        Command::List => {
            let app = app::App::connect(config_path).await?;
            commands::items::run_list(&app, &cli.format, use_color)?;
        }
        Command::Last { count } => {
            let app = app::App::connect(config_path).await?;
            commands::items::run_last(&app, count, &cli.format, use_color)?;
        }
        Command::Add { name } => {
            let app = app::App::connect(config_path).await?;
            commands::edit::run_add(&app, &name, &cli.format, use_color).await?;
        }
        Command::Complete { name } => {
            let app = app::App::connect(config_path).await?;
            commands::edit::run_complete(&app, &name, &cli.format, use_color).await?;
        }
        Command::Rename { item_id, name } => {
            let app = app::App::connect(config_path).await?;
            commands::edit::run_rename(&app, &item_id, &name, &cli.format, use_color).await?;
        }
        Command::Remove { name } => {
            let app = app::App::connect(config_path).await?;
            commands::edit::run_remove(&app, &name, &cli.format, use_color).await?;
        }
        Command::ClearCompleted => {
            let app = app::App::connect(config_path).await?;
            commands::edit::run_clear_completed(&app, &cli.format, use_color).await?;
        }
        Command::Serve { port } => {
            let app = app::App::connect(config_path).await?;
            commands::serve::run(app, port).await?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
