use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tabshamer", version, about = "Tab Shamer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Current tab count and shame verdict
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Tab enumeration export to read (default: tabs.json in the data dir)
        #[arg(long)]
        tabs_file: Option<PathBuf>,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Review and close ancient tabs
    Review {
        #[command(subcommand)]
        action: commands::review::ReviewAction,
    },
    /// Host bridge: tab lifecycle events and enumeration sync
    Tab {
        #[command(subcommand)]
        action: commands::tab::TabAction,
    },
    /// Run the periodic shame checker
    Watch {
        /// Seconds between checks
        #[arg(long, default_value_t = 300)]
        interval_secs: u64,
        /// Run a single check and exit
        #[arg(long)]
        once: bool,
        /// Tab enumeration export to read (default: tabs.json in the data dir)
        #[arg(long)]
        tabs_file: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Status { json, tabs_file } => commands::status::run(json, tabs_file),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Review { action } => commands::review::run(action),
        Commands::Tab { action } => commands::tab::run(action),
        Commands::Watch {
            interval_secs,
            once,
            tabs_file,
        } => commands::watch::run(interval_secs, once, tabs_file),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tabshamer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
