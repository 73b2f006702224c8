use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "grillplan-cli", version, about = "Grillplan CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grill item catalog
    Item {
        #[command(subcommand)]
        action: commands::item::ItemAction,
    },
    /// Compute and show a grill plan
    Plan(commands::plan::PlanArgs),
    /// Run a live guided grill session
    Cook(commands::cook::CookArgs),
    /// Cook session history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Initialise the global `tracing` subscriber.
///
/// Honors `RUST_LOG`; defaults to `warn`. All output goes to stderr so
/// command output on stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Item { action } => commands::item::run(action),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Cook(args) => commands::cook::run(args).await,
        Commands::History { action } => commands::history::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
