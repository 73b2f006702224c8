use clap::Subcommand;
use grillplan_core::Database;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Recent cook sessions, newest first
    List {
        /// Maximum number of sessions to show
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Aggregate counters (all-time and today)
    Stats,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HistoryAction::List { limit } => {
            let records = db.history(limit)?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        HistoryAction::Stats => {
            let stats = db.stats()?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
