use clap::Subcommand;
use grillplan_core::{Catalog, Database, GrillItem, ItemDraft, ItemKind, RemoveOutcome};

#[derive(Subcommand)]
pub enum ItemAction {
    /// List catalog items
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one item as JSON
    Show {
        /// Item id
        id: String,
    },
    /// Add a custom item
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Item kind: veggie, meat or fish
        #[arg(long)]
        kind: ItemKind,
        /// Minutes per side
        #[arg(long)]
        per_side: f64,
        /// Minutes for the second side, when it differs from the first
        #[arg(long)]
        second_side: Option<f64>,
        /// Number of sides
        #[arg(long, default_value_t = 2)]
        sides: u32,
        /// Free-text note shown alongside the item
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Remove a custom item
    Remove {
        /// Item id
        id: String,
    },
}

pub fn run(action: ItemAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut catalog = Catalog::load(&db);

    match action {
        ItemAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(catalog.list())?);
            } else {
                for item in catalog.list() {
                    println!(
                        "{:<14} {:<14} {:<7} {}",
                        item.id,
                        item.name,
                        item.kind,
                        cook_summary(item)
                    );
                }
            }
        }
        ItemAction::Show { id } => match catalog.get(&id) {
            Some(item) => println!("{}", serde_json::to_string_pretty(item)?),
            None => {
                eprintln!("no such item: {id}");
                std::process::exit(1);
            }
        },
        ItemAction::Add {
            name,
            kind,
            per_side,
            second_side,
            sides,
            notes,
        } => {
            let draft = ItemDraft {
                name,
                kind,
                cook_time_per_side: per_side,
                cook_time_second_side: second_side,
                sides,
                notes,
            };
            let item = catalog.add(draft)?;
            catalog.save(&db)?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        ItemAction::Remove { id } => match catalog.remove(&id) {
            RemoveOutcome::Removed => {
                catalog.save(&db)?;
                println!("removed {id}");
            }
            RemoveOutcome::Protected => {
                eprintln!("cannot remove default item: {id}");
                std::process::exit(1);
            }
            RemoveOutcome::NotFound => {
                eprintln!("no such item: {id}");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}

/// One-line cook timing summary, e.g. "3 min x 8 sides" or "3 + 5 min".
fn cook_summary(item: &GrillItem) -> String {
    let timing = match item.cook_time_second_side {
        Some(second) => format!("{} + {} min", item.cook_time_per_side, second),
        None => format!("{} min x {} sides", item.cook_time_per_side, item.sides),
    };
    if item.notes.is_empty() {
        timing
    } else {
        format!("{timing} ({})", item.notes)
    }
}
