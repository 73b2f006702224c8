use std::fmt::Write as _;

use chrono::Utc;
use clap::Args;
use grillplan_core::{
    Catalog, Config, Database, ItemStatus, SessionPlan, SessionRunner, SessionView, Timeline,
};
use tokio::sync::mpsc;

use super::plan::{format_clock, render_plan, resolve_selection};

#[derive(Args)]
pub struct CookArgs {
    /// Item ids to put on the grill
    pub ids: Vec<String>,
}

pub async fn run(args: CookArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let catalog = Catalog::load(&db);
    let selection = resolve_selection(&catalog, &args.ids)?;

    let Some(timeline) = Timeline::compute(&selection) else {
        println!("Select items to grill first.");
        return Ok(());
    };

    let config = Config::load_or_default();
    print!("{}", render_plan(&timeline, &config.display));
    println!();

    let item_count = timeline.items.len() as u32;
    let item_names = timeline
        .items
        .iter()
        .map(|e| e.item.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let planned_min = timeline.total_time;
    let started_at = Utc::now();

    let runner = SessionRunner::new(SessionPlan::new(&timeline));
    let (rx, handle) = runner.start();

    // Follow the session tick stream; Ctrl+C received at the OS level
    // cancels the background sampler cleanly.
    tokio::select! {
        completed = follow(rx, &config) => {
            if completed {
                db.record_cook(item_count, &item_names, planned_min, started_at, Utc::now())?;
            }
        }
        _ = tokio::signal::ctrl_c() => {
            handle.abort();
            println!();
            println!("session cancelled");
        }
    }
    Ok(())
}

/// Print each view as it arrives. Returns whether the session completed.
async fn follow(mut rx: mpsc::Receiver<SessionView>, config: &Config) -> bool {
    let mut last_action = String::new();
    while let Some(view) = rx.recv().await {
        print_tick(&view, config, &mut last_action);
        if view.complete {
            return true;
        }
    }
    false
}

/// One line per second: countdown, current action, flip reminders and
/// the next scheduled actions.
fn print_tick(view: &SessionView, config: &Config, last_action: &mut String) {
    if view.current_action != *last_action {
        if config.notifications.enabled && config.notifications.bell {
            print!("\x07");
        }
        *last_action = view.current_action.clone();
    }

    let mut line = format!(
        "[{} left] {}",
        format_clock(view.remaining_secs),
        view.current_action
    );

    let flipping: Vec<&str> = view
        .items
        .iter()
        .filter(|i| i.status == ItemStatus::FlipNow)
        .map(|i| i.name.as_str())
        .collect();
    if !flipping.is_empty() {
        let _ = write!(line, "  [flip now: {}]", flipping.join(", "));
    }

    if !view.upcoming.is_empty() {
        let next = view
            .upcoming
            .iter()
            .map(|u| format!("{} {} in {}", u.kind, u.item_name, format_clock(u.in_secs)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(line, "  (next: {next})");
    }

    println!("{line}");
}
