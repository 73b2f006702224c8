use std::fmt::Write as _;

use clap::Args;
use grillplan_core::storage::DisplayConfig;
use grillplan_core::{Catalog, Config, Database, GrillItem, Timeline};

#[derive(Args)]
pub struct PlanArgs {
    /// Item ids to put on the grill (repeat an id to grill it twice)
    pub ids: Vec<String>,
    /// Print the timeline as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let catalog = Catalog::load(&db);
    let selection = resolve_selection(&catalog, &args.ids)?;

    let Some(timeline) = Timeline::compute(&selection) else {
        println!("Select items to grill first.");
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&timeline)?);
    } else {
        let config = Config::load_or_default();
        print!("{}", render_plan(&timeline, &config.display));
    }
    Ok(())
}

/// Map ids to catalog items, keeping input order and duplicates.
pub fn resolve_selection(
    catalog: &Catalog,
    ids: &[String],
) -> Result<Vec<GrillItem>, Box<dyn std::error::Error>> {
    let mut selection = Vec::with_capacity(ids.len());
    for id in ids {
        match catalog.get(id) {
            Some(item) => selection.push(item.clone()),
            None => return Err(format!("no such item: {id} (try `item list`)").into()),
        }
    }
    Ok(selection)
}

/// Format whole seconds as MM:SS.
pub fn format_clock(secs: f64) -> String {
    let total = secs.round().max(0.0) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Render a timeline as an action table plus an ASCII chart.
pub fn render_plan(timeline: &Timeline, display: &DisplayConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Grill plan: {} item(s), everything off at {}",
        timeline.items.len(),
        format_clock(timeline.total_time * 60.0)
    );
    let _ = writeln!(out);

    for entry in &timeline.items {
        let flips = if entry.flip_times.is_empty() {
            "-".to_string()
        } else {
            entry
                .flip_times
                .iter()
                .map(|f| format_clock(f * 60.0))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let _ = writeln!(
            out,
            "  {:<14} {:<7} on {}  flip {}  off {}",
            entry.item.name,
            entry.item.kind.as_str(),
            format_clock(entry.start_time * 60.0),
            flips,
            format_clock(entry.end_time * 60.0)
        );
        if display.show_notes && !entry.item.notes.is_empty() {
            let _ = writeln!(out, "  {:<14} note: {}", "", entry.item.notes);
        }
    }

    let _ = writeln!(out);
    out.push_str(&render_chart(timeline, display));
    out
}

/// One bar per item: '#' while cooking, '!' at flip moments.
fn render_chart(timeline: &Timeline, display: &DisplayConfig) -> String {
    let cols_per_min = display.minute_cols.max(1) as usize;
    let minutes = timeline.total_time.ceil() as usize;
    let width = minutes * cols_per_min;

    let col = |minute: f64| ((minute * cols_per_min as f64).round() as usize).min(width);

    let mut out = String::new();
    for entry in &timeline.items {
        let mut bar = vec![' '; width];
        for cell in bar.iter_mut().take(col(entry.end_time)).skip(col(entry.start_time)) {
            *cell = '#';
        }
        for flip in &entry.flip_times {
            let c = col(*flip);
            if c < width {
                bar[c] = '!';
            }
        }
        let _ = writeln!(
            out,
            "  {:<14} {}",
            entry.item.name,
            bar.into_iter().collect::<String>()
        );
    }

    let ruler: String = (0..minutes)
        .map(|_| {
            let mut cell = String::from("+");
            cell.push_str(&"-".repeat(cols_per_min - 1));
            cell
        })
        .collect();
    let _ = writeln!(
        out,
        "  {:<14} {}  ({} min, one cell per minute)",
        "",
        ruler,
        fmt_minutes(timeline.total_time)
    );
    out
}

/// Minutes without a trailing ".0" for whole values.
fn fmt_minutes(minutes: f64) -> String {
    if minutes.fract() == 0.0 {
        format!("{}", minutes as u64)
    } else {
        format!("{minutes}")
    }
}
