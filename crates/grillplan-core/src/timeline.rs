//! Timeline calculator.
//!
//! Pure scheduling over a selection of grill items: everything comes off
//! the grill at the same moment. The longest-cooking item starts at the
//! schedule origin and every other item starts late by exactly the
//! difference in total cook time. All times are minutes; the session
//! layer converts to seconds when a plan goes live.

use serde::{Deserialize, Serialize};

use crate::catalog::GrillItem;

/// A grill item placed on the shared schedule.
///
/// `flip_offsets` are relative to the item's own start; `start_time`,
/// `end_time` and `flip_times` are relative to the schedule origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    #[serde(flatten)]
    pub item: GrillItem,
    /// Minutes on the grill in total.
    pub total_time: f64,
    #[serde(rename = "flips")]
    pub flip_offsets: Vec<f64>,
    pub start_time: f64,
    pub end_time: f64,
    pub flip_times: Vec<f64>,
}

/// A complete schedule for one selection.
///
/// Items are held in presentation order: descending total cook time,
/// ties keeping input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub items: Vec<ScheduledItem>,
    /// Minutes from the first add to the shared finish.
    pub total_time: f64,
}

impl Timeline {
    /// Compute the schedule for a selection.
    ///
    /// An empty selection has no timeline. Duplicate ids are scheduled as
    /// distinct entries. The result is deterministic for a given input
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if an item's total cook time is not positive. Durations are
    /// validated at the catalog boundary, so a non-positive total here is
    /// a programming error.
    pub fn compute(selection: &[GrillItem]) -> Option<Timeline> {
        if selection.is_empty() {
            return None;
        }

        let mut items: Vec<ScheduledItem> = selection
            .iter()
            .map(|item| {
                let (total_time, flip_offsets) = cook_profile(item);
                ScheduledItem {
                    item: item.clone(),
                    total_time,
                    flip_offsets,
                    start_time: 0.0,
                    end_time: 0.0,
                    flip_times: Vec::new(),
                }
            })
            .collect();

        // Stable sort: ties keep their input order.
        items.sort_by(|a, b| b.total_time.total_cmp(&a.total_time));

        let longest = items[0].total_time;
        for entry in &mut items {
            let start = longest - entry.total_time;
            entry.start_time = start;
            entry.end_time = start + entry.total_time;
            entry.flip_times = entry.flip_offsets.iter().map(|f| start + f).collect();
        }

        Some(Timeline {
            items,
            total_time: longest,
        })
    }
}

/// Total minutes on the grill and the flip offsets within them.
///
/// Two timing shapes exist: a distinct second side means exactly one flip
/// when the first side is done; uniform sides flip after every side
/// except the last.
fn cook_profile(item: &GrillItem) -> (f64, Vec<f64>) {
    let (total, flips) = match item.cook_time_second_side {
        Some(second_side) => (
            item.cook_time_per_side + second_side,
            vec![item.cook_time_per_side],
        ),
        None => {
            let total = item.cook_time_per_side * f64::from(item.sides);
            let flips = (1..item.sides)
                .map(|k| item.cook_time_per_side * f64::from(k))
                .collect();
            (total, flips)
        }
    };
    assert!(
        total > 0.0,
        "grill item '{}' has a non-positive total cook time",
        item.id
    );
    (total, flips)
}
