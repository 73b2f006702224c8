//! Session plan: a timeline lowered to seconds.
//!
//! The timeline is minutes end to end; a live session works in seconds.
//! [`SessionPlan::new`] performs the minute-to-second conversion exactly
//! once and lays every add/flip/remove moment out in one globally ordered
//! event sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemKind;
use crate::timeline::Timeline;

/// What the cook has to do at a scheduled moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Add,
    Flip,
    Remove,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Add => "add",
            ActionKind::Flip => "flip",
            ActionKind::Remove => "remove",
        };
        f.write_str(s)
    }
}

/// A single scheduled action.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEvent {
    /// Seconds from the schedule origin.
    pub at_secs: f64,
    pub kind: ActionKind,
    /// Display name of the item this action applies to.
    pub item_name: String,
    /// Index into [`SessionPlan::items`].
    pub item_index: usize,
}

impl PlannedEvent {
    /// Announcement text for this action.
    pub fn message(&self) -> String {
        match self.kind {
            ActionKind::Add => format!("Add {} to the grill", self.item_name),
            ActionKind::Flip => format!("Flip {}", self.item_name),
            ActionKind::Remove => format!("Remove {} from the grill", self.item_name),
        }
    }
}

/// A scheduled item in the seconds domain.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub notes: String,
    pub start_secs: f64,
    pub end_secs: f64,
    pub flip_secs: Vec<f64>,
}

/// An immutable snapshot of one timeline, in seconds, ready to run.
///
/// Events are ordered by time. Simultaneous events keep item presentation
/// order, and within one item add comes before flips before remove.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub items: Vec<PlannedItem>,
    pub events: Vec<PlannedEvent>,
    pub total_secs: f64,
}

impl SessionPlan {
    /// Lower a timeline into seconds and lay out its events.
    pub fn new(timeline: &Timeline) -> Self {
        let items: Vec<PlannedItem> = timeline
            .items
            .iter()
            .map(|entry| PlannedItem {
                id: entry.item.id.clone(),
                name: entry.item.name.clone(),
                kind: entry.item.kind,
                notes: entry.item.notes.clone(),
                start_secs: entry.start_time * 60.0,
                end_secs: entry.end_time * 60.0,
                flip_secs: entry.flip_times.iter().map(|f| f * 60.0).collect(),
            })
            .collect();

        let mut events = Vec::new();
        for (item_index, item) in items.iter().enumerate() {
            events.push(PlannedEvent {
                at_secs: item.start_secs,
                kind: ActionKind::Add,
                item_name: item.name.clone(),
                item_index,
            });
            for &flip in &item.flip_secs {
                events.push(PlannedEvent {
                    at_secs: flip,
                    kind: ActionKind::Flip,
                    item_name: item.name.clone(),
                    item_index,
                });
            }
            events.push(PlannedEvent {
                at_secs: item.end_secs,
                kind: ActionKind::Remove,
                item_name: item.name.clone(),
                item_index,
            });
        }
        // Stable sort: simultaneous events keep insertion order.
        events.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));

        Self {
            items,
            events,
            total_secs: timeline.total_time * 60.0,
        }
    }
}
