//! Action resolver for a live session.
//!
//! [`SessionClock`] owns a [`SessionPlan`] plus the small amount of state
//! that makes a session feel continuous: the latched announcement and the
//! one-way completion flag. Feed it whole-second elapsed samples and it
//! derives the complete view for that instant. Sampling never fails; every
//! elapsed value maps to a view.

use serde::Serialize;

use crate::catalog::ItemKind;

use super::plan::{ActionKind, PlannedEvent, PlannedItem, SessionPlan};

/// Announcement shown from a fresh clock until the first event fires.
pub const READY_MESSAGE: &str = "Get ready to grill";

/// Announcement latched once the whole schedule has elapsed.
pub const COMPLETE_MESSAGE: &str = "Grilling complete! Enjoy your meal.";

/// An event announces itself while |event - now| is under this.
const ANNOUNCE_WINDOW_SECS: f64 = 3.0;

/// The flip status shows this long before the flip moment.
const FLIP_LEAD_SECS: f64 = 30.0;

/// The flip status lingers this long after the flip moment.
const FLIP_LAG_SECS: f64 = 15.0;

/// Future events within this of the next one are shown together.
const GROUP_WINDOW_SECS: f64 = 5.0;

/// Where an item is in its own cook cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Not on the grill yet.
    Pending,
    /// On the grill.
    Cooking,
    /// On the grill, inside a flip window.
    FlipNow,
    /// Off the grill.
    Done,
}

/// One item's slice of the live view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub status: ItemStatus,
}

/// A future action with its countdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingAction {
    pub kind: ActionKind,
    pub item_name: String,
    /// Seconds until the action is due.
    pub in_secs: f64,
}

/// Everything the presentation layer needs for one instant of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub elapsed_secs: u64,
    /// Seconds left until everything is off the grill.
    pub remaining_secs: f64,
    /// The latest announcement, unchanged until the next event fires.
    pub current_action: String,
    pub items: Vec<ItemView>,
    /// The next action plus everything co-scheduled with it.
    pub upcoming: Vec<UpcomingAction>,
    pub complete: bool,
}

impl SessionView {
    /// Neutral view for when no session is running.
    pub fn idle() -> Self {
        Self {
            elapsed_secs: 0,
            remaining_secs: 0.0,
            current_action: READY_MESSAGE.to_string(),
            items: Vec::new(),
            upcoming: Vec::new(),
            complete: false,
        }
    }
}

/// Derives live views from elapsed time.
///
/// Completion is terminal: once the schedule has fully elapsed the clock
/// stays complete even if a later sample carries a smaller elapsed value.
#[derive(Debug, Clone)]
pub struct SessionClock {
    plan: SessionPlan,
    announcement: String,
    completed: bool,
}

impl SessionClock {
    pub fn new(plan: SessionPlan) -> Self {
        Self {
            plan,
            announcement: READY_MESSAGE.to_string(),
            completed: false,
        }
    }

    /// The plan this clock runs against.
    pub fn plan(&self) -> &SessionPlan {
        &self.plan
    }

    /// Derive the view for `elapsed_secs` seconds into the session.
    pub fn sample(&mut self, elapsed_secs: u64) -> SessionView {
        let t = elapsed_secs as f64;

        if self.completed || t >= self.plan.total_secs {
            self.completed = true;
            self.announcement = COMPLETE_MESSAGE.to_string();
            return SessionView {
                elapsed_secs,
                remaining_secs: 0.0,
                current_action: self.announcement.clone(),
                items: self
                    .plan
                    .items
                    .iter()
                    .map(|item| ItemView {
                        id: item.id.clone(),
                        name: item.name.clone(),
                        kind: item.kind,
                        status: ItemStatus::Done,
                    })
                    .collect(),
                upcoming: Vec::new(),
                complete: true,
            };
        }

        if let Some(event) = self.current_event(t) {
            self.announcement = event.message();
        }

        SessionView {
            elapsed_secs,
            remaining_secs: (self.plan.total_secs - t).max(0.0),
            current_action: self.announcement.clone(),
            items: self
                .plan
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    kind: item.kind,
                    status: item_status(item, t),
                })
                .collect(),
            upcoming: self.upcoming(t),
            complete: false,
        }
    }

    /// The earliest event whose scheduled time lies inside the announcement
    /// window around `t`.
    fn current_event(&self, t: f64) -> Option<&PlannedEvent> {
        self.plan
            .events
            .iter()
            .find(|e| (e.at_secs - t).abs() < ANNOUNCE_WINDOW_SECS)
    }

    /// The next future action plus everything co-scheduled with it.
    fn upcoming(&self, t: f64) -> Vec<UpcomingAction> {
        let mut future = self.plan.events.iter().filter(|e| e.at_secs > t);
        let Some(first) = future.next() else {
            return Vec::new();
        };

        let mut actions = vec![UpcomingAction {
            kind: first.kind,
            item_name: first.item_name.clone(),
            in_secs: first.at_secs - t,
        }];
        for event in future {
            if event.at_secs - first.at_secs >= GROUP_WINDOW_SECS {
                break;
            }
            actions.push(UpcomingAction {
                kind: event.kind,
                item_name: event.item_name.clone(),
                in_secs: event.at_secs - t,
            });
        }
        actions
    }
}

/// Status of one item at elapsed time `t`.
///
/// The start boundary is inclusive on the cooking side; the end boundary
/// is inclusive on the done side. A flip window runs from
/// [`FLIP_LEAD_SECS`] before the flip moment to [`FLIP_LAG_SECS`] after
/// it, clipped by the item leaving the grill.
fn item_status(item: &PlannedItem, t: f64) -> ItemStatus {
    if t < item.start_secs {
        return ItemStatus::Pending;
    }
    if t >= item.end_secs {
        return ItemStatus::Done;
    }
    let in_flip_window = item.flip_secs.iter().any(|&flip| {
        let until = flip - t;
        until <= FLIP_LEAD_SECS && until >= -FLIP_LAG_SECS
    });
    if in_flip_window {
        ItemStatus::FlipNow
    } else {
        ItemStatus::Cooking
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{default_items, GrillItem, ItemKind};
    use crate::timeline::Timeline;

    use super::*;

    fn clock_for(ids: &[&str]) -> SessionClock {
        let catalog = default_items();
        let selection: Vec<_> = ids
            .iter()
            .map(|id| {
                catalog
                    .iter()
                    .find(|i| i.id == *id)
                    .cloned()
                    .unwrap_or_else(|| panic!("no default item {id}"))
            })
            .collect();
        SessionClock::new(SessionPlan::new(&Timeline::compute(&selection).unwrap()))
    }

    fn uniform(id: &str, per_side: f64, sides: u32) -> GrillItem {
        GrillItem {
            id: id.to_string(),
            name: id.to_string(),
            kind: ItemKind::Veggie,
            cook_time_per_side: per_side,
            cook_time_second_side: None,
            sides,
            notes: String::new(),
        }
    }

    fn status_of(view: &SessionView, id: &str) -> ItemStatus {
        view.items
            .iter()
            .find(|i| i.id == id)
            .unwrap_or_else(|| panic!("no item {id} in view"))
            .status
    }

    #[test]
    fn first_sample_announces_the_first_add() {
        // Kana starts at 0, Ulkofile at 300.
        let mut clock = clock_for(&["kana", "ulkofile"]);
        let view = clock.sample(0);

        assert_eq!(view.current_action, "Add Kana to the grill");
        assert_eq!(view.remaining_secs, 600.0);
        assert_eq!(status_of(&view, "kana"), ItemStatus::Cooking);
        assert_eq!(status_of(&view, "ulkofile"), ItemStatus::Pending);
        assert!(!view.complete);
    }

    #[test]
    fn announcement_latches_between_events() {
        let mut clock = clock_for(&["kana", "ulkofile"]);
        clock.sample(0);

        // 100s out, nothing within the window; the add announcement holds.
        let view = clock.sample(100);
        assert_eq!(view.current_action, "Add Kana to the grill");
    }

    #[test]
    fn announcement_window_is_strict() {
        let mut clock = clock_for(&["kana", "ulkofile"]);
        clock.sample(0);

        // Events at 300 are exactly 3s away; not announced yet.
        let view = clock.sample(297);
        assert_eq!(view.current_action, "Add Kana to the grill");

        let view = clock.sample(298);
        assert_eq!(view.current_action, "Flip Kana");
    }

    #[test]
    fn co_scheduled_events_announce_the_earliest_scheduled() {
        // At 300 both "flip kana" and "add ulkofile" are due; kana leads
        // the presentation order so its flip wins.
        let mut clock = clock_for(&["kana", "ulkofile"]);
        let view = clock.sample(300);
        assert_eq!(view.current_action, "Flip Kana");
    }

    #[test]
    fn item_starts_cooking_exactly_at_its_start() {
        let mut clock = clock_for(&["kana", "ulkofile"]);

        let view = clock.sample(299);
        assert_eq!(status_of(&view, "ulkofile"), ItemStatus::Pending);

        let view = clock.sample(300);
        assert_eq!(status_of(&view, "ulkofile"), ItemStatus::Cooking);
    }

    #[test]
    fn flip_window_opens_early_and_lingers() {
        // Kana flips at 300.
        let mut clock = clock_for(&["kana", "ulkofile"]);

        assert_eq!(status_of(&clock.sample(269), "kana"), ItemStatus::Cooking);
        assert_eq!(status_of(&clock.sample(270), "kana"), ItemStatus::FlipNow);
        assert_eq!(status_of(&clock.sample(300), "kana"), ItemStatus::FlipNow);
        assert_eq!(status_of(&clock.sample(315), "kana"), ItemStatus::FlipNow);
        assert_eq!(status_of(&clock.sample(316), "kana"), ItemStatus::Cooking);
    }

    #[test]
    fn corn_cycles_through_every_flip_window() {
        // Maissi flips every 180s for 24 minutes.
        let mut clock = clock_for(&["maissi"]);

        assert_eq!(status_of(&clock.sample(100), "maissi"), ItemStatus::Cooking);
        assert_eq!(status_of(&clock.sample(160), "maissi"), ItemStatus::FlipNow);
        assert_eq!(status_of(&clock.sample(200), "maissi"), ItemStatus::Cooking);
        assert_eq!(status_of(&clock.sample(340), "maissi"), ItemStatus::FlipNow);
    }

    #[test]
    fn upcoming_groups_co_scheduled_actions() {
        let mut clock = clock_for(&["kana", "ulkofile"]);
        let view = clock.sample(200);

        let upcoming: Vec<(ActionKind, &str, f64)> = view
            .upcoming
            .iter()
            .map(|u| (u.kind, u.item_name.as_str(), u.in_secs))
            .collect();
        assert_eq!(
            upcoming,
            vec![
                (ActionKind::Flip, "Kana", 100.0),
                (ActionKind::Add, "Ulkofile", 100.0),
            ]
        );
    }

    #[test]
    fn upcoming_stays_single_when_nothing_is_near() {
        let mut clock = clock_for(&["kana", "ulkofile"]);
        let view = clock.sample(400);

        // Ulkofile flips at 450; the removes at 600 are far beyond the
        // grouping window.
        let upcoming: Vec<(ActionKind, &str)> = view
            .upcoming
            .iter()
            .map(|u| (u.kind, u.item_name.as_str()))
            .collect();
        assert_eq!(upcoming, vec![(ActionKind::Flip, "Ulkofile")]);
        assert_eq!(view.upcoming[0].in_secs, 50.0);
    }

    #[test]
    fn grouping_window_is_strict() {
        // a runs 600s flipping at 300; b's add lands 3s before that flip
        // in the first selection and 6s after it in the second.
        let near = vec![uniform("a", 5.0, 2), uniform("b", 2.525, 2)];
        let plan = SessionPlan::new(&Timeline::compute(&near).unwrap());
        let mut clock = SessionClock::new(plan);
        let view = clock.sample(200);
        assert_eq!(view.upcoming.len(), 2);

        let apart = vec![uniform("a", 5.0, 2), uniform("b", 2.45, 2)];
        let plan = SessionPlan::new(&Timeline::compute(&apart).unwrap());
        let mut clock = SessionClock::new(plan);
        let view = clock.sample(200);
        assert_eq!(view.upcoming.len(), 1);
    }

    #[test]
    fn past_events_never_reappear_as_upcoming() {
        let mut clock = clock_for(&["kana"]);
        let view = clock.sample(300);
        // The flip is now, not upcoming; only the remove is left.
        let kinds: Vec<ActionKind> = view.upcoming.iter().map(|u| u.kind).collect();
        assert_eq!(kinds, vec![ActionKind::Remove]);
    }

    #[test]
    fn completion_is_terminal() {
        let mut clock = clock_for(&["kana", "ulkofile"]);

        let view = clock.sample(600);
        assert!(view.complete);
        assert_eq!(view.current_action, COMPLETE_MESSAGE);
        assert_eq!(view.remaining_secs, 0.0);
        assert!(view.upcoming.is_empty());
        assert_eq!(status_of(&view, "kana"), ItemStatus::Done);
        assert_eq!(status_of(&view, "ulkofile"), ItemStatus::Done);

        // Even a sample that jumps backwards stays complete.
        let view = clock.sample(5);
        assert!(view.complete);
        assert_eq!(view.current_action, COMPLETE_MESSAGE);
        assert_eq!(status_of(&view, "kana"), ItemStatus::Done);
    }

    #[test]
    fn remaining_counts_down() {
        let mut clock = clock_for(&["kana", "ulkofile"]);
        assert_eq!(clock.sample(200).remaining_secs, 400.0);
        assert_eq!(clock.sample(599).remaining_secs, 1.0);
    }

    #[test]
    fn salmon_walkthrough() {
        // Lohi: 3 min first side, 5 min second, flip at 180, done at 480.
        let mut clock = clock_for(&["lohi"]);

        assert_eq!(clock.sample(0).current_action, "Add Lohi to the grill");
        assert_eq!(status_of(&clock.sample(150), "lohi"), ItemStatus::FlipNow);
        assert_eq!(clock.sample(179).current_action, "Flip Lohi");
        assert_eq!(status_of(&clock.sample(196), "lohi"), ItemStatus::Cooking);
        assert_eq!(
            clock.sample(478).current_action,
            "Remove Lohi from the grill"
        );
        assert!(clock.sample(480).complete);
    }

    #[test]
    fn idle_view_is_neutral() {
        let view = SessionView::idle();
        assert_eq!(view.current_action, READY_MESSAGE);
        assert!(view.items.is_empty());
        assert!(!view.complete);
    }

    #[test]
    fn plan_accessor_exposes_the_lowered_schedule() {
        let clock = clock_for(&["kana", "ulkofile"]);
        let plan = clock.plan();

        assert_eq!(plan.total_secs, 600.0);
        assert_eq!(plan.items.len(), 2);
        // One add, one flip and one remove per item.
        assert_eq!(plan.events.len(), 6);
        assert_eq!(plan.items[0].id, "kana");
    }
}
