//! Live session machinery: plan lowering, the action resolver clock and
//! the periodic sampling loop.

mod clock;
mod plan;
mod runner;

pub use clock::{
    ItemStatus, ItemView, SessionClock, SessionView, UpcomingAction, COMPLETE_MESSAGE,
    READY_MESSAGE,
};
pub use plan::{ActionKind, PlannedEvent, PlannedItem, SessionPlan};
pub use runner::{SessionHandle, SessionRunner, SAMPLE_PERIOD};
