//! # Examplan Core Library
//!
//! Turns exam dates and per-subject session quotas into a day-by-day
//! study plan, and keeps that plan consistent while it is edited.
//!
//! ## Architecture
//!
//! - **Window**: study window, placement deadline and calendar range
//!   derived from the subjects' exam dates
//! - **Schedule**: date-keyed, ordered lists of placed sessions
//! - **Placement**: click-to-place and toggle-off under capacity, quota,
//!   deadline and exam-eve rules
//! - **Outline**: deterministic distribution of outline lines over a
//!   subject's sessions in chronological order
//! - **Adjust**: moving and removing placed sessions
//! - **Planner**: the controller that owns plan state, commits changes
//!   and queues events
//!
//! ## Key Components
//!
//! - [`StudyWindow`]: window computation
//! - [`PlacementEngine`]: session placement
//! - [`OutlineDistributor`]: scope assignment
//! - [`Adjuster`]: post-hoc edits
//! - [`Planner`]: plan controller
//! - [`Config`]: application configuration

pub mod adjust;
pub mod color;
pub mod dates;
pub mod error;
pub mod events;
pub mod mastery;
pub mod outline;
pub mod placement;
pub mod planner;
pub mod progress;
pub mod schedule;
pub mod storage;
pub mod subject;
pub mod window;

pub use adjust::{Adjuster, MoveOutcome};
pub use color::PastelColor;
pub use error::{ConfigError, CoreError, PlanError, ValidationError};
pub use events::PlanEvent;
pub use mastery::MasteryBoard;
pub use outline::OutlineDistributor;
pub use placement::{Advisory, Placement, PlacementEngine};
pub use planner::{PlanSnapshot, Planner};
pub use progress::{SubjectProgress, Workload};
pub use schedule::{ScheduleMap, Violation, MAX_SESSIONS_PER_DAY};
pub use storage::{Config, PlanFile};
pub use subject::{DayNote, DayNotes, Outlines, SessionEntry, Subject};
pub use window::StudyWindow;
