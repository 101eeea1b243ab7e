//! Data structures for club doubles events: participants, matches, errors, event state.

mod error;
mod event;
mod game;
mod participant;

pub use error::{ScheduleError, Violation};
pub use event::{Event, EventError, EventId};
pub use game::{Match, MatchStatus, Team, COURT};
pub use participant::{ensure_unique, parse_roster_csv, ParticipantId, RosterError};
