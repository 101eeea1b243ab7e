//! Club doubles scheduler: library with models and the match scheduling engine.

pub mod config;
pub mod http;
pub mod logic;
pub mod models;

pub use logic::{
    generate_matches, generate_matches_with_rng, max_matches, regenerate_matches,
    regenerate_matches_with_rng, remove_player, remove_player_with_rng, rotation_for, validate,
    Removal,
};
pub use models::{
    parse_roster_csv, Event, EventError, EventId, Match, MatchStatus, ParticipantId, RosterError,
    ScheduleError, Team, Violation,
};
