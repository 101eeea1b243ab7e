//! Scheduling engine: fairness table, rotation catalog, generation, validation,
//! regeneration and removal. Everything here is pure; callers own persistence.

mod fairness;
mod generate;
mod regenerate;
mod removal;
mod rotation;
mod validate;

pub use fairness::{
    check_roster_size, max_matches, MAX_MATCHES_PER_PARTICIPANT, MAX_PARTICIPANTS, MIN_PARTICIPANTS,
};
pub use generate::{generate_matches, generate_matches_with_rng};
pub use regenerate::{regenerate_matches, regenerate_matches_with_rng};
pub use removal::{remove_player, remove_player_with_rng, Removal};
pub use rotation::{rotation_for, PositionGroup};
pub use validate::{appearances, check_match, check_schedule, next_match_number, validate};
