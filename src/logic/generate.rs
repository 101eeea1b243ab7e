//! Match generation from a fresh roster.

use crate::logic::fairness::{check_roster_size, max_matches};
use crate::logic::rotation::rotation_for;
use crate::logic::validate::check_schedule;
use crate::models::{ensure_unique, Match, ParticipantId, ScheduleError};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate the full schedule for an event (4 to 12 participants).
///
/// 1. Look up the rotation table for the roster size.
/// 2. For each group of positions, shuffle the four participants and split 2/2.
/// 3. Number matches from 1 in table order; all start `Scheduled` on court 1.
pub fn generate_matches(roster: &[ParticipantId]) -> Result<Vec<Match>, ScheduleError> {
    generate_matches_with_rng(roster, &mut rand::thread_rng())
}

/// [`generate_matches`] with a caller-supplied RNG (seeded in tests).
pub fn generate_matches_with_rng<R: Rng + ?Sized>(
    roster: &[ParticipantId],
    rng: &mut R,
) -> Result<Vec<Match>, ScheduleError> {
    check_roster_size(roster.len())?;
    ensure_unique(roster)?;

    let table = rotation_for(roster.len())?;
    debug_assert_eq!(Some(table.len()), max_matches(roster.len()).ok());

    let matches: Vec<Match> = table
        .iter()
        .zip(1u32..)
        .map(|(group, number)| {
            let players = group.map(|pos| roster[pos].clone());
            build_match(number, players, rng)
        })
        .collect();

    // A bad table entry is a defect, not a user error.
    check_schedule(&matches).map_err(ScheduleError::InternalScheduleInvariantViolation)?;

    log::info!(
        "Generated {} matches for {} participants",
        matches.len(),
        roster.len()
    );
    Ok(matches)
}

/// Shuffle four participants and split them into two teams of two.
pub(crate) fn build_match<R: Rng + ?Sized>(
    match_number: u32,
    mut players: [ParticipantId; 4],
    rng: &mut R,
) -> Match {
    players.shuffle(rng);
    let [a, b, c, d] = players;
    log::debug!("Match {}: {} & {} vs {} & {}", match_number, a, b, c, d);
    Match::new(match_number, vec![a, b], vec![c, d])
}
