//! Participant withdrawal: drop one participant and regenerate the unplayed tail.

use crate::logic::regenerate::regenerate_matches_with_rng;
use crate::logic::validate::next_match_number;
use crate::models::{Match, ParticipantId, ScheduleError};
use rand::Rng;

/// Result of a withdrawal: the untouched history plus the replacement tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Removal {
    pub completed: Vec<Match>,
    pub new: Vec<Match>,
}

impl Removal {
    /// `completed` followed by `new`.
    pub fn into_schedule(self) -> Vec<Match> {
        let mut schedule = self.completed;
        schedule.extend(self.new);
        schedule
    }
}

/// Withdraw `player_id` from every unplayed match and rebuild the tail without them.
///
/// Someone who already appears in a completed match cannot be taken out of
/// history (`PlayerInCompletedMatch`). `incomplete` is replaced wholesale.
pub fn remove_player(
    full_roster: &[ParticipantId],
    completed: &[Match],
    incomplete: &[Match],
    player_id: &str,
) -> Result<Removal, ScheduleError> {
    remove_player_with_rng(full_roster, completed, incomplete, player_id, &mut rand::thread_rng())
}

/// [`remove_player`] with a caller-supplied RNG (seeded in tests).
pub fn remove_player_with_rng<R: Rng + ?Sized>(
    full_roster: &[ParticipantId],
    completed: &[Match],
    incomplete: &[Match],
    player_id: &str,
    rng: &mut R,
) -> Result<Removal, ScheduleError> {
    if !full_roster.iter().any(|p| p == player_id) {
        return Err(ScheduleError::PlayerNotInRoster(player_id.to_string()));
    }
    if let Some(m) = completed.iter().find(|m| m.involves(player_id)) {
        log::warn!(
            "Not removing {}: already played completed match {}",
            player_id,
            m.match_number
        );
        return Err(ScheduleError::PlayerInCompletedMatch(player_id.to_string()));
    }

    let dropped: Vec<u32> = incomplete
        .iter()
        .filter(|m| m.involves(player_id))
        .map(|m| m.match_number)
        .collect();
    log::info!(
        "Removing {} (in unplayed matches {:?}); replacing {} unplayed matches",
        player_id,
        dropped,
        incomplete.len()
    );

    let reduced: Vec<ParticipantId> = full_roster
        .iter()
        .filter(|p| p.as_str() != player_id)
        .cloned()
        .collect();
    let new = regenerate_matches_with_rng(&reduced, completed, next_match_number(completed), rng)?;

    Ok(Removal {
        completed: completed.to_vec(),
        new,
    })
}
