//! Regeneration: rebuild the unplayed tail of a schedule around completed matches.

use crate::logic::fairness::{max_matches, MAX_MATCHES_PER_PARTICIPANT, MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use crate::logic::generate::build_match;
use crate::logic::validate::{appearances, validate};
use crate::models::{ensure_unique, Match, ParticipantId, ScheduleError};
use rand::Rng;

/// Build the matches still owed to the roster after `completed` have been played.
///
/// Returns only the new matches, numbered from `next_match_number`; callers
/// append them to `completed`. The combined schedule is validated before
/// returning, so the result is either fully valid or an error.
pub fn regenerate_matches(
    full_roster: &[ParticipantId],
    completed: &[Match],
    next_match_number: u32,
) -> Result<Vec<Match>, ScheduleError> {
    regenerate_matches_with_rng(full_roster, completed, next_match_number, &mut rand::thread_rng())
}

/// [`regenerate_matches`] with a caller-supplied RNG (seeded in tests).
pub fn regenerate_matches_with_rng<R: Rng + ?Sized>(
    full_roster: &[ParticipantId],
    completed: &[Match],
    next_match_number: u32,
    rng: &mut R,
) -> Result<Vec<Match>, ScheduleError> {
    ensure_unique(full_roster)?;
    // Completed history is never repaired here; a broken one is reported as-is.
    validate(completed)?;

    let mut quotas = remaining_quotas(full_roster, completed);
    let eligible = quotas.iter().filter(|(_, q)| *q > 0).count();

    if full_roster.len() > MAX_PARTICIPANTS {
        return Err(ScheduleError::TooManyPlayers {
            count: full_roster.len(),
        });
    }
    if full_roster.len() < MIN_PARTICIPANTS {
        return Err(ScheduleError::InsufficientEligiblePlayers { eligible });
    }

    let target = max_matches(full_roster.len())?;
    let needed = target.saturating_sub(completed.len());
    if needed == 0 {
        log::info!(
            "{} of {} matches already completed, nothing to regenerate",
            completed.len(),
            target
        );
        return Ok(Vec::new());
    }
    let last_number = u32::try_from(needed - 1)
        .ok()
        .and_then(|offset| next_match_number.checked_add(offset))
        .filter(|_| next_match_number > 0)
        .ok_or(ScheduleError::InvalidMatchNumber {
            next_match_number,
            needed,
        })?;
    if eligible < 4 {
        log::warn!("Cannot regenerate {} matches: only {} eligible participants", needed, eligible);
        return Err(ScheduleError::InsufficientEligiblePlayers { eligible });
    }

    let mut new_matches = Vec::with_capacity(needed);
    for number in next_match_number..=last_number {
        let group = take_group(&mut quotas).ok_or_else(|| {
            let eligible = quotas.iter().filter(|(_, q)| *q > 0).count();
            log::warn!("Ran out of eligible participants at match {}", number);
            ScheduleError::InsufficientEligiblePlayers { eligible }
        })?;
        new_matches.push(build_match(number, group, rng));
    }

    let combined: Vec<Match> = completed.iter().chain(new_matches.iter()).cloned().collect();
    validate(&combined)?;

    log::info!(
        "Regenerated {} matches from #{} ({} completed kept)",
        new_matches.len(),
        next_match_number,
        completed.len()
    );
    Ok(new_matches)
}

/// Matches each roster member may still play, in roster order.
fn remaining_quotas(roster: &[ParticipantId], completed: &[Match]) -> Vec<(ParticipantId, usize)> {
    let played = appearances(completed);
    roster
        .iter()
        .map(|p| {
            let used = played.get(p.as_str()).copied().unwrap_or(0);
            (p.clone(), MAX_MATCHES_PER_PARTICIPANT.saturating_sub(used))
        })
        .collect()
}

/// Pick the four participants with the most remaining quota and charge them one match each.
///
/// Ties keep roster order (the sort is stable). Returns `None` when fewer than
/// four participants can still play.
fn take_group(quotas: &mut [(ParticipantId, usize)]) -> Option<[ParticipantId; 4]> {
    let mut order: Vec<usize> = (0..quotas.len()).filter(|&i| quotas[i].1 > 0).collect();
    if order.len() < 4 {
        return None;
    }
    order.sort_by(|&a, &b| quotas[b].1.cmp(&quotas[a].1));

    let picked = [order[0], order[1], order[2], order[3]];
    for &i in &picked {
        quotas[i].1 -= 1;
    }
    Some(picked.map(|i| quotas[i].0.clone()))
}
