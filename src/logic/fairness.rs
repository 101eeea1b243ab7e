//! Fairness table: how many matches an event with `n` participants contains.

use crate::models::ScheduleError;

/// Smallest supported roster.
pub const MIN_PARTICIPANTS: usize = 4;
/// Largest supported roster.
pub const MAX_PARTICIPANTS: usize = 12;
/// Nobody plays more than this many matches in one event.
pub const MAX_MATCHES_PER_PARTICIPANT: usize = 2;

/// Indexed by `n - MIN_PARTICIPANTS`. Each value satisfies `4 * m <= 2 * n`.
const MAX_MATCHES: [usize; MAX_PARTICIPANTS - MIN_PARTICIPANTS + 1] = [2, 2, 3, 3, 4, 4, 5, 5, 6];

/// Number of matches the event will contain for `n` participants (4..=12).
pub fn max_matches(n: usize) -> Result<usize, ScheduleError> {
    n.checked_sub(MIN_PARTICIPANTS)
        .and_then(|i| MAX_MATCHES.get(i))
        .copied()
        .ok_or(ScheduleError::UnsupportedParticipantCount(n))
}

/// Check a roster size before any work, with the specific too-few / too-many error.
pub fn check_roster_size(n: usize) -> Result<(), ScheduleError> {
    if n < MIN_PARTICIPANTS {
        return Err(ScheduleError::InsufficientPlayers { count: n });
    }
    if n > MAX_PARTICIPANTS {
        return Err(ScheduleError::TooManyPlayers { count: n });
    }
    Ok(())
}
