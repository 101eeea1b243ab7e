//! Rotation catalog: fixed groupings of roster positions into matches.
//!
//! One table per supported roster size. Each row is one match, listing four
//! 0-based positions into the roster as supplied by the caller. Every table has
//! `max_matches(n)` rows, no position appears in more than two rows, and for even
//! `n` every position appears in exactly two. For odd `n` exactly two positions
//! play once. Rows are distinct except for `n = 4`, where both matches
//! necessarily use the whole roster (teams are reshuffled per match).
//!
//! Supporting another size means adding a table here and letting the tests
//! below verify it.

use crate::logic::fairness::{MAX_PARTICIPANTS, MIN_PARTICIPANTS};
use crate::models::ScheduleError;

/// Four roster positions forming one match.
pub type PositionGroup = [usize; 4];

const N4: &[PositionGroup] = &[[0, 1, 2, 3], [0, 1, 2, 3]];

const N5: &[PositionGroup] = &[[0, 1, 2, 3], [4, 0, 1, 2]];

const N6: &[PositionGroup] = &[[0, 1, 2, 3], [2, 3, 4, 5], [4, 5, 0, 1]];

const N7: &[PositionGroup] = &[[0, 1, 2, 3], [4, 5, 6, 0], [1, 2, 4, 5]];

const N8: &[PositionGroup] = &[[0, 1, 2, 3], [4, 5, 6, 7], [0, 2, 4, 6], [1, 3, 5, 7]];

const N9: &[PositionGroup] = &[[0, 1, 2, 3], [4, 5, 6, 7], [8, 0, 2, 4], [1, 3, 5, 6]];

const N10: &[PositionGroup] = &[
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 0, 4],
    [1, 2, 5, 8],
    [3, 6, 7, 9],
];

const N11: &[PositionGroup] = &[
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 0],
    [1, 4, 8, 5],
    [2, 6, 9, 3],
];

const N12: &[PositionGroup] = &[
    [0, 1, 2, 3],
    [4, 5, 6, 7],
    [8, 9, 10, 11],
    [0, 4, 8, 1],
    [5, 9, 2, 6],
    [10, 3, 7, 11],
];

/// Indexed by `n - MIN_PARTICIPANTS`.
const CATALOG: [&[PositionGroup]; MAX_PARTICIPANTS - MIN_PARTICIPANTS + 1] =
    [N4, N5, N6, N7, N8, N9, N10, N11, N12];

/// Groups of roster positions for `n` participants, in play order.
pub fn rotation_for(n: usize) -> Result<&'static [PositionGroup], ScheduleError> {
    n.checked_sub(MIN_PARTICIPANTS)
        .and_then(|i| CATALOG.get(i))
        .copied()
        .ok_or(ScheduleError::UnsupportedParticipantCount(n))
}
