//! Error taxonomy for the scheduling engine.

use crate::models::game::MatchStatus;
use crate::models::participant::ParticipantId;
use thiserror::Error;

/// A specific broken schedule invariant, with enough context to find it.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    #[error("match {match_number} has {count} players, expected 4")]
    WrongPlayerCount { match_number: u32, count: usize },

    #[error("match {match_number} lists participant {participant} more than once")]
    DuplicatePlayer {
        match_number: u32,
        participant: ParticipantId,
    },

    #[error("match {match_number}: team {team} has {size} players, expected 2")]
    WrongTeamSize {
        match_number: u32,
        team: u8,
        size: usize,
    },

    #[error("match {match_number}: participant {participant} is on both teams")]
    TeamsOverlap {
        match_number: u32,
        participant: ParticipantId,
    },

    #[error("match {match_number}: teams do not cover the match's players")]
    TeamsDoNotCoverPlayers { match_number: u32 },

    #[error("match number {match_number} is used more than once")]
    DuplicateMatchNumber { match_number: u32 },

    #[error("participant {participant} is in {count} matches (max 2): {match_numbers:?}")]
    TooManyMatches {
        participant: ParticipantId,
        count: usize,
        match_numbers: Vec<u32>,
    },
}

/// Errors raised by the scheduling engine. Nothing here is transient; none should be retried.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ScheduleError {
    #[error("unsupported participant count {0} (supported: 4 to 12)")]
    UnsupportedParticipantCount(usize),

    #[error("need at least 4 players to build matches, got {count}")]
    InsufficientPlayers { count: usize },

    #[error("at most 12 players are supported, got {count}")]
    TooManyPlayers { count: usize },

    #[error("participant {0} appears more than once in the roster")]
    DuplicateParticipant(ParticipantId),

    #[error("cannot regenerate matches: only {eligible} participants can still play")]
    InsufficientEligiblePlayers { eligible: usize },

    #[error("cannot number {needed} new matches from {next_match_number} (numbers are 1 to u32::MAX)")]
    InvalidMatchNumber { next_match_number: u32, needed: usize },

    #[error("schedule constraint violated: {0}")]
    ConstraintViolation(Violation),

    #[error("internal schedule invariant violated (corrupted rotation table?): {0}")]
    InternalScheduleInvariantViolation(Violation),

    #[error("participant {0} already played a completed match and cannot be removed")]
    PlayerInCompletedMatch(ParticipantId),

    #[error("participant {0} is not on the roster")]
    PlayerNotInRoster(ParticipantId),

    #[error("match {match_number} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        match_number: u32,
        from: MatchStatus,
        to: MatchStatus,
    },

    #[error("match {match_number} cannot be completed without a score")]
    MissingScore { match_number: u32 },
}

impl ScheduleError {
    /// True for the errors caused by a roster size outside what the engine supports.
    pub fn is_count_error(&self) -> bool {
        matches!(
            self,
            ScheduleError::UnsupportedParticipantCount(_)
                | ScheduleError::InsufficientPlayers { .. }
                | ScheduleError::TooManyPlayers { .. }
        )
    }

    /// The violation behind a constraint error, if this is one.
    pub fn violation(&self) -> Option<&Violation> {
        match self {
            ScheduleError::ConstraintViolation(v)
            | ScheduleError::InternalScheduleInvariantViolation(v) => Some(v),
            _ => None,
        }
    }
}
