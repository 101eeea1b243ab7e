//! Event: roster plus its match schedule, as stored by the event collaborator.

use crate::logic::{
    generate_matches, next_match_number, regenerate_matches, remove_player,
};
use crate::models::error::ScheduleError;
use crate::models::game::{Match, MatchStatus, Team};
use crate::models::participant::{ensure_unique, ParticipantId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for an event.
pub type EventId = Uuid;

/// Errors from event operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum EventError {
    /// No match with this number in the schedule.
    #[error("match {0} not found")]
    MatchNotFound(u32),
    /// Roster changes and full regeneration are only allowed before play starts.
    #[error("a match has already started; only the unplayed tail can be regenerated")]
    ScheduleStarted,
    /// Regeneration needs an existing schedule.
    #[error("no matches have been generated yet")]
    NoSchedule,
    /// Matches are played in number order on the single court.
    #[error("match {match_number} cannot be played before match {pending}")]
    OutOfOrder { match_number: u32, pending: u32 },
    /// Completed matches must be exactly 1..=k before the tail can be rebuilt.
    #[error("completed matches are not numbered 1..=k (match {missing} is not completed)")]
    CompletedNotContiguous { missing: u32 },
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// One club event: confirmed participants and the doubles schedule built for them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Confirmed participants, in the order used for rotation lookups.
    pub roster: Vec<ParticipantId>,
    /// Full schedule, ordered by match number.
    pub matches: Vec<Match>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create an event with the given roster and no matches.
    pub fn new(roster: Vec<ParticipantId>) -> Result<Self, EventError> {
        ensure_unique(&roster)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            roster,
            matches: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// True once any match has left `Scheduled`.
    pub fn has_started(&self) -> bool {
        self.matches.iter().any(|m| m.status != MatchStatus::Scheduled)
    }

    /// Replace the roster (only before play starts). Clears any existing schedule.
    pub fn set_roster(&mut self, roster: Vec<ParticipantId>) -> Result<(), EventError> {
        if self.has_started() {
            return Err(EventError::ScheduleStarted);
        }
        ensure_unique(&roster)?;
        self.roster = roster;
        self.matches.clear();
        self.touch();
        Ok(())
    }

    /// Build the schedule from scratch. Replaces any schedule that has not started.
    pub fn generate_matches(&mut self) -> Result<(), EventError> {
        if self.has_started() {
            return Err(EventError::ScheduleStarted);
        }
        self.matches = generate_matches(&self.roster)?;
        self.touch();
        Ok(())
    }

    pub fn get_match_mut(&mut self, match_number: u32) -> Result<&mut Match, EventError> {
        self.matches
            .iter_mut()
            .find(|m| m.match_number == match_number)
            .ok_or(EventError::MatchNotFound(match_number))
    }

    /// Mark a match as being played.
    pub fn start_match(&mut self, match_number: u32) -> Result<(), EventError> {
        self.ensure_turn(match_number)?;
        self.get_match_mut(match_number)?.start()?;
        self.touch();
        Ok(())
    }

    /// Record a score and winner, completing the match.
    pub fn record_result(
        &mut self,
        match_number: u32,
        score: impl Into<String>,
        winning_team: Team,
    ) -> Result<(), EventError> {
        self.ensure_turn(match_number)?;
        self.get_match_mut(match_number)?.complete(score, winning_team)?;
        self.touch();
        Ok(())
    }

    pub fn completed_matches(&self) -> Vec<Match> {
        self.matches.iter().filter(|m| m.is_completed()).cloned().collect()
    }

    pub fn incomplete_matches(&self) -> Vec<Match> {
        self.matches.iter().filter(|m| !m.is_completed()).cloned().collect()
    }

    /// One past the highest completed match number (1 if nothing is completed).
    pub fn next_match_number(&self) -> u32 {
        next_match_number(&self.completed_matches())
    }

    /// Keep completed matches and rebuild everything after them.
    pub fn regenerate(&mut self) -> Result<(), EventError> {
        if self.matches.is_empty() {
            return Err(EventError::NoSchedule);
        }
        self.ensure_completed_prefix()?;
        let completed = self.completed_matches();
        let new = regenerate_matches(&self.roster, &completed, self.next_match_number())?;
        self.matches = completed.into_iter().chain(new).collect();
        self.touch();
        Ok(())
    }

    /// Withdraw a participant: drop them from the roster and rebuild the unplayed tail.
    pub fn remove_participant(&mut self, participant: &str) -> Result<(), EventError> {
        if self.matches.is_empty() {
            let before = self.roster.len();
            self.roster.retain(|p| p != participant);
            if self.roster.len() == before {
                return Err(ScheduleError::PlayerNotInRoster(participant.to_string()).into());
            }
            self.touch();
            return Ok(());
        }
        self.ensure_completed_prefix()?;
        let removal = remove_player(
            &self.roster,
            &self.completed_matches(),
            &self.incomplete_matches(),
            participant,
        )?;
        self.roster.retain(|p| p != participant);
        self.matches = removal.into_schedule();
        self.touch();
        Ok(())
    }

    /// `match_number` must exist and every lower-numbered match must be completed.
    fn ensure_turn(&self, match_number: u32) -> Result<(), EventError> {
        if !self.matches.iter().any(|m| m.match_number == match_number) {
            return Err(EventError::MatchNotFound(match_number));
        }
        let pending = self
            .matches
            .iter()
            .filter(|m| m.match_number < match_number && !m.is_completed())
            .map(|m| m.match_number)
            .min();
        match pending {
            Some(pending) => Err(EventError::OutOfOrder {
                match_number,
                pending,
            }),
            None => Ok(()),
        }
    }

    /// Completed match numbers must be exactly `1..=k`, so the rebuilt tail continues without gaps.
    fn ensure_completed_prefix(&self) -> Result<(), EventError> {
        let mut numbers: Vec<u32> = self
            .matches
            .iter()
            .filter(|m| m.is_completed())
            .map(|m| m.match_number)
            .collect();
        numbers.sort_unstable();
        for (expected, number) in (1u32..).zip(numbers) {
            if number != expected {
                return Err(EventError::CompletedNotContiguous { missing: expected });
            }
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
