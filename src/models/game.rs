//! Match, Team, and MatchStatus for doubles (2v2) games on a single court.

use crate::models::error::ScheduleError;
use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Events are played on one logical court.
pub const COURT: u8 = 1;

/// Which team won the match. Serialized as `1` or `2`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Team {
    #[default]
    One,
    Two,
}

impl Team {
    /// 1 or 2.
    pub fn number(self) -> u8 {
        match self {
            Team::One => 1,
            Team::Two => 2,
        }
    }
}

impl From<Team> for u8 {
    fn from(team: Team) -> u8 {
        team.number()
    }
}

impl TryFrom<u8> for Team {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Team::One),
            2 => Ok(Team::Two),
            other => Err(format!("team must be 1 or 2, got {other}")),
        }
    }
}

/// Lifecycle of a match: `Scheduled -> InProgress -> Completed`, or straight to `Completed`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// A single doubles match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub court: u8,
    /// Position in the play sequence, unique within a schedule.
    pub match_number: u32,
    /// All four participants (union of the two teams).
    pub players: Vec<ParticipantId>,
    pub team_1: Vec<ParticipantId>,
    pub team_2: Vec<ParticipantId>,
    pub status: MatchStatus,
    /// Set only once completed.
    pub score: Option<String>,
    /// Present only together with `score`.
    pub winning_team: Option<Team>,
}

impl Match {
    /// A scheduled match on the court. `players` is derived from the two teams.
    pub fn new(match_number: u32, team_1: Vec<ParticipantId>, team_2: Vec<ParticipantId>) -> Self {
        let players = team_1.iter().chain(team_2.iter()).cloned().collect();
        Self {
            court: COURT,
            match_number,
            players,
            team_1,
            team_2,
            status: MatchStatus::Scheduled,
            score: None,
            winning_team: None,
        }
    }

    pub fn involves(&self, participant: &str) -> bool {
        self.players.iter().any(|p| p == participant)
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Start live tracking (`Scheduled -> InProgress`).
    pub fn start(&mut self) -> Result<(), ScheduleError> {
        if self.status != MatchStatus::Scheduled {
            return Err(self.invalid_transition(MatchStatus::InProgress));
        }
        self.status = MatchStatus::InProgress;
        Ok(())
    }

    /// Record the result and freeze the match. Allowed from `Scheduled` or `InProgress`.
    pub fn complete(&mut self, score: impl Into<String>, winning_team: Team) -> Result<(), ScheduleError> {
        if self.status == MatchStatus::Completed {
            return Err(self.invalid_transition(MatchStatus::Completed));
        }
        let score = score.into();
        let score = score.trim();
        if score.is_empty() {
            return Err(ScheduleError::MissingScore {
                match_number: self.match_number,
            });
        }
        self.score = Some(score.to_string());
        self.winning_team = Some(winning_team);
        self.status = MatchStatus::Completed;
        Ok(())
    }

    fn invalid_transition(&self, to: MatchStatus) -> ScheduleError {
        ScheduleError::InvalidTransition {
            match_number: self.match_number,
            from: self.status,
            to,
        }
    }
}
