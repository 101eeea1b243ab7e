//! Constraint validator: shape of each match, unique numbering, per-participant cap.

use crate::logic::fairness::MAX_MATCHES_PER_PARTICIPANT;
use crate::models::{Match, ScheduleError, Violation};
use std::collections::{HashMap, HashSet};

/// Validate a whole schedule. Checks run in order: match shape, unique match
/// numbers, then the two-matches-per-participant cap.
pub fn validate(schedule: &[Match]) -> Result<(), ScheduleError> {
    check_schedule(schedule).map_err(ScheduleError::ConstraintViolation)
}

/// Same checks as [`validate`], returning the bare violation.
pub fn check_schedule(schedule: &[Match]) -> Result<(), Violation> {
    for m in schedule {
        check_match(m)?;
    }

    let mut numbers = HashSet::with_capacity(schedule.len());
    for m in schedule {
        if !numbers.insert(m.match_number) {
            return Err(Violation::DuplicateMatchNumber {
                match_number: m.match_number,
            });
        }
    }

    let mut seen: HashMap<&str, Vec<u32>> = HashMap::new();
    for m in schedule {
        for p in &m.players {
            let played = seen.entry(p.as_str()).or_default();
            played.push(m.match_number);
            if played.len() > MAX_MATCHES_PER_PARTICIPANT {
                let match_numbers: Vec<u32> = schedule
                    .iter()
                    .filter(|m| m.involves(p))
                    .map(|m| m.match_number)
                    .collect();
                return Err(Violation::TooManyMatches {
                    participant: p.clone(),
                    count: match_numbers.len(),
                    match_numbers,
                });
            }
        }
    }
    Ok(())
}

/// Four distinct players, split 2/2 into disjoint teams that cover them.
pub fn check_match(m: &Match) -> Result<(), Violation> {
    let match_number = m.match_number;
    if m.players.len() != 4 {
        return Err(Violation::WrongPlayerCount {
            match_number,
            count: m.players.len(),
        });
    }
    let mut players = HashSet::with_capacity(4);
    for p in &m.players {
        if !players.insert(p.as_str()) {
            return Err(Violation::DuplicatePlayer {
                match_number,
                participant: p.clone(),
            });
        }
    }

    for (team, members) in [(1, &m.team_1), (2, &m.team_2)] {
        if members.len() != 2 {
            return Err(Violation::WrongTeamSize {
                match_number,
                team,
                size: members.len(),
            });
        }
    }
    if let Some(p) = m.team_1.iter().find(|p| m.team_2.contains(p)) {
        return Err(Violation::TeamsOverlap {
            match_number,
            participant: p.clone(),
        });
    }
    let teams: HashSet<&str> = m.team_1.iter().chain(m.team_2.iter()).map(String::as_str).collect();
    if teams != players {
        return Err(Violation::TeamsDoNotCoverPlayers { match_number });
    }
    Ok(())
}

/// How many matches each participant appears in.
pub fn appearances(matches: &[Match]) -> HashMap<&str, usize> {
    let mut counts = HashMap::new();
    for m in matches {
        for p in &m.players {
            *counts.entry(p.as_str()).or_insert(0) += 1;
        }
    }
    counts
}

/// The number the next appended match should take: one past the highest in use.
pub fn next_match_number(matches: &[Match]) -> u32 {
    matches.iter().map(|m| m.match_number).max().map_or(1, |n| n + 1)
}
