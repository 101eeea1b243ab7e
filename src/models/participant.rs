//! Participant ids and roster intake.

use crate::models::error::ScheduleError;
use std::collections::HashSet;

/// Opaque identifier for an event registrant. The engine never looks inside it.
pub type ParticipantId = String;

/// Errors from parsing a roster upload.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("could not read roster CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Header names accepted in the first row of a roster CSV.
const HEADER_NAMES: [&str; 3] = ["participant", "id", "name"];

/// Fail with `DuplicateParticipant` on the first id that appears twice.
pub fn ensure_unique(roster: &[ParticipantId]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::with_capacity(roster.len());
    for p in roster {
        if !seen.insert(p.as_str()) {
            return Err(ScheduleError::DuplicateParticipant(p.clone()));
        }
    }
    Ok(())
}

/// Parse a roster from CSV text: one participant per row, first column only.
///
/// An optional header row (`participant`, `id` or `name`) is skipped. Cells are
/// trimmed and blank rows ignored. Order is preserved; duplicates are rejected.
pub fn parse_roster_csv(text: &str) -> Result<Vec<ParticipantId>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut roster = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let Some(cell) = record.get(0) else { continue };
        if cell.is_empty() {
            continue;
        }
        if row == 0 && HEADER_NAMES.iter().any(|h| cell.eq_ignore_ascii_case(h)) {
            continue;
        }
        roster.push(cell.to_string());
    }
    ensure_unique(&roster)?;
    Ok(roster)
}
