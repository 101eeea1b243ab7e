//! Integration tests for the Event aggregate and roster intake.

use club_match_scheduler::{
    parse_roster_csv, validate, Event, EventError, MatchStatus, RosterError, ScheduleError, Team,
};

fn roster(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn event_with(n: usize) -> Event {
    let mut ev = Event::new(roster(n)).unwrap();
    ev.generate_matches().unwrap();
    ev
}

#[test]
fn new_event_rejects_duplicate_roster() {
    let r = vec!["A".to_string(), "B".to_string(), "A".to_string()];
    assert_eq!(
        Event::new(r).unwrap_err(),
        EventError::Schedule(ScheduleError::DuplicateParticipant("A".to_string()))
    );
}

#[test]
fn generate_builds_full_schedule() {
    let ev = event_with(10);
    assert_eq!(ev.matches.len(), 5);
    assert_eq!(ev.next_match_number(), 1);
    validate(&ev.matches).unwrap();
}

#[test]
fn generate_with_too_few_players_keeps_event_unchanged() {
    let mut ev = Event::new(roster(3)).unwrap();
    assert_eq!(
        ev.generate_matches(),
        Err(EventError::Schedule(ScheduleError::InsufficientPlayers { count: 3 }))
    );
    assert!(ev.matches.is_empty());
}

#[test]
fn results_move_matches_through_their_states() {
    let mut ev = event_with(6);
    ev.start_match(1).unwrap();
    assert_eq!(ev.matches[0].status, MatchStatus::InProgress);
    ev.record_result(1, "21-14", Team::One).unwrap();
    assert!(ev.matches[0].is_completed());
    assert_eq!(ev.completed_matches().len(), 1);
    assert_eq!(ev.incomplete_matches().len(), 2);
    assert_eq!(ev.next_match_number(), 2);

    assert_eq!(ev.start_match(9), Err(EventError::MatchNotFound(9)));
}

#[test]
fn roster_and_full_generation_are_locked_once_play_starts() {
    let mut ev = event_with(8);
    ev.start_match(1).unwrap();
    assert_eq!(ev.set_roster(roster(9)), Err(EventError::ScheduleStarted));
    assert_eq!(ev.generate_matches(), Err(EventError::ScheduleStarted));
}

#[test]
fn regenerate_keeps_completed_and_rebuilds_tail() {
    let mut ev = event_with(6);
    ev.record_result(1, "21-9", Team::Two).unwrap();
    let first = ev.matches[0].clone();

    ev.regenerate().unwrap();
    assert_eq!(ev.matches.len(), 3);
    assert_eq!(ev.matches[0], first);
    let numbers: Vec<u32> = ev.matches.iter().map(|m| m.match_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    validate(&ev.matches).unwrap();
}

#[test]
fn regenerate_without_schedule_is_rejected() {
    let mut ev = Event::new(roster(6)).unwrap();
    assert_eq!(ev.regenerate(), Err(EventError::NoSchedule));
}

#[test]
fn removing_participant_updates_roster_and_schedule() {
    let mut ev = event_with(8);
    ev.record_result(1, "21-11", Team::One).unwrap();
    let absent = ev
        .roster
        .iter()
        .find(|p| !ev.matches[0].involves(p))
        .cloned()
        .unwrap();

    ev.remove_participant(&absent).unwrap();
    assert_eq!(ev.roster.len(), 7);
    assert!(!ev.roster.contains(&absent));
    assert_eq!(ev.matches.len(), 3);
    assert!(ev.matches.iter().all(|m| !m.involves(&absent)));
    validate(&ev.matches).unwrap();
}

#[test]
fn failed_removal_leaves_event_untouched() {
    let mut ev = event_with(4);
    let before = ev.matches.clone();
    assert_eq!(
        ev.remove_participant("P0"),
        Err(EventError::Schedule(ScheduleError::InsufficientEligiblePlayers { eligible: 3 }))
    );
    assert_eq!(ev.matches, before);
    assert_eq!(ev.roster.len(), 4);
}

#[test]
fn removal_before_generation_only_edits_roster() {
    let mut ev = Event::new(roster(5)).unwrap();
    ev.remove_participant("P2").unwrap();
    assert_eq!(ev.roster, vec!["P0", "P1", "P3", "P4"]);
    assert!(ev.matches.is_empty());
}

#[test]
fn roster_csv_with_header_and_blank_rows() {
    let text = "participant\n alice \nbob,extra\n\ncarol\n";
    assert_eq!(parse_roster_csv(text).unwrap(), vec!["alice", "bob", "carol"]);
}

#[test]
fn roster_csv_without_header_keeps_first_row() {
    assert_eq!(parse_roster_csv("dave\nerin").unwrap(), vec!["dave", "erin"]);
}

#[test]
fn roster_csv_rejects_duplicates() {
    match parse_roster_csv("id\nx\ny\nx\n") {
        Err(RosterError::Schedule(ScheduleError::DuplicateParticipant(p))) => assert_eq!(p, "x"),
        other => panic!("expected duplicate error, got {other:?}"),
    }
}

#[test]
fn event_serializes_with_snake_case_statuses() {
    let mut ev = event_with(4);
    ev.record_result(1, "21-19", Team::One).unwrap();
    let json = serde_json::to_value(&ev).unwrap();
    assert_eq!(json["matches"][0]["status"], "completed");
    assert_eq!(json["matches"][0]["winning_team"], 1);
    assert_eq!(json["matches"][1]["status"], "scheduled");
    assert_eq!(json["matches"][1]["court"], 1);
}

#[test]
fn matches_must_be_played_in_number_order() {
    let mut ev = event_with(6);
    assert_eq!(
        ev.record_result(3, "21-12", Team::One),
        Err(EventError::OutOfOrder {
            match_number: 3,
            pending: 1
        })
    );
    assert_eq!(
        ev.start_match(2),
        Err(EventError::OutOfOrder {
            match_number: 2,
            pending: 1
        })
    );
    assert!(ev.completed_matches().is_empty());

    ev.record_result(1, "21-12", Team::One).unwrap();
    ev.start_match(2).unwrap();
    ev.record_result(2, "19-21", Team::Two).unwrap();
    assert_eq!(ev.next_match_number(), 3);
}

#[test]
fn regenerate_refuses_gapped_history() {
    let mut ev = event_with(6);
    // Completed out of band (e.g. a stored event edited by hand).
    ev.matches[2].complete("21-15", Team::One).unwrap();
    assert_eq!(
        ev.regenerate(),
        Err(EventError::CompletedNotContiguous { missing: 1 })
    );
    assert_eq!(
        ev.remove_participant("P3"),
        Err(EventError::CompletedNotContiguous { missing: 1 })
    );
    let numbers: Vec<u32> = ev.matches.iter().map(|m| m.match_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn winning_team_travels_as_a_number() {
    assert_eq!(serde_json::to_string(&Team::Two).unwrap(), "2");
    assert_eq!(serde_json::from_str::<Team>("1").unwrap(), Team::One);
    assert!(serde_json::from_str::<Team>("3").is_err());
    assert!(serde_json::from_str::<Team>("\"one\"").is_err());
}
