//! JSON API over an in-memory store of club events.
//!
//! Each handler holds the store's write lock for its whole read-decide-write
//! cycle, so two regenerations of the same event never interleave.

use crate::models::{parse_roster_csv, Event, EventError, EventId, ParticipantId, Team};
use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, ServiceConfig},
    HttpResponse, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-event entry: event data + last activity time (for auto-cleanup).
pub struct EventEntry {
    event: Event,
    last_activity: Instant,
}

/// In-memory state: events by ID.
pub type AppState = Data<RwLock<HashMap<EventId, EventEntry>>>;

/// Empty event store, ready to hand to `App::app_data`.
pub fn new_state() -> AppState {
    Data::new(RwLock::new(HashMap::new()))
}

/// Drop events idle for `ttl` or longer. Returns how many were removed.
pub fn sweep_idle(state: &AppState, ttl: Duration) -> usize {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return 0,
    };
    let before = g.len();
    g.retain(|_, entry| entry.last_activity.elapsed() < ttl);
    before - g.len()
}

/// Register every API route.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_event)
        .service(api_get_event)
        .service(api_set_roster)
        .service(api_upload_roster_csv)
        .service(api_generate_matches)
        .service(api_regenerate_matches)
        .service(api_start_match)
        .service(api_record_result)
        .service(api_remove_participant);
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateEventBody {
    #[serde(default)]
    roster: Vec<ParticipantId>,
}

#[derive(Deserialize)]
struct RosterBody {
    roster: Vec<ParticipantId>,
}

#[derive(Deserialize)]
struct MatchResultBody {
    score: String,
    winning_team: Team,
}

/// Path segment: event id (e.g. /api/events/{id})
#[derive(Deserialize)]
struct EventPath {
    id: EventId,
}

/// Path segments: event id and match number (e.g. /api/events/{id}/matches/{number})
#[derive(Deserialize)]
struct EventMatchPath {
    id: EventId,
    number: u32,
}

/// Path segments: event id and participant (e.g. /api/events/{id}/participants/{participant})
#[derive(Deserialize)]
struct EventParticipantPath {
    id: EventId,
    participant: ParticipantId,
}

fn no_event() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No event" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Map an event error to a JSON error response (404 / 409 / 400).
fn error_response(e: EventError) -> HttpResponse {
    log::warn!("Rejected event operation: {}", e);
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        EventError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        EventError::ScheduleStarted
        | EventError::OutOfOrder { .. }
        | EventError::CompletedNotContiguous { .. } => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "club-match-scheduler",
    })
}

/// Create a new event (returns it with id; client stores id for subsequent requests).
#[post("/api/events")]
async fn api_create_event(state: AppState, body: Option<Json<CreateEventBody>>) -> HttpResponse {
    let roster = body.map(|b| b.into_inner().roster).unwrap_or_default();
    let event = match Event::new(roster) {
        Ok(event) => event,
        Err(e) => return error_response(e),
    };
    let id = event.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    log::info!("Created event {} with {} participants", id, event.roster.len());
    let response = HttpResponse::Ok().json(&event);
    g.insert(
        id,
        EventEntry {
            event,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get an event by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/events/{id}")]
async fn api_get_event(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.event)
        }
        None => no_event(),
    }
}

/// Replace the roster (only before any match starts).
#[put("/api/events/{id}/roster")]
async fn api_set_roster(state: AppState, path: Path<EventPath>, body: Json<RosterBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_event(),
    };
    entry.last_activity = Instant::now();
    let ev = &mut entry.event;
    match ev.set_roster(body.into_inner().roster) {
        Ok(()) => HttpResponse::Ok().json(ev),
        Err(e) => error_response(e),
    }
}

/// Replace the roster from a CSV upload (one participant per row).
#[post("/api/events/{id}/roster/csv")]
async fn api_upload_roster_csv(state: AppState, path: Path<EventPath>, body: String) -> HttpResponse {
    let roster = match parse_roster_csv(&body) {
        Ok(r) => r,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_event(),
    };
    entry.last_activity = Instant::now();
    let ev = &mut entry.event;
    match ev.set_roster(roster) {
        Ok(()) => HttpResponse::Ok().json(ev),
        Err(e) => error_response(e),
    }
}

/// Generate the full schedule (only before any match starts).
#[post("/api/events/{id}/matches/generate")]
async fn api_generate_matches(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_event(),
    };
    entry.last_activity = Instant::now();
    let ev = &mut entry.event;
    match ev.generate_matches() {
        Ok(()) => HttpResponse::Ok().json(ev),
        Err(e) => error_response(e),
    }
}

/// Keep completed matches and rebuild the rest.
#[post("/api/events/{id}/matches/regenerate")]
async fn api_regenerate_matches(state: AppState, path: Path<EventPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_event(),
    };
    entry.last_activity = Instant::now();
    let ev = &mut entry.event;
    match ev.regenerate() {
        Ok(()) => HttpResponse::Ok().json(ev),
        Err(e) => error_response(e),
    }
}

/// Mark a match as in progress.
#[put("/api/events/{id}/matches/{number}/start")]
async fn api_start_match(state: AppState, path: Path<EventMatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_event(),
    };
    entry.last_activity = Instant::now();
    let ev = &mut entry.event;
    match ev.start_match(path.number) {
        Ok(()) => HttpResponse::Ok().json(ev),
        Err(e) => error_response(e),
    }
}

/// Record score and winner for a match (completes it).
#[put("/api/events/{id}/matches/{number}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<EventMatchPath>,
    body: Json<MatchResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_event(),
    };
    entry.last_activity = Instant::now();
    let ev = &mut entry.event;
    let MatchResultBody { score, winning_team } = body.into_inner();
    match ev.record_result(path.number, score, winning_team) {
        Ok(()) => HttpResponse::Ok().json(ev),
        Err(e) => error_response(e),
    }
}

/// Withdraw a participant and rebuild the unplayed matches without them.
#[delete("/api/events/{id}/participants/{participant}")]
async fn api_remove_participant(state: AppState, path: Path<EventParticipantPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_event(),
    };
    entry.last_activity = Instant::now();
    let ev = &mut entry.event;
    match ev.remove_participant(&path.participant) {
        Ok(()) => HttpResponse::Ok().json(ev),
        Err(e) => error_response(e),
    }
}
