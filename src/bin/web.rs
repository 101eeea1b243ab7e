//! Single binary web server for the club match scheduler.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! EVENT_TTL_HOURS, CLEANUP_INTERVAL_MINUTES. Log level via RUST_LOG (default info).

use actix_web::{App, HttpServer};
use club_match_scheduler::config::ServerConfig;
use club_match_scheduler::http::{configure, new_state, sweep_idle};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = new_state();

    // Background task: periodically drop events nobody has touched within the TTL
    let state_cleanup = state.clone();
    let (ttl, every) = (config.event_ttl, config.cleanup_interval);
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = sweep_idle(&state_cleanup, ttl);
            if removed > 0 {
                log::info!("Cleaned up {} inactive event(s)", removed);
            }
        }
    });

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
