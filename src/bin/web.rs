//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! New tournaments start with the bundled data/demo_roster.csv registered. Set ROSTER_CSV to
//! another `name,rating` file to use that instead, or to an empty string for an empty roster.

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use knockout_tournament::{
    advance_round, import_roster, read_roster_csv, report_result, start_tournament,
    write_history_csv, Competitor, CompetitorId, PairingId, Roster, Tournament, TournamentError,
    TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Roster bundled with the binary, used when ROSTER_CSV is unset.
const DEFAULT_ROSTER: &str = include_str!("../../data/demo_roster.csv");

/// Competitors loaded at startup, registered into each new tournament.
struct SeedRoster(Vec<Competitor>);

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddCompetitorBody {
    name: String,
    /// Rating as typed; a JSON number is accepted too.
    rating: serde_json::Value,
}

#[derive(Deserialize)]
struct ReportResultBody {
    pairing_id: PairingId,
    winner_id: CompetitorId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and competitor id.
#[derive(Deserialize)]
struct TournamentCompetitorPath {
    id: TournamentId,
    competitor_id: CompetitorId,
}

fn rating_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn error_response(e: &TournamentError) -> HttpResponse {
    log::warn!("Rejected command ({:?}): {}", e.kind(), e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string(), "kind": e.kind() }))
}

/// Look up a tournament under the write lock, refresh its last_activity, and build a response from it.
fn with_entry<F>(state: &AppState, id: TournamentId, respond: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    };
    entry.last_activity = Instant::now();
    respond(&mut entry.tournament)
}

/// Run one command against a tournament and render the resulting view.
fn apply<F>(state: &AppState, id: TournamentId, command: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> Result<(), TournamentError>,
{
    with_entry(state, id, |t| match command(&mut *t) {
        Ok(()) => HttpResponse::Ok().json(t.view()),
        Err(e) => error_response(&e),
    })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-tournament",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new tournament (client stores the returned id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, seed: Data<SeedRoster>) -> HttpResponse {
    let mut roster = Roster::new();
    roster.extend(seed.0.iter().map(|c| Competitor::new(c.name.clone(), c.rating)));
    let tournament = Tournament::with_roster(roster);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(tournament.view());
    g.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    log::info!("Created tournament {}", id);
    response
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |_| Ok(()))
}

/// Register a competitor (NotStarted only).
#[post("/api/tournaments/{id}/competitors")]
async fn api_add_competitor(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddCompetitorBody>,
) -> HttpResponse {
    let rating = rating_text(&body.rating);
    apply(&state, path.id, |t| t.add_competitor(&body.name, &rating).map(|_| ()))
}

/// Register competitors from a `name,rating` CSV body (NotStarted only).
#[post("/api/tournaments/{id}/competitors/import")]
async fn api_import_competitors(state: AppState, path: Path<TournamentPath>, body: String) -> HttpResponse {
    apply(&state, path.id, |t| import_roster(t, body.as_bytes()).map(|_| ()))
}

/// Remove a competitor by id (NotStarted only).
#[delete("/api/tournaments/{id}/competitors/{competitor_id}")]
async fn api_remove_competitor(state: AppState, path: Path<TournamentCompetitorPath>) -> HttpResponse {
    apply(&state, path.id, |t| t.remove_competitor(path.competitor_id))
}

/// Start the tournament and pair round 1.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, start_tournament)
}

/// Set the winner of one active pairing.
#[put("/api/tournaments/{id}/pairings/winner")]
async fn api_report_result(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    apply(&state, path.id, |t| report_result(t, body.pairing_id, body.winner_id))
}

/// Close the current round once every pairing is decided.
#[post("/api/tournaments/{id}/advance")]
async fn api_advance_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, advance_round)
}

/// Reset: back to NotStarted with the same roster.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    apply(&state, path.id, |t| {
        t.reset_tournament();
        Ok(())
    })
}

/// Download completed rounds as CSV.
#[get("/api/tournaments/{id}/history.csv")]
async fn api_history_csv(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_entry(&state, path.id, |t| {
        let mut buf = Vec::new();
        match write_history_csv(t, &mut buf) {
            Ok(()) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(buf),
            Err(e) => {
                log::error!("History export failed for {}: {}", t.id, e);
                HttpResponse::InternalServerError().body("export error")
            }
        }
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Load the startup roster: ROSTER_CSV if set (empty means none), else the bundled default.
/// A missing or invalid file falls back to an empty roster.
fn load_seed_roster() -> Vec<Competitor> {
    let path = match std::env::var("ROSTER_CSV") {
        Ok(path) => path,
        Err(_) => return parse_seed_roster("bundled roster", DEFAULT_ROSTER.as_bytes()),
    };
    if path.trim().is_empty() {
        log::info!("ROSTER_CSV is empty; new tournaments start with no competitors");
        return Vec::new();
    }
    match std::fs::File::open(&path) {
        Ok(file) => parse_seed_roster(&path, file),
        Err(e) => {
            log::warn!("Cannot open ROSTER_CSV {}: {}", path, e);
            Vec::new()
        }
    }
}

fn parse_seed_roster<R: std::io::Read>(source: &str, reader: R) -> Vec<Competitor> {
    match read_roster_csv(reader) {
        Ok(competitors) => {
            log::info!("Loaded {} competitor(s) from {}", competitors.len(), source);
            competitors
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", source, e);
            Vec::new()
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));
    let seed = Data::new(SeedRoster(load_seed_roster()));

    // Every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(seed.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_competitor)
            .service(api_import_competitors)
            .service(api_remove_competitor)
            .service(api_start_tournament)
            .service(api_report_result)
            .service(api_advance_round)
            .service(api_reset_tournament)
            .service(api_history_csv)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn empty_state() -> AppState {
        Data::new(RwLock::new(HashMap::new()))
    }

    #[::core::prelude::v1::test]
    fn bundled_roster_has_default_players() {
        let competitors = parse_seed_roster("bundled roster", DEFAULT_ROSTER.as_bytes());
        assert_eq!(competitors.len(), 8);
        assert_eq!(competitors[0].name, "Magnus Carlsen");
        assert_eq!(competitors[0].rating, 2850);
    }

    #[actix_web::test]
    async fn created_tournament_registers_seed_roster() {
        let state = empty_state();
        let seed = Data::new(SeedRoster(parse_seed_roster("bundled roster", DEFAULT_ROSTER.as_bytes())));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(seed)
                .service(api_create_tournament),
        )
        .await;
        let req = test::TestRequest::post().uri("/api/tournaments").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["competitors"].as_array().unwrap().len(), 8);
        assert_eq!(body["competitors"][0]["rating_band"], "super_grandmaster");
        assert_eq!(state.read().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn add_competitor_succeeds_or_rejects_without_change() {
        let state = empty_state();
        let tournament = Tournament::new();
        let id = tournament.id;
        state.write().unwrap().insert(
            id,
            TournamentEntry {
                tournament,
                last_activity: Instant::now(),
            },
        );
        let app = test::init_service(App::new().app_data(state.clone()).service(api_add_competitor)).await;
        let uri = format!("/api/tournaments/{id}/competitors");

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(serde_json::json!({ "name": "Ding Liren", "rating": "2810" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["competitors"][0]["name"], "Ding Liren");

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(serde_json::json!({ "name": "Wesley So", "rating": 2780 }))
            .to_request();
        assert!(test::call_service(&app, req).await.status().is_success());

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(serde_json::json!({ "name": "Nobody", "rating": "abc" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "invalid_input");

        assert_eq!(state.read().unwrap()[&id].tournament.roster.len(), 2);
    }

    #[actix_web::test]
    async fn history_export_refreshes_last_activity() {
        let state = empty_state();
        let tournament = Tournament::new();
        let id = tournament.id;
        let before = Instant::now();
        state.write().unwrap().insert(
            id,
            TournamentEntry {
                tournament,
                last_activity: before,
            },
        );
        std::thread::sleep(Duration::from_millis(20));

        let app = test::init_service(App::new().app_data(state.clone()).service(api_history_csv)).await;
        let req = test::TestRequest::get()
            .uri(&format!("/api/tournaments/{id}/history.csv"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        assert!(state.read().unwrap()[&id].last_activity > before);
    }
}
