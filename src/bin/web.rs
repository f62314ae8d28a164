//! Single binary web server: REST API for competitions and their brackets.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT,
//! COMPETITION_TTL_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use club_bracket_web::{
    compute_layout, config::ServerConfig, export, roster, BracketError, Competition,
    CompetitionError, CompetitionId, LayoutDims, MatchId, Side, TeamId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Instant;

/// Per-competition entry: competition data + last activity time (for auto-cleanup).
struct CompetitionEntry {
    competition: Competition,
    last_activity: Instant,
}

/// In-memory state: competitions by ID. Idle entries are removed by the cleanup task.
type AppState = Data<RwLock<HashMap<CompetitionId, CompetitionEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateCompetitionBody {
    name: String,
}

#[derive(Deserialize)]
struct AddTeamBody {
    team_name: String,
    #[serde(default)]
    seed: Option<u32>,
}

#[derive(Deserialize)]
struct AssignSlotBody {
    match_id: MatchId,
    side: Side,
    /// null clears the slot.
    team_id: Option<TeamId>,
    #[serde(default)]
    expected_version: Option<u64>,
}

#[derive(Deserialize)]
struct SetWinnerBody {
    match_id: MatchId,
    team_id: TeamId,
    #[serde(default)]
    expected_version: Option<u64>,
}

#[derive(Deserialize)]
struct SetScoresBody {
    match_id: MatchId,
    home_score: Option<u32>,
    away_score: Option<u32>,
    #[serde(default)]
    expected_version: Option<u64>,
}

#[derive(Deserialize)]
struct VersionQuery {
    expected_version: Option<u64>,
}

/// Optional overrides of the default node size and gaps.
#[derive(Deserialize)]
struct LayoutQuery {
    match_width: Option<f64>,
    match_height: Option<f64>,
    round_gap_x: Option<f64>,
    match_gap_y: Option<f64>,
}

impl LayoutQuery {
    fn dims(&self) -> LayoutDims {
        let d = LayoutDims::default();
        let positive = |v: Option<f64>, default: f64| v.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default);
        LayoutDims {
            match_width: positive(self.match_width, d.match_width),
            match_height: positive(self.match_height, d.match_height),
            round_gap_x: positive(self.round_gap_x, d.round_gap_x),
            match_gap_y: positive(self.match_gap_y, d.match_gap_y),
        }
    }
}

/// Path segment: competition id (e.g. /api/competitions/{id})
#[derive(Deserialize)]
struct CompetitionPath {
    id: CompetitionId,
}

#[derive(Deserialize)]
struct CompetitionTeamPath {
    id: CompetitionId,
    team_id: TeamId,
}

#[derive(Deserialize)]
struct CompetitionMatchPath {
    id: CompetitionId,
    match_id: MatchId,
}

fn error_response(e: &CompetitionError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        CompetitionError::TeamNotFound(_)
        | CompetitionError::NoBracket
        | CompetitionError::Bracket(BracketError::UnknownMatch(_)) => HttpResponse::NotFound().json(body),
        CompetitionError::VersionConflict { .. }
        | CompetitionError::BracketLocked
        | CompetitionError::Bracket(BracketError::LockedMatchMutation(_)) => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No competition" }))
}

/// Run a mutation against one competition and answer with the updated competition.
fn mutate_competition(
    state: &AppState,
    id: CompetitionId,
    expected_version: Option<u64>,
    op: impl FnOnce(&mut Competition) -> Result<(), CompetitionError>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let c = &mut entry.competition;
    let result = c.check_version(expected_version).and_then(|()| op(&mut *c));
    match result {
        Ok(()) => HttpResponse::Ok().json(c),
        Err(e) => {
            log::warn!("Competition {}: rejected change: {}", id, e);
            error_response(&e)
        }
    }
}

/// Run a read against one competition. Touching it refreshes last_activity.
fn read_competition(
    state: &AppState,
    id: CompetitionId,
    op: impl FnOnce(&Competition) -> HttpResponse,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            op(&entry.competition)
        }
        None => not_found(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "club-bracket-web",
    })
}

#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new competition (returns it with id; client stores id for subsequent requests).
#[post("/api/competitions")]
async fn api_create_competition(state: AppState, body: Json<CreateCompetitionBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": "Name must not be empty" }));
    }
    let competition = Competition::new(name);
    let id = competition.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created competition {} ({})", id, name);
    let response = HttpResponse::Ok().json(&competition);
    g.insert(
        id,
        CompetitionEntry {
            competition,
            last_activity: Instant::now(),
        },
    );
    response
}

#[get("/api/competitions/{id}")]
async fn api_get_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    read_competition(&state, path.id, |c| HttpResponse::Ok().json(c))
}

/// Register a team (before the bracket is generated).
#[post("/api/competitions/{id}/teams")]
async fn api_add_team(state: AppState, path: Path<CompetitionPath>, body: Json<AddTeamBody>) -> HttpResponse {
    mutate_competition(&state, path.id, None, |c| {
        c.add_team(body.team_name.as_str(), body.seed).map(|_| ())
    })
}

/// Register teams from a CSV body with header `team_name,seed`.
#[post("/api/competitions/{id}/teams/import")]
async fn api_import_teams(state: AppState, path: Path<CompetitionPath>, body: String) -> HttpResponse {
    let entries = match roster::parse_teams_csv(body.as_bytes()) {
        Ok(entries) => entries,
        Err(e) => return error_response(&CompetitionError::Roster(e)),
    };
    mutate_competition(&state, path.id, None, |c| c.import_teams(entries).map(|_| ()))
}

#[delete("/api/competitions/{id}/teams/{team_id}")]
async fn api_remove_team(state: AppState, path: Path<CompetitionTeamPath>) -> HttpResponse {
    mutate_competition(&state, path.id, None, |c| c.remove_team(path.team_id))
}

/// Generate the bracket from the registered teams (replaces an existing one).
#[post("/api/competitions/{id}/bracket")]
async fn api_generate_bracket(
    state: AppState,
    path: Path<CompetitionPath>,
    query: Query<VersionQuery>,
) -> HttpResponse {
    mutate_competition(&state, path.id, query.expected_version, |c| {
        let bracket = c.generate_bracket()?;
        log::info!(
            "Competition {}: generated bracket with {} rounds",
            path.id,
            bracket.round_count
        );
        Ok(())
    })
}

/// Drop the bracket so teams can be edited again.
#[delete("/api/competitions/{id}/bracket")]
async fn api_reset_bracket(
    state: AppState,
    path: Path<CompetitionPath>,
    query: Query<VersionQuery>,
) -> HttpResponse {
    mutate_competition(&state, path.id, query.expected_version, |c| c.reset_bracket())
}

/// Assign a team to a slot (team_id null clears it).
#[put("/api/competitions/{id}/bracket/slots")]
async fn api_assign_slot(state: AppState, path: Path<CompetitionPath>, body: Json<AssignSlotBody>) -> HttpResponse {
    mutate_competition(&state, path.id, body.expected_version, |c| {
        c.assign_team(body.match_id, body.side, body.team_id)
    })
}

/// Set the winner of a match; the winner advances to the next round.
#[put("/api/competitions/{id}/bracket/winner")]
async fn api_set_winner(state: AppState, path: Path<CompetitionPath>, body: Json<SetWinnerBody>) -> HttpResponse {
    mutate_competition(&state, path.id, body.expected_version, |c| {
        c.set_winner(body.match_id, body.team_id)
    })
}

#[delete("/api/competitions/{id}/bracket/matches/{match_id}/winner")]
async fn api_clear_winner(
    state: AppState,
    path: Path<CompetitionMatchPath>,
    query: Query<VersionQuery>,
) -> HttpResponse {
    mutate_competition(&state, path.id, query.expected_version, |c| c.clear_winner(path.match_id))
}

#[put("/api/competitions/{id}/bracket/scores")]
async fn api_set_scores(state: AppState, path: Path<CompetitionPath>, body: Json<SetScoresBody>) -> HttpResponse {
    mutate_competition(&state, path.id, body.expected_version, |c| {
        c.set_scores(body.match_id, body.home_score, body.away_score)
    })
}

/// Node rectangles and connector paths for drawing the bracket.
#[get("/api/competitions/{id}/bracket/layout")]
async fn api_bracket_layout(state: AppState, path: Path<CompetitionPath>, query: Query<LayoutQuery>) -> HttpResponse {
    read_competition(&state, path.id, |c| match c.bracket() {
        Some(bracket) => HttpResponse::Ok().json(compute_layout(bracket, &query.dims())),
        None => error_response(&CompetitionError::NoBracket),
    })
}

#[get("/api/competitions/{id}/bracket/export.svg")]
async fn api_export_svg(state: AppState, path: Path<CompetitionPath>, query: Query<LayoutQuery>) -> HttpResponse {
    read_competition(&state, path.id, |c| match c.bracket() {
        Some(bracket) => {
            let layout = compute_layout(bracket, &query.dims());
            HttpResponse::Ok()
                .content_type("image/svg+xml")
                .body(export::render_svg(bracket, &layout, &c.team_names()))
        }
        None => error_response(&CompetitionError::NoBracket),
    })
}

#[get("/api/competitions/{id}/bracket/export.csv")]
async fn api_export_csv(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    read_competition(&state, path.id, |c| {
        let Some(bracket) = c.bracket() else {
            return error_response(&CompetitionError::NoBracket);
        };
        let mut buf = Vec::new();
        match export::write_matches_csv(bracket, &c.team_names(), &mut buf) {
            Ok(()) => HttpResponse::Ok().content_type("text/csv; charset=utf-8").body(buf),
            Err(e) => {
                log::error!("Competition {}: CSV export failed: {}", c.id, e);
                HttpResponse::InternalServerError().body("export error")
            }
        }
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(RwLock::new(HashMap::<CompetitionId, CompetitionEntry>::new()));

    // Background task: periodically remove competitions that have been idle past the TTL
    let state_cleanup = state.clone();
    let ttl = config.competition_ttl;
    let every = config.cleanup_interval;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < ttl);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive competition(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_create_competition)
            .service(api_get_competition)
            .service(api_add_team)
            .service(api_import_teams)
            .service(api_remove_team)
            .service(api_generate_bracket)
            .service(api_reset_bracket)
            .service(api_assign_slot)
            .service(api_set_winner)
            .service(api_clear_winner)
            .service(api_set_scores)
            .service(api_bracket_layout)
            .service(api_export_svg)
            .service(api_export_csv)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
