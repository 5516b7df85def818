use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::answer::Answerer;
use crate::catalog::{OmdbClient, TmdbClient};
use crate::config::Config;
use crate::llm::{
    CloudGenerator, OllamaGenerator, ANSWER_MAX_TOKENS, CONDENSE_MAX_TOKENS, NARRATIVE_MAX_TOKENS,
    SAMPLING_TEMPERATURE,
};
use crate::merge::merge_records;
use crate::models::{
    CreateSessionResponse, FetchRequest, FetchResponse, MovieCard, QuestionRequest,
    QuestionResponse, SessionView,
};
use crate::sanitize::sanitize_input;
use crate::session::{InMemorySessionStorage, Session, SessionStorage};
use crate::summarize::Summarizer;

/// Guide shown until the first successful fetch.
pub const USER_GUIDE: &str = "How to use this service:\n\
    1. Select a movie\n\
    2. Fetch movie information\n\
    3. View the movie summary and details\n\
    4. Ask questions about the movie";

/// Lookup misses and catalog transport failures read the same to the user.
const MOVIE_NOT_FOUND: &str = "Movie not found.";
/// Guidance returned when a question arrives before any fetch succeeded.
const FETCH_FIRST: &str = "Please fetch the movie information first.";

type ApiError = (StatusCode, Json<Value>);
type ApiResult<T> = Result<Json<T>, ApiError>;

fn bad_request_error(message: &str) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn not_found_error(message: &str, id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": message,
            "session_id": id
        })),
    )
}

fn internal_error(message: &str, details: &str) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message,
            "details": details
        })),
    )
}

#[derive(Clone)]
pub struct AppState {
    pub session_storage: Arc<dyn SessionStorage>,
    pub tmdb: TmdbClient,
    pub omdb: OmdbClient,
    pub summarizer: Arc<Summarizer>,
    pub answerer: Arc<Answerer>,
}

pub fn create_app(config: Config) -> Router {
    build_router(create_app_state(config))
}

fn create_app_state(config: Config) -> AppState {
    let narrative = Arc::new(OllamaGenerator::new(
        config.ollama_host,
        config.ollama_port,
        config.local_model,
        NARRATIVE_MAX_TOKENS,
    ));
    let condenser = Arc::new(CloudGenerator::new(
        config.cloud_api_key.clone(),
        config.cloud_model.clone(),
        CONDENSE_MAX_TOKENS,
        SAMPLING_TEMPERATURE,
    ));
    let qa = Arc::new(CloudGenerator::new(
        config.cloud_api_key,
        config.cloud_model,
        ANSWER_MAX_TOKENS,
        SAMPLING_TEMPERATURE,
    ));

    AppState {
        session_storage: Arc::new(InMemorySessionStorage::new()),
        tmdb: TmdbClient::new(config.tmdb_api_key),
        omdb: OmdbClient::new(config.omdb_api_key),
        summarizer: Arc::new(Summarizer::new(narrative, condenser)),
        answerer: Arc::new(Answerer::new(qa)),
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/sessions", post(create_session))
        .route(
            "/sessions/{session_id}",
            get(get_session).delete(end_session),
        )
        .route("/sessions/{session_id}/fetch", post(fetch_movie))
        .route("/sessions/{session_id}/question", post(ask_question))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Film Assistant Service",
        "version": "1.0.0",
        "description": "Movie lookups with LLM summaries and question answering",
        "endpoints": {
            "POST /sessions": "Create a new session",
            "GET /sessions/{session_id}": "Current session view",
            "DELETE /sessions/{session_id}": "End a session and discard its state",
            "POST /sessions/{session_id}/fetch": "Fetch movie information by title",
            "POST /sessions/{session_id}/question": "Ask a question about the fetched movie",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn create_session(State(state): State<AppState>) -> ApiResult<CreateSessionResponse> {
    let session = Session::new();
    let session_id = session.id.clone();

    save_session(&state, session).await?;
    info!("session created: {}", session_id);

    Ok(Json(CreateSessionResponse {
        session_id,
        guide: USER_GUIDE.to_string(),
    }))
}

async fn get_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<SessionView> {
    let session = load_session(&state, &session_id).await?;
    Ok(Json(session_view(&session)))
}

/// End a session explicitly (the front end calls this when the tab closes).
/// All session state is discarded; the id is gone afterwards.
async fn end_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
) -> ApiResult<Value> {
    // Load first so an unknown id still reads as a 404.
    load_session(&state, &session_id).await?;

    state.session_storage.delete(&session_id).await.map_err(|e| {
        error!("failed to delete session {}: {}", session_id, e);
        internal_error("Failed to delete session", &e.to_string())
    })?;

    info!("session ended: {}", session_id);
    Ok(Json(json!({ "session_id": session_id, "status": "ended" })))
}

async fn fetch_movie(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<FetchRequest>,
) -> ApiResult<FetchResponse> {
    let mut session = load_session(&state, &session_id).await?;
    let title = sanitize_input(&request.title);
    if title.trim().is_empty() {
        return Err(bad_request_error("Movie title is required"));
    }

    info!("fetching movie information for: {}", title);
    session.begin_fetch();

    // Transport failures are logged but presented like a miss; the user
    // sees the same message either way.
    let tmdb = match state.tmdb.fetch_movie(&title).await {
        Ok(found) => found,
        Err(e) => {
            error!("TMDB fetch failed: {}", e);
            None
        }
    };
    let omdb = match state.omdb.fetch_movie(&title).await {
        Ok(found) => found,
        Err(e) => {
            error!("OMDB fetch failed: {}", e);
            None
        }
    };

    // The TMDB record decides success; OMDB only enriches it.
    let Some(tmdb) = tmdb else {
        save_session(&state, session).await?;
        return Err(not_found_error(MOVIE_NOT_FOUND, &session_id));
    };

    let merged = merge_records(Some(&tmdb), omdb.as_ref());
    let summary = state.summarizer.summarize(&merged.title, &merged.plot).await;

    let movie = MovieCard::from(&tmdb);
    session.complete_fetch(tmdb, omdb, summary);
    let response = FetchResponse {
        session_id: session.id.clone(),
        movie,
        details: session.omdb.clone(),
        summary: session.summary.clone(),
    };
    save_session(&state, session).await?;

    info!("movie information fetched for session {}", session_id);
    Ok(Json(response))
}

async fn ask_question(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<QuestionRequest>,
) -> ApiResult<QuestionResponse> {
    let session = load_session(&state, &session_id).await?;

    if !session.has_movie_data() {
        return Err(bad_request_error(FETCH_FIRST));
    }

    let question = sanitize_input(&request.question);
    info!("answering question for session {}: {}", session_id, question);

    let answer = state
        .answerer
        .answer(&question, session.tmdb.as_ref(), session.omdb.as_ref())
        .await;

    Ok(Json(QuestionResponse { session_id, answer }))
}

fn session_view(session: &Session) -> SessionView {
    SessionView {
        session_id: session.id.clone(),
        guide_displayed: session.guide_displayed,
        guide: session.guide_displayed.then(|| USER_GUIDE.to_string()),
        movie: session.tmdb.as_ref().map(MovieCard::from),
        details: session.omdb.clone(),
        summary: session.summary.clone(),
    }
}

async fn load_session(state: &AppState, id: &str) -> Result<Session, ApiError> {
    match state.session_storage.get(id).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err(not_found_error("Session not found", id)),
        Err(e) => {
            error!("failed to load session {}: {}", id, e);
            Err(internal_error("Failed to load session", &e.to_string()))
        }
    }
}

async fn save_session(state: &AppState, session: Session) -> Result<(), ApiError> {
    state.session_storage.save(session).await.map_err(|e| {
        error!("failed to save session: {}", e);
        internal_error("Failed to save session", &e.to_string())
    })
}
