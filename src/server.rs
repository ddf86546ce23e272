//! HTTP API over [`GameService`].
//!
//! | Method | Path                | Body            |
//! |--------|---------------------|-----------------|
//! | POST   | `/games`            | [`NewGame`]     |
//! | GET    | `/games`            |                 |
//! | GET    | `/games/{id}`       |                 |
//! | DELETE | `/games/{id}`       |                 |
//! | POST   | `/games/{id}/roll`  | [`RollRequest`] |
//! | GET    | `/settings`         |                 |
//! | PUT    | `/settings`         | `GameSettings`  |

use crate::service::{GameService, NewGame, ServiceError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use sugoroku_engine::{EngineError, GameId, GameSettings, GameState, TurnError};
use tracing::{error, info, instrument, warn};

/// Shared handler state.
pub type AppState = Arc<GameService>;

/// Body of a roll request. Without a die the server rolls.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RollRequest {
    /// Die value chosen by the client.
    #[serde(default)]
    pub die: Option<u32>,
}

/// JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub error: String,
}

/// [`ServiceError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::GameNotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::DuplicateGame { .. } => StatusCode::CONFLICT,
            ServiceError::Engine(EngineError::Turn(TurnError::GameOver)) => StatusCode::CONFLICT,
            ServiceError::Engine(EngineError::Turn(TurnError::InvariantViolation { .. })) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Engine(_) => StatusCode::BAD_REQUEST,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            warn!(error = %self.0, status = %status, "Request rejected");
        }
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

/// Builds the API router.
pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/games", post(create_game).get(list_games))
        .route("/games/{id}", get(get_game).delete(end_game))
        .route("/games/{id}/roll", post(roll))
        .route("/settings", get(get_settings).put(put_settings))
        .with_state(service)
}

/// Serves the API until the process is stopped.
///
/// # Errors
///
/// Returns an I/O error if the address cannot be bound or the server fails.
#[instrument(skip(service))]
pub async fn serve(service: AppState, host: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, "Sugoroku API listening");
    axum::serve(listener, router(service)).await
}

#[instrument(skip(service, request), fields(players = request.players.len()))]
async fn create_game(
    State(service): State<AppState>,
    Json(request): Json<NewGame>,
) -> Result<(StatusCode, Json<GameState>), ApiError> {
    let state = service.create_game(request).await?;
    Ok((StatusCode::CREATED, Json(state)))
}

async fn list_games(State(service): State<AppState>) -> Json<Vec<GameId>> {
    Json(service.list_games())
}

#[instrument(skip(service))]
async fn get_game(State(service): State<AppState>, Path(id): Path<GameId>) -> Result<Json<GameState>, ApiError> {
    Ok(Json(service.get_game(&id)?))
}

#[instrument(skip(service))]
async fn end_game(State(service): State<AppState>, Path(id): Path<GameId>) -> Result<StatusCode, ApiError> {
    service.end_game(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(service))]
async fn roll(
    State(service): State<AppState>,
    Path(id): Path<GameId>,
    body: Option<Json<RollRequest>>,
) -> Result<Json<GameState>, ApiError> {
    let die = body.and_then(|Json(request)| request.die);
    Ok(Json(service.roll(&id, die)?))
}

async fn get_settings(State(service): State<AppState>) -> Result<Json<GameSettings>, ApiError> {
    Ok(Json(service.settings()?))
}

#[instrument(skip(service, settings))]
async fn put_settings(
    State(service): State<AppState>,
    Json(settings): Json<GameSettings>,
) -> Result<Json<GameSettings>, ApiError> {
    Ok(Json(service.update_settings(settings)?))
}
