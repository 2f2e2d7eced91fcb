use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::dedup::CompilationMatch,
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/search", post(search))
}

#[derive(Debug, Clone, Deserialize)]
struct SearchRequest {
    #[serde(default)]
    query: String,
}

#[instrument(name = "POST /api/search", skip(app_state, request))]
async fn search(
    State(app_state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<Vec<CompilationMatch>>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::bad_request("query is required"));
    }

    let matches = app_state.dedup.find_duplicates(&request.query).await?;

    Ok(Json(matches))
}
