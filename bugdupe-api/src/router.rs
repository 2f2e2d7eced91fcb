use std::path::Path;
use std::sync::Arc;

use axum::{http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::{
    app_state::AppState,
    config::Settings,
    domain::dedup::{AzureSearchIndex, DedupService, OpenAiEmbedder, OpenAiJudge},
    routes,
};

/// Build the application router from settings.
///
/// `/api/search` runs the duplicate-detection pipeline; every other path
/// serves the prebuilt browser bundle.
pub fn create(settings: &Settings) -> Router<()> {
    let embedder = OpenAiEmbedder::new(
        &settings.openai.api_key,
        &settings.openai.embedding_model,
    );
    let index = AzureSearchIndex::new(
        &settings.search.service_name,
        &settings.search.index_name,
        &settings.search.api_key,
    );
    let judge = OpenAiJudge::new(&settings.openai.api_key, &settings.openai.chat_model);

    let service = DedupService::new(Arc::new(embedder), Arc::new(index), Arc::new(judge));

    let static_dir = Path::new(&settings.application.static_dir);
    let static_files = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .nest("/api", routes::search::router())
        .fallback_service(static_files)
        .with_state(AppState::new(service))
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
