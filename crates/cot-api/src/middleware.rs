//! HTTP layers applied to every route.
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tracing::Level;

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

pub fn trace() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
