use axum::{
    http::{header, HeaderMap, Method, Uri},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod state;
pub mod suppliers;

pub use error::AppError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::USER_AGENT]);

    Router::new()
        .route("/", get(index))
        .merge(suppliers::routes())
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /
/// Service descriptor
async fn index(headers: HeaderMap) -> Json<Value> {
    tracing::info!("Request for Root URL");
    let paths = match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}/suppliers", host),
        None => "/suppliers".to_string(),
    };

    Json(json!({
        "name": "Supplier REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": paths,
    }))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("The requested URL {} was not found on the server.", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    tracing::warn!("Method {} not allowed on {}", method, uri.path());
    AppError::MethodNotAllowed("The method is not allowed for the requested URL.".to_string())
}
