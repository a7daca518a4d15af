pub mod appointments;
pub mod appresult;
pub mod config;
pub mod extract;
pub mod res;
pub mod reviews;
pub mod store;

use axum::{extract::FromRef, http::{HeaderValue, Method}, routing::get, Router};
use serde::Serialize;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

pub use appresult::{AppError, AppResult};
pub use config::Config;

use store::{AppointmentStore, ReviewStore};

/// The two stores, handed to handlers through `State<AppointmentStore>` or
/// `State<ReviewStore>`. A request only ever sees one of them.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub appointments: AppointmentStore,
    pub reviews: ReviewStore,
}

/// Body of a successful create.
#[derive(Debug, Serialize)]
pub struct Created {
    pub message: &'static str,
    pub id: i64,
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct Done {
    pub message: &'static str,
}

pub fn app(state: AppState, config: &Config) -> Router {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/admin", get(res::admin_page))
        .merge(appointments::router())
        .merge(reviews::router())
        .fallback_service(ServeDir::new(&config.public_dir))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
