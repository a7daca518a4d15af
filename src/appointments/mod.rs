mod admin;
mod new;

use axum::{routing::{delete, get, post}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/appointments", post(new::new_appointment))
        .route("/api/admin/appointments", get(admin::list_appointments))
        .route("/api/admin/appointments/{id}", delete(admin::delete_appointment))
}
