mod admin;
mod list;
mod new;

use axum::{routing::{delete, get}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/reviews", get(list::list_reviews).post(new::new_review))
        .route("/api/admin/reviews", get(list::list_reviews))
        .route("/api/admin/reviews/{id}", delete(admin::delete_review))
}
