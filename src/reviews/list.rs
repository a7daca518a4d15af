use axum::{debug_handler, extract::State, Json};

use crate::{
    store::{Review, ReviewStore},
    AppError, AppResult,
};

/// Shared by the public page and the admin panel.
#[debug_handler]
pub(crate) async fn list_reviews(State(store): State<ReviewStore>) -> AppResult<Json<Vec<Review>>> {
    let reviews = store
        .list()
        .await
        .map_err(|err| AppError::from(err).or_fault("Failed to fetch reviews."))?;

    Ok(Json(reviews))
}
