use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};

use crate::{
    store::{row_id, ReviewStore, StoreError},
    AppError, AppResult, Done,
};

#[debug_handler]
pub(crate) async fn delete_review(
    State(store): State<ReviewStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Done>> {
    let id = row_id(&id).ok_or(StoreError::NotFound("review"))?;

    store
        .delete_by_id(id)
        .await
        .map_err(|err| AppError::from(err).or_fault("Failed to delete the review."))?;

    tracing::info!(id, "review deleted");

    Ok(Json(Done {
        message: "Review deleted successfully.",
    }))
}
