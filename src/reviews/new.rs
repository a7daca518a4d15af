use axum::{debug_handler, extract::State, http::StatusCode, Json};

use crate::{
    extract::Payload,
    store::{NewReview, ReviewStore},
    AppError, AppResult, Created,
};

#[debug_handler]
pub(crate) async fn new_review(
    State(store): State<ReviewStore>,
    Payload(new): Payload<NewReview>,
) -> AppResult<(StatusCode, Json<Created>)> {
    let id = store
        .create(new)
        .await
        .map_err(|err| AppError::from(err).or_fault("Failed to add the review."))?;

    tracing::info!(id, "review added");

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Review added successfully!",
            id,
        }),
    ))
}
