use axum::{
    debug_handler,
    extract::{Path, State},
    Json,
};

use crate::{
    extract::Params,
    store::{row_id, Appointment, AppointmentStore, StoreError},
    AppError, AppResult, Done,
};

#[debug_handler]
pub(crate) async fn list_appointments(
    State(store): State<AppointmentStore>,
    params: Params,
) -> AppResult<Json<Vec<Appointment>>> {
    let appointments = store
        .list(params.first("search"))
        .await
        .map_err(|err| AppError::from(err).or_fault("Failed to fetch appointments."))?;

    Ok(Json(appointments))
}

#[debug_handler]
pub(crate) async fn delete_appointment(
    State(store): State<AppointmentStore>,
    Path(id): Path<String>,
) -> AppResult<Json<Done>> {
    let id = row_id(&id).ok_or(StoreError::NotFound("appointment"))?;

    store
        .delete_by_id(id)
        .await
        .map_err(|err| AppError::from(err).or_fault("Failed to delete the appointment."))?;

    tracing::info!(id, "appointment deleted");

    Ok(Json(Done {
        message: "Appointment deleted successfully.",
    }))
}
