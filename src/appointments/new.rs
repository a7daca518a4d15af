use axum::{debug_handler, extract::State, http::StatusCode, Json};

use crate::{
    extract::Payload,
    store::{AppointmentStore, NewAppointment},
    AppError, AppResult, Created,
};

#[debug_handler]
pub(crate) async fn new_appointment(
    State(store): State<AppointmentStore>,
    Payload(new): Payload<NewAppointment>,
) -> AppResult<(StatusCode, Json<Created>)> {
    let id = store
        .create(new)
        .await
        .map_err(|err| AppError::from(err).or_fault("Failed to book the appointment."))?;

    tracing::info!(id, "appointment booked");

    Ok((
        StatusCode::CREATED,
        Json(Created {
            message: "Appointment booked successfully!",
            id,
        }),
    ))
}
