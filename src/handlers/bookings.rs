// src/handlers/bookings.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    common::extract::{ApiJson, ApiPath, ApiQuery},
    config::AppState,
    models::{
        auth::MessageResponse,
        booking::{
            Booking, BookingCreated, BookingListQuery, BookingWithServices, CreateBookingPayload,
            UpdateBookingStatusPayload,
        },
    },
};

// POST /api/book-service
#[utoipa::path(
    post,
    path = "/api/book-service",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = BookingCreated),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<CreateBookingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state.booking_service.create_booking(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// GET /api/bookings?status=&serviceId=
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "Agendamentos, mais recentes primeiro", body = Vec<BookingWithServices>),
        (status = 400, description = "Filtro inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    ApiQuery(query): ApiQuery<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = app_state.booking_service.list_bookings(query).await?;
    Ok(Json(bookings))
}

// GET /api/booking/{id}
#[utoipa::path(
    get,
    path = "/api/booking/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Agendamento", body = BookingWithServices),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_booking(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_service.get_booking(id).await?;
    Ok(Json(booking))
}

// PATCH /api/booking/{id}
#[utoipa::path(
    patch,
    path = "/api/booking/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    request_body = UpdateBookingStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Booking),
        (status = 400, description = "Status fora do conjunto permitido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_booking_status(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateBookingStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let booking = app_state.booking_service.update_status(id, &payload.status).await?;
    Ok(Json(booking))
}

// DELETE /api/booking/{id}
#[utoipa::path(
    delete,
    path = "/api/booking/{id}",
    tag = "Bookings",
    params(("id" = Uuid, Path, description = "ID do agendamento")),
    responses(
        (status = 200, description = "Removido", body = MessageResponse),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_booking(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.booking_service.delete_booking(id).await?;
    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}
