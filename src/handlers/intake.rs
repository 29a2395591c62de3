// src/handlers/intake.rs

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
    common::extract::{ApiJson, ApiPath},
    config::AppState,
    models::intake::{
        CreateTestimonialPayload, SubmitQueryPayload, Testimonial, UpdateQueryStatusPayload,
        UserQueryView,
    },
};

// =============================================================================
//  ÁREA 1: DEPOIMENTOS
// =============================================================================

// POST /api/testimonials
#[utoipa::path(
    post,
    path = "/api/testimonials",
    tag = "Testimonials",
    request_body = CreateTestimonialPayload,
    responses(
        (status = 201, description = "Depoimento publicado", body = Testimonial),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_testimonial(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<CreateTestimonialPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let testimonial = app_state.intake_service.submit_testimonial(payload).await?;
    Ok((StatusCode::CREATED, Json(testimonial)))
}

// GET /api/testimonials
#[utoipa::path(
    get,
    path = "/api/testimonials",
    tag = "Testimonials",
    responses((status = 200, description = "Depoimentos, mais recentes primeiro", body = Vec<Testimonial>))
)]
pub async fn list_testimonials(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let testimonials = app_state.intake_service.list_testimonials().await?;
    Ok(Json(testimonials))
}

// =============================================================================
//  ÁREA 2: PEDIDOS DE RETORNO
// =============================================================================

// POST /api/user-queries/submit-query
#[utoipa::path(
    post,
    path = "/api/user-queries/submit-query",
    tag = "User Queries",
    request_body = SubmitQueryPayload,
    responses(
        (status = 201, description = "Pedido registrado", body = UserQueryView),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn submit_query(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<SubmitQueryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let query = app_state.intake_service.submit_query(payload).await?;
    Ok((StatusCode::CREATED, Json(query)))
}

// GET /api/user-queries/get-all-queries
#[utoipa::path(
    get,
    path = "/api/user-queries/get-all-queries",
    tag = "User Queries",
    responses((status = 200, description = "Pedidos, mais recentes primeiro", body = Vec<UserQueryView>)),
    security(("api_jwt" = []))
)]
pub async fn list_queries(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let queries = app_state.intake_service.list_queries().await?;
    Ok(Json(queries))
}

// PATCH /api/user-queries/update-query/{id}/status
#[utoipa::path(
    patch,
    path = "/api/user-queries/update-query/{id}/status",
    tag = "User Queries",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    request_body = UpdateQueryStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = UserQueryView),
        (status = 400, description = "Status inválido"),
        (status = 404, description = "Não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_query_status(
    State(app_state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateQueryStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let query = app_state
        .intake_service
        .update_query_status(id, &payload.status)
        .await?;
    Ok(Json(query))
}
