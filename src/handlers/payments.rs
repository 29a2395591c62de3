// src/handlers/payments.rs

use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    common::extract::ApiJson,
    config::AppState,
    models::payment::{
        CreateOrderPayload, CreateOrderResponse, PaymentKeyResponse, VerifyPaymentPayload,
        VerifyPaymentResponse,
    },
};

// POST /api/v1/create-order
#[utoipa::path(
    post,
    path = "/api/v1/create-order",
    tag = "Payments",
    request_body = CreateOrderPayload,
    responses(
        (status = 200, description = "Ordem criada no gateway", body = CreateOrderResponse),
        (status = 400, description = "Valor inválido"),
        (status = 502, description = "Gateway indisponível")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state.payment_service.create_order(payload.amount).await?;
    Ok(Json(CreateOrderResponse { success: true, order }))
}

// GET /api/v1/getKey
#[utoipa::path(
    get,
    path = "/api/v1/getKey",
    tag = "Payments",
    responses((status = 200, description = "Chave pública do gateway", body = PaymentKeyResponse))
)]
pub async fn get_key(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(PaymentKeyResponse {
        success: true,
        key: app_state.payment_service.key_id().to_string(),
    })
}

// POST /api/v1/verify
#[utoipa::path(
    post,
    path = "/api/v1/verify",
    tag = "Payments",
    request_body = VerifyPaymentPayload,
    responses(
        (status = 200, description = "Assinatura confere", body = VerifyPaymentResponse),
        (status = 400, description = "Assinatura inválida")
    )
)]
pub async fn verify_payment(
    State(app_state): State<AppState>,
    ApiJson(payload): ApiJson<VerifyPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state.payment_service.verify_payment(&payload)?;
    Ok(Json(response))
}
