//! Tests for `AppError` -> HTTP response mapping.
//!
//! No server and no database: each variant is turned into a response
//! through `IntoResponse` and the status and JSON body are checked.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use fixease::common::error::AppError;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn invalid_field_returns_400_with_field_details() {
    let err = AppError::invalid_field("amount", "Amount exceeds the remaining balance of 200");

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["details"]["amount"][0], "Amount exceeds the remaining balance of 200");
}

#[tokio::test]
async fn malformed_request_uses_the_validation_shape() {
    let err = AppError::MalformedRequest {
        field: "id".into(),
        message: "Invalid id".into(),
    };

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Validation failed");
    assert_eq!(json["details"]["id"][0], "Invalid id");
}

#[tokio::test]
async fn validator_errors_are_keyed_by_the_client_field_name() {
    let mut errors = validator::ValidationErrors::new();
    errors.add("phone_number", validator::ValidationError::new("phone"));

    let (status, json) = error_to_response(AppError::ValidationError(errors)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["details"]["phoneNumber"].is_array(), "{json}");
    assert!(json["details"].get("phone_number").is_none(), "{json}");
}

#[tokio::test]
async fn duplicate_key_names_the_field() {
    let (status, json) = error_to_response(AppError::DuplicateKey("aadhaar".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "aadhaar must be unique");
    assert_eq!(json["field"], "aadhaar");
}

#[tokio::test]
async fn not_found_returns_404() {
    let (status, json) = error_to_response(AppError::NotFound("Employee")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Employee not found");
}

#[tokio::test]
async fn auth_errors_map_to_401_403_and_409() {
    let (status, _) = error_to_response(AppError::InvalidCredentials).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = error_to_response(AppError::InvalidToken).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = error_to_response(AppError::Forbidden).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, json) = error_to_response(AppError::EmailAlreadyExists).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "User already exists");
}

#[tokio::test]
async fn signature_mismatch_returns_400() {
    let (status, json) = error_to_response(AppError::SignatureMismatch).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid signature");
}

#[tokio::test]
async fn gateway_failure_returns_502_without_upstream_detail() {
    let err = AppError::PaymentGateway("connection refused".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "Payment gateway unavailable");
}

#[tokio::test]
async fn internal_errors_hide_details_by_default() {
    let err = AppError::InternalServerError(anyhow::anyhow!("pool exhausted"));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Something went wrong!");
    assert!(json.get("details").is_none());
}
