//! HTTP-level tests for the paths decided before the database is touched.

mod common;

use axum::http::{header, Method, StatusCode};
use common::{body_json, build_test_app, get, get_auth, post_json, send, token_for, GATEWAY_KEY, GATEWAY_SECRET};
use fixease::models::auth::Role;
use fixease::services::payment_service::compute_signature;
use serde_json::json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Fallback e headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_api_path_returns_json_404() {
    let response = get(build_test_app(), "/api/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "API endpoint not found");
}

#[tokio::test]
async fn security_headers_are_set_on_every_response() {
    let response = get(build_test_app(), "/api/does-not-exist").await;
    let headers = response.headers();

    assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    assert_eq!(headers[header::X_XSS_PROTECTION], "1; mode=block");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = get(build_test_app(), "/api-docs/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/book-service"].is_object());
    assert!(body["paths"]["/api/employees/reset"].is_object());
}

// ---------------------------------------------------------------------------
// Validação
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_booking_reports_every_field() {
    let payload = json!({
        "name": "R",
        "email": "not-an-email",
        "phoneNumber": "12345",
        "address": "short",
        "pincode": "012345",
        "serviceIds": []
    });

    let response = post_json(build_test_app(), "/api/book-service", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    let details = body["details"].as_object().expect("details should be an object");
    for field in ["name", "email", "phoneNumber", "address", "pincode", "serviceIds"] {
        assert!(details.contains_key(field), "missing detail for {field}: {body}");
    }
    assert!(!details.contains_key("phone_number"), "{body}");
    assert!(!details.contains_key("service_ids"), "{body}");
}

#[tokio::test]
async fn booking_with_malformed_service_id_is_rejected() {
    let payload = json!({
        "name": "Ravi Kumar",
        "email": "ravi@example.com",
        "phoneNumber": "9876543210",
        "address": "12, MG Road, Indiranagar",
        "pincode": "560038",
        "serviceIds": ["abc"]
    });

    let response = post_json(build_test_app(), "/api/book-service", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["serviceIds"].is_array(), "{body}");
}

#[tokio::test]
async fn testimonial_rating_out_of_range_is_rejected() {
    let payload = json!({ "rating": 6, "name": "A", "city": "B", "message": "Great" });

    let response = post_json(build_test_app(), "/api/testimonials", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"]["rating"].is_array());
}

#[tokio::test]
async fn booking_without_phone_number_is_a_validation_error() {
    let payload = json!({
        "name": "Ravi Kumar",
        "email": "ravi@example.com",
        "address": "12, MG Road, Indiranagar",
        "pincode": "560038",
        "serviceIds": [Uuid::new_v4()]
    });

    let response = post_json(build_test_app(), "/api/book-service", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"]["phoneNumber"][0], "This field is required", "{body}");
}

#[tokio::test]
async fn testimonial_rating_sent_as_text_is_a_validation_error() {
    let payload = json!({ "rating": "5", "name": "A", "city": "B", "message": "Great" });

    let response = post_json(build_test_app(), "/api/testimonials", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]["rating"].is_array(), "{body}");
}

#[tokio::test]
async fn body_that_is_not_json_is_a_validation_error() {
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/user-queries/submit-query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(build_test_app(), request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]["body"].is_array(), "{body}");
}

#[tokio::test]
async fn malformed_id_in_path_is_a_validation_error() {
    let token = token_for(Role::Admin);

    let response = get_auth(build_test_app(), "/api/booking/not-a-uuid", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"]["id"][0], "Invalid id");
}

#[tokio::test]
async fn malformed_service_filter_is_a_validation_error() {
    let token = token_for(Role::Admin);

    let response = get_auth(build_test_app(), "/api/bookings?serviceId=abc", &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"].is_object(), "{body}");
}

#[tokio::test]
async fn blank_query_submission_is_rejected() {
    let payload = json!({ "name": " ", "phoneNumber": "9876543210", "query": "" });

    let response = post_json(build_test_app(), "/api/user-queries/submit-query", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn signup_with_mismatched_passwords_is_rejected() {
    let payload = json!({
        "name": "Asha",
        "email": "asha@example.com",
        "phone": "9876543210",
        "password": "secret1",
        "confirmPassword": "secret2"
    });

    let response = post_json(build_test_app(), "/api/users/signup", payload).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["details"]["confirmPassword"][0], "Passwords do not match", "{body}");
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

#[tokio::test]
async fn employee_routes_require_a_token() {
    let response = get(build_test_app(), "/api/employees").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized - invalid or missing token");
}

#[tokio::test]
async fn customer_token_cannot_reach_admin_routes() {
    let token = token_for(Role::User);

    for uri in ["/api/employees", "/api/bookings", "/api/user-queries/get-all-queries", "/api/users/get-all-users"] {
        let response = get_auth(build_test_app(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
    }
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let mut token = token_for(Role::Admin);
    token.push('x');

    let response = get_auth(build_test_app(), "/api/employees", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn service_writes_require_a_token() {
    let response = send(build_test_app(), Method::DELETE, &format!("/api/services/{}", Uuid::new_v4()), None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_requires_a_token_and_accepts_a_customer() {
    let response = send(build_test_app(), Method::POST, "/api/users/logout", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = token_for(Role::User);
    let response = send(build_test_app(), Method::POST, "/api/users/logout", None, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Logged out successfully");
}

// ---------------------------------------------------------------------------
// Regras decididas antes do banco (com token de admin)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unlisted_booking_status_is_a_validation_error() {
    let token = token_for(Role::Admin);
    let uri = format!("/api/booking/{}", Uuid::new_v4());

    let response = send(build_test_app(), Method::PATCH, &uri, Some(json!({ "status": "confirmed" })), Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let message = body["details"]["status"][0].as_str().unwrap_or_default();
    assert!(message.contains("pending, completed, cancelled"), "{body}");
}

#[tokio::test]
async fn unknown_status_filter_is_rejected() {
    let token = token_for(Role::Admin);

    let response = get_auth(build_test_app(), "/api/bookings?status=confirmed", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn monthly_reset_requires_a_valid_month_year() {
    let token = token_for(Role::Admin);

    for bad in ["13-2026", "2026-10", "october", ""] {
        let response = send(
            build_test_app(),
            Method::PUT,
            "/api/employees/reset",
            Some(json!({ "currentMonthYear": bad })),
            Some(&token),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{bad:?}");
    }
}

#[tokio::test]
async fn payment_above_zero_is_required() {
    let token = token_for(Role::Admin);
    let uri = format!("/api/employees/{}/payments", Uuid::new_v4());

    let response = send(build_test_app(), Method::POST, &uri, Some(json!({ "amount": 0 })), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_query_status_is_rejected() {
    let token = token_for(Role::Admin);
    let uri = format!("/api/user-queries/update-query/{}/status", Uuid::new_v4());

    let response = send(build_test_app(), Method::PATCH, &uri, Some(json!({ "status": "closed" })), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Ponte de pagamento
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_key_returns_public_key() {
    let response = get(build_test_app(), "/api/v1/getKey").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["key"], GATEWAY_KEY);
}

#[tokio::test]
async fn verify_accepts_matching_signature() {
    let signature = compute_signature(GATEWAY_SECRET, "order_abc", "pay_xyz").unwrap();
    let payload = json!({
        "razorpay_order_id": "order_abc",
        "razorpay_payment_id": "pay_xyz",
        "razorpay_signature": signature,
        "bookingId": "booking-1"
    });

    let response = post_json(build_test_app(), "/api/v1/verify", payload).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["bookingId"], "booking-1");
}

#[tokio::test]
async fn verify_rejects_mismatched_or_uppercase_signature() {
    let signature = compute_signature(GATEWAY_SECRET, "order_abc", "pay_xyz").unwrap();

    for candidate in [signature.to_uppercase(), compute_signature("wrong", "order_abc", "pay_xyz").unwrap()] {
        if candidate == signature {
            continue;
        }
        let payload = json!({
            "razorpay_order_id": "order_abc",
            "razorpay_payment_id": "pay_xyz",
            "razorpay_signature": candidate
        });

        let response = post_json(build_test_app(), "/api/v1/verify", payload).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Invalid signature");
    }
}

#[tokio::test]
async fn create_order_rejects_non_positive_amount() {
    let response = post_json(build_test_app(), "/api/v1/create-order", json!({ "amount": 0 })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_order_surfaces_gateway_failure_as_502() {
    // O gateway de teste aponta para uma porta fechada
    let response = post_json(build_test_app(), "/api/v1/create-order", json!({ "amount": 499 })).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"], "Payment gateway unavailable");
}
