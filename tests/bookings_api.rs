//! Booking workflow against a migrated Postgres (`#[sqlx::test]`).

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, build_test_app_with_pool, get_auth, post_json, send, token_for};
use fixease::db::ServiceRepository;
use fixease::models::auth::Role;
use fixease::models::catalog::{Service, ServiceForm, ServiceStatus};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_test_service(pool: &PgPool, title: &str, price: i64) -> Service {
    let form = ServiceForm {
        title: title.to_string(),
        description: format!("{title} done by verified professionals"),
        price: Decimal::new(price, 0),
        category: "cleaning".to_string(),
        duration: Some("2 hours".to_string()),
        status: ServiceStatus::Active,
        image: None,
    };
    ServiceRepository::new(pool.clone())
        .create_service(&form)
        .await
        .expect("service creation should succeed")
}

fn booking_payload(service_ids: &[Uuid]) -> serde_json::Value {
    json!({
        "name": "Ravi Kumar",
        "email": "Ravi@Example.com",
        "phoneNumber": "9876543210",
        "address": "12, MG Road, Indiranagar",
        "pincode": "560038",
        "additionalMessage": "Ring the bell twice",
        "serviceIds": service_ids
    })
}

/// Cria um agendamento pela API e devolve o id.
async fn book(pool: &PgPool, service_ids: &[Uuid]) -> String {
    let app = build_test_app_with_pool(pool.clone());
    let response = post_json(app, "/api/book-service", booking_payload(service_ids)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["bookingId"].as_str().expect("bookingId should be a string").to_string()
}

// ---------------------------------------------------------------------------
// Criação e leitura
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn created_booking_is_pending_and_resolvable(pool: PgPool) {
    let service = create_test_service(&pool, "Deep Cleaning", 1499).await;
    let app = build_test_app_with_pool(pool.clone());

    let response = post_json(app, "/api/book-service", booking_payload(&[service.id])).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["status"], "pending");
    assert!(created["createdAt"].is_string());
    let id = created["bookingId"].as_str().unwrap();

    let token = token_for(Role::Admin);
    let response = get_auth(build_test_app_with_pool(pool), &format!("/api/booking/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let booking = body_json(response).await;
    assert_eq!(booking["id"], id);
    assert_eq!(booking["status"], "pending");
    assert_eq!(booking["email"], "ravi@example.com");
    assert!(booking["statusChangedAt"].is_null());
    assert_eq!(booking["services"][0]["title"], "Deep Cleaning");
    assert_eq!(booking["services"][0]["duration"], "2 hours");
}

#[sqlx::test(migrations = "./migrations")]
async fn list_joins_services_and_applies_filters(pool: PgPool) {
    let cleaning = create_test_service(&pool, "Deep Cleaning", 1499).await;
    let plumbing = create_test_service(&pool, "Plumbing", 499).await;

    let first = book(&pool, &[cleaning.id]).await;
    let second = book(&pool, &[cleaning.id, plumbing.id]).await;

    let token = token_for(Role::Admin);

    let response = get_auth(build_test_app_with_pool(pool.clone()), "/api/bookings", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let all = body_json(response).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 2);
    // Mais recente primeiro
    assert_eq!(all[0]["id"], second.as_str());
    assert_eq!(all[0]["services"].as_array().unwrap().len(), 2);
    assert_eq!(all[1]["id"], first.as_str());

    let uri = format!("/api/bookings?serviceId={}", plumbing.id);
    let response = get_auth(build_test_app_with_pool(pool.clone()), &uri, &token).await;
    let by_service = body_json(response).await;
    assert_eq!(by_service.as_array().unwrap().len(), 1);
    assert_eq!(by_service[0]["id"], second.as_str());

    let response = get_auth(build_test_app_with_pool(pool), "/api/bookings?status=cancelled", &token).await;
    let cancelled = body_json(response).await;
    assert!(cancelled.as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn booking_survives_deletion_of_its_service(pool: PgPool) {
    let service = create_test_service(&pool, "Deep Cleaning", 1499).await;
    let id = book(&pool, &[service.id]).await;

    ServiceRepository::new(pool.clone())
        .delete_service(service.id)
        .await
        .expect("delete should succeed");

    let token = token_for(Role::Admin);
    let response = get_auth(build_test_app_with_pool(pool), &format!("/api/booking/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let booking = body_json(response).await;
    assert_eq!(booking["serviceIds"][0], service.id.to_string());
    assert!(booking["services"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Status e remoção
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn status_update_stamps_status_changed_at(pool: PgPool) {
    let service = create_test_service(&pool, "Deep Cleaning", 1499).await;
    let id = book(&pool, &[service.id]).await;
    let token = token_for(Role::Admin);
    let uri = format!("/api/booking/{id}");

    let response = send(
        build_test_app_with_pool(pool.clone()),
        Method::PATCH,
        &uri,
        Some(json!({ "status": "cancelled" })),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cancelled = body_json(response).await;
    assert_eq!(cancelled["status"], "cancelled");
    assert!(cancelled["statusChangedAt"].is_string());

    // Sem máquina de estados: um cancelado pode voltar a pendente
    let response = send(
        build_test_app_with_pool(pool),
        Method::PATCH,
        &uri,
        Some(json!({ "status": "pending" })),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "pending");
}

#[sqlx::test(migrations = "./migrations")]
async fn status_update_for_unknown_booking_is_404(pool: PgPool) {
    let token = token_for(Role::Admin);
    let uri = format!("/api/booking/{}", Uuid::new_v4());

    let response = send(
        build_test_app_with_pool(pool),
        Method::PATCH,
        &uri,
        Some(json!({ "status": "completed" })),
        Some(&token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Booking not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_removes_the_booking_once(pool: PgPool) {
    let service = create_test_service(&pool, "Deep Cleaning", 1499).await;
    let id = book(&pool, &[service.id]).await;
    let token = token_for(Role::Admin);
    let uri = format!("/api/booking/{id}");

    let response = send(build_test_app_with_pool(pool.clone()), Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(build_test_app_with_pool(pool), Method::DELETE, &uri, None, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
