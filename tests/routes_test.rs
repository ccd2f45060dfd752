// ABOUTME: Integration tests for the HTTP route layer
// ABOUTME: Exercises handlers end to end through the router with oneshot requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitClub Systems
#![allow(missing_docs, clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{create_admin, create_member, create_room, create_trainer, setup_db};
use fitclub_server::config::ServerConfig;
use fitclub_server::database::Database;
use fitclub_server::server::{HttpServer, ServerResources};

async fn test_router(database: Database) -> Router {
    let resources = Arc::new(ServerResources::new(database, ServerConfig::default()));
    HttpServer::router(&resources)
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    // Extractor rejections (e.g. an unknown enum discriminator) come back
    // with a plain-text body rather than the JSON error envelope
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_connected_database() {
    let db = setup_db().await;
    let router = test_router(db.database.clone()).await;

    let (status, body) = send(router, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}

#[tokio::test]
async fn member_registration_round_trip() {
    let db = setup_db().await;
    let router = test_router(db.database.clone()).await;

    let (status, body) = send(
        router.clone(),
        post(
            "/members/register",
            json!({
                "first_name": "John",
                "last_name": "Doe",
                "email": "john@example.com",
                "password": "secret",
                "phone": "555-0101",
                "date_of_birth": "1990-05-15"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let member_id = body["member_id"].as_i64().unwrap();

    // Duplicate email is a 409
    let (status, body) = send(
        router.clone(),
        post(
            "/members/register",
            json!({
                "first_name": "John",
                "last_name": "Clone",
                "email": "john@example.com",
                "password": "secret",
                "date_of_birth": "1990-05-15"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "RESOURCE_ALREADY_EXISTS");

    // Profile update sticks
    let (status, _) = send(
        router,
        put(
            &format!("/members/{member_id}"),
            json!({ "phone": "555-9999" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let user = db.database.users().get_user(member_id).await.unwrap().unwrap();
    assert_eq!(user.phone.as_deref(), Some("555-9999"));
}

#[tokio::test]
async fn availability_rejects_unknown_day() {
    let db = setup_db().await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;
    let router = test_router(db.database.clone()).await;

    let (status, body) = send(
        router,
        post(
            &format!("/trainers/{trainer_id}/availability"),
            json!({
                "day_of_week": "Funday",
                "start_time": "08:00:00",
                "end_time": "12:00:00"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn availability_conflict_maps_to_409() {
    let db = setup_db().await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;
    let router = test_router(db.database.clone()).await;

    let window = json!({
        "day_of_week": "Monday",
        "start_time": "08:00:00",
        "end_time": "12:00:00"
    });
    let uri = format!("/trainers/{trainer_id}/availability");

    let (status, _) = send(router.clone(), post(&uri, window.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(router, post(&uri, window)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "SCHEDULE_CONFLICT");
}

#[tokio::test]
async fn full_class_returns_capacity_exceeded_over_http() {
    let db = setup_db().await;
    let admin_id = create_admin(&db.database, "admin@example.com").await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;
    create_room(&db.database, "Studio A", "101").await;
    let router = test_router(db.database.clone()).await;

    let (status, body) = send(
        router.clone(),
        post(
            &format!("/admin/{admin_id}/classes"),
            json!({
                "class_name": "Tiny Class",
                "day_of_week": "Monday",
                "start_time": "09:00:00",
                "end_time": "10:00:00",
                "capacity": 1,
                "room_id": 1,
                "trainer_id": trainer_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let class_id = body["class_id"].as_i64().unwrap();

    let first = create_member(&db.database, "first@example.com").await;
    let second = create_member(&db.database, "second@example.com").await;

    let (status, _) = send(
        router.clone(),
        post(
            &format!("/members/{first}/class-registrations"),
            json!({ "class_id": class_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        router,
        post(
            &format!("/members/{second}/class-registrations"),
            json!({ "class_id": class_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CAPACITY_EXCEEDED");
}

#[tokio::test]
async fn room_booking_accepts_tagged_booking_union() {
    let db = setup_db().await;
    let admin_id = create_admin(&db.database, "admin@example.com").await;
    let member_id = create_member(&db.database, "member@example.com").await;
    let trainer_id = create_trainer(&db.database, "trainer@example.com").await;
    let room_a = create_room(&db.database, "Studio A", "101").await;
    let room_b = create_room(&db.database, "Studio B", "102").await;
    let router = test_router(db.database.clone()).await;

    let uri = format!("/trainers/{trainer_id}/availability");
    let (status, _) = send(
        router.clone(),
        post(
            &uri,
            json!({
                "day_of_week": "Monday",
                "start_time": "08:00:00",
                "end_time": "17:00:00"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        router.clone(),
        post(
            &format!("/members/{member_id}/pt-sessions"),
            json!({
                "trainer_id": trainer_id,
                "room_id": room_a,
                "session_date": "2025-06-02",
                "start_time": "10:00:00",
                "end_time": "11:00:00"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = body["session_id"].as_i64().unwrap();

    let (status, body) = send(
        router.clone(),
        put(
            &format!("/admin/{admin_id}/room-booking"),
            json!({
                "booking_type": "pt_session",
                "booking_id": session_id,
                "new_room_id": room_b
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["new_room_name"], "Studio B");

    // An unknown discriminator never reaches the handler
    let (status, body) = send(
        router,
        put(
            &format!("/admin/{admin_id}/room-booking"),
            json!({
                "booking_type": "sauna_party",
                "booking_id": session_id,
                "new_room_id": room_b
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    // The rejection is axum's, not ours, so no error envelope is present
    assert_eq!(body, Value::Null);
}
