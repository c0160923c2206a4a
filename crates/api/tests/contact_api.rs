//! HTTP-level integration tests for the `/contacts` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, build_test_app, contact_body, create_contact, delete, get, post_json, put_json,
    send_raw,
};
use serde_json::json;
use sqlx::PgPool;

const WRITABLE: [&str; 6] = [
    "full_name",
    "phone",
    "email",
    "business_name",
    "service",
    "project_details",
];

async fn contact_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM contacts")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_contact_returns_201(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/contacts", contact_body(1)).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["full_name"], "Contact 1");
    assert_eq!(json["service"], "web_development");
    assert!(json["created_at"].is_string());
    assert!(json["updated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_without_project_details(pool: PgPool) {
    let mut body = contact_body(1);
    body.as_object_mut().unwrap().remove("project_details");

    let response = post_json(build_test_app(pool), "/contacts", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(body_json(response).await["project_details"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_is_served_under_api_prefix(pool: PgPool) {
    let response = post_json(build_test_app(pool), "/api/contacts", contact_body(1)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_phone_returns_409_and_persists_nothing(pool: PgPool) {
    create_contact(&pool, 1).await;

    let mut body = contact_body(2);
    body["phone"] = contact_body(1)["phone"].clone();
    let response = post_json(build_test_app(pool.clone()), "/contacts", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Email or phone already exists");
    assert_eq!(contact_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_returns_409_and_persists_nothing(pool: PgPool) {
    create_contact(&pool, 1).await;

    let mut body = contact_body(2);
    body["email"] = contact_body(1)["email"].clone();
    let response = post_json(build_test_app(pool.clone()), "/contacts", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(contact_count(&pool).await, 1);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_short_full_name_names_the_field(pool: PgPool) {
    let mut body = contact_body(1);
    body["full_name"] = json!("A");

    let response = post_json(build_test_app(pool.clone()), "/contacts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(
        json["errors"]["full_name"],
        json!(["Length must be between 2 and 255."])
    );
    assert_eq!(contact_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_fields_are_all_reported(pool: PgPool) {
    let response = post_json(
        build_test_app(pool),
        "/contacts",
        json!({"full_name": "Only A Name"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await["errors"].clone();
    for field in ["phone", "email", "business_name", "service"] {
        assert_eq!(
            errors[field],
            json!(["Missing data for required field."]),
            "field {field}"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_email_and_service_are_rejected(pool: PgPool) {
    let mut body = contact_body(1);
    body["email"] = json!("not-an-email");
    body["service"] = json!("plumbing");

    let response = post_json(build_test_app(pool), "/contacts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await["errors"].clone();
    assert_eq!(errors["email"], json!(["Not a valid email address."]));
    assert!(errors["service"][0]
        .as_str()
        .unwrap()
        .starts_with("Must be one of:"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_email_without_top_level_domain_is_rejected(pool: PgPool) {
    for (n, email) in [(1, "ada@localdomain"), (2, "ada@example.c")] {
        let mut body = contact_body(n);
        body["email"] = json!(email);

        let response = post_json(build_test_app(pool.clone()), "/contacts", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{email}");
        let errors = body_json(response).await["errors"].clone();
        assert_eq!(errors["email"], json!(["Not a valid email address."]));
    }
    assert_eq!(contact_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_oversized_body_returns_413(pool: PgPool) {
    let mut body = contact_body(1);
    body["project_details"] = json!("x".repeat(3 * 1024 * 1024));

    let response = post_json(build_test_app(pool.clone()), "/contacts", body).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(contact_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_cannot_set_server_fields(pool: PgPool) {
    let mut body = contact_body(1);
    body["id"] = json!(42);
    body["created_at"] = json!("2001-01-01T00:00:00Z");

    let response = post_json(build_test_app(pool), "/contacts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await["errors"].clone();
    assert_eq!(errors["id"], json!(["Unknown field."]));
    assert_eq!(errors["created_at"], json!(["Unknown field."]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_json_returns_400(pool: PgPool) {
    let response = send_raw(
        build_test_app(pool),
        Method::POST,
        "/contacts",
        "{\"full_name\": ",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_JSON");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_object_json_returns_400(pool: PgPool) {
    let response = send_raw(build_test_app(pool), Method::POST, "/contacts", "[1, 2]").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_JSON");
}

// ---------------------------------------------------------------------------
// Get / round-trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_post_then_get_round_trips_fields(pool: PgPool) {
    let created = create_contact(&pool, 7).await;
    let id = created["id"].as_i64().unwrap();

    let response = get(build_test_app(pool), &format!("/contacts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(response).await;
    let sent = contact_body(7);
    for field in WRITABLE {
        assert_eq!(fetched[field], sent[field], "field {field}");
    }
    assert_eq!(fetched["id"], created["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_contact_returns_404(pool: PgPool) {
    let response = get(build_test_app(pool), "/contacts/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_id_returns_400(pool: PgPool) {
    let response = get(build_test_app(pool), "/contacts/abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// List / pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_second_page(pool: PgPool) {
    for n in 1..=12 {
        create_contact(&pool, n).await;
    }

    let response = get(build_test_app(pool), "/contacts?page=2&per_page=5").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total"], 12);
    assert_eq!(json["page"], 2);
    assert_eq!(json["per_page"], 5);
    assert_eq!(json["pages"], 3);

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert_eq!(items[0]["full_name"], "Contact 6");
    assert_eq!(items[4]["full_name"], "Contact 10");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_uses_default_page_size(pool: PgPool) {
    for n in 1..=3 {
        create_contact(&pool, n).await;
    }

    let json = body_json(get(build_test_app(pool), "/contacts").await).await;
    assert_eq!(json["page"], 1);
    assert_eq!(json["per_page"], 20);
    assert_eq!(json["total"], 3);
    assert_eq!(json["pages"], 1);
    assert_eq!(json["items"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_past_last_page_is_empty(pool: PgPool) {
    create_contact(&pool, 1).await;

    let json = body_json(get(build_test_app(pool), "/contacts?page=5&per_page=5").await).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["pages"], 1);
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_non_numeric_page_returns_400(pool: PgPool) {
    let response = get(build_test_app(pool), "/contacts?page=two").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_changes_only_supplied_fields(pool: PgPool) {
    let created = create_contact(&pool, 1).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/contacts/{id}"),
        json!({"business_name": "Renamed Business", "service": "design"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["business_name"], "Renamed Business");
    assert_eq!(updated["service"], "design");
    assert_eq!(updated["full_name"], created["full_name"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["project_details"], created["project_details"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_contact_returns_404(pool: PgPool) {
    let response = put_json(
        build_test_app(pool),
        "/contacts/999999",
        json!({"full_name": "Nobody Home"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_to_taken_email_returns_409_and_keeps_row(pool: PgPool) {
    let first = create_contact(&pool, 1).await;
    let second = create_contact(&pool, 2).await;
    let id = second["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/contacts/{id}"),
        json!({"email": first["email"], "full_name": "Should Not Stick"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let after = body_json(get(build_test_app(pool), &format!("/contacts/{id}")).await).await;
    assert_eq!(after, second);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_validates_supplied_fields(pool: PgPool) {
    let created = create_contact(&pool, 1).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/contacts/{id}"),
        json!({"full_name": "X"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["errors"]["full_name"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_can_clear_project_details(pool: PgPool) {
    let created = create_contact(&pool, 1).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        build_test_app(pool),
        &format!("/contacts/{id}"),
        json!({"project_details": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_json(response).await["project_details"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_update_body_returns_400(pool: PgPool) {
    let created = create_contact(&pool, 1).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json(build_test_app(pool), &format!("/contacts/{id}"), json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_JSON");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_then_get_returns_404(pool: PgPool) {
    let created = create_contact(&pool, 1).await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(build_test_app(pool.clone()), &format!("/contacts/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "deleted"}));

    let response = get(build_test_app(pool.clone()), &format!("/contacts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again reports not-found.
    let response = delete(build_test_app(pool), &format!("/contacts/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_contact_frees_its_phone_and_email(pool: PgPool) {
    let created = create_contact(&pool, 1).await;
    let id = created["id"].as_i64().unwrap();
    delete(build_test_app(pool.clone()), &format!("/contacts/{id}")).await;

    let response = post_json(build_test_app(pool), "/contacts", contact_body(1)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
