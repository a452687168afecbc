// ABOUTME: End-to-end smoke test for the full guest lifecycle.
// ABOUTME: Create, list, fetch, update, soft delete, and the visibility rules in between.

use std::sync::Arc;

use axum::body::Body;
use guestd_server::{AppState, create_router};
use guestd_store::GuestStore;
use http::Request;
use tower::ServiceExt;

/// Helper to create a test AppState backed by a temp database file.
fn test_app_state(dir: &tempfile::TempDir) -> Arc<AppState> {
    let store = GuestStore::open(&dir.path().join("guests.db")).unwrap();
    Arc::new(AppState::new(store))
}

/// Helper to extract a JSON body from a response.
async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_guest(body: &serde_json::Value) -> Request<Body> {
    Request::post("/guests")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn smoke_test_full_lifecycle() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_app_state(&dir);

    // 1. POST /guests -> create a guest
    let app = create_router(Arc::clone(&state));
    let create_body = serde_json::json!({
        "name": "  Alice Tan ",
        "email": "alice@example.com",
        "phone": "0812345678",
        "id_card": "3174012345678901",
        "remark": "VIP guest",
    });

    let resp = app.oneshot(post_guest(&create_body)).await.unwrap();
    assert_eq!(resp.status(), 201, "create guest should return 201");

    let json = json_body(resp).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Alice Tan", "name should be trimmed");
    assert_eq!(json["data"]["status"], "active");
    let guest_id = json["data"]["id"].as_str().unwrap().to_string();

    // 2. GET /guests -> the new guest is listed
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/guests").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let json = json_body(resp).await;
    let listed = json["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], guest_id.as_str());

    // 3. GET /guests/{id} -> round-trips the created fields
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(
            Request::get(format!("/guests/{guest_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let json = json_body(resp).await;
    assert_eq!(json["data"]["email"], "alice@example.com");
    assert_eq!(json["data"]["phone"], "0812345678");
    assert_eq!(json["data"]["id_card"], "3174012345678901");
    assert_eq!(json["data"]["remark"], "VIP guest");
    assert_eq!(json["data"]["status"], "active");

    // 4. PUT /guests/{id} twice, back to back -> both succeed, last one sticks
    for remark in ["first writer", "second writer"] {
        let update_body = serde_json::json!({
            "name": "Alice Tan",
            "email": "alice@example.com",
            "phone": "0812345678",
            "id_card": "3174012345678901",
            "remark": remark,
        });
        let app = create_router(Arc::clone(&state));
        let resp = app
            .oneshot(
                Request::put(format!("/guests/{guest_id}"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&update_body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), 200, "update should return 200");
    }

    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(
            Request::get(format!("/guests/{guest_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = json_body(resp).await;
    assert_eq!(
        json["data"]["remark"], "second writer",
        "last write should win"
    );

    // 5. DELETE /guests/{id} -> returns the record, now marked deleted
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(
            Request::delete(format!("/guests/{guest_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), 200, "delete should return 200");
    let json = json_body(resp).await;
    assert_eq!(json["data"]["status"], "deleted");

    // 6. GET /guests -> the deleted guest no longer appears
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(Request::get("/guests").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = json_body(resp).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 0);

    // 7. GET /guests/{id} -> but it can still be fetched directly
    let app = create_router(Arc::clone(&state));
    let resp = app
        .oneshot(
            Request::get(format!("/guests/{guest_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let json = json_body(resp).await;
    assert_eq!(json["data"]["status"], "deleted");

    // 8. POST /guests reusing the freed email -> allowed after soft delete
    let app = create_router(Arc::clone(&state));
    let resp = app.oneshot(post_guest(&create_body)).await.unwrap();
    assert_eq!(resp.status(), 201, "freed email should be reusable");
}

#[tokio::test]
async fn smoke_test_rejections() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = test_app_state(&dir);

    // Validation failure carries the specific reason
    let app = create_router(Arc::clone(&state));
    let bad = serde_json::json!({
        "name": "Alice Tan",
        "email": "alice@example.com",
        "phone": "12345",
        "id_card": "3174012345678901",
        "remark": "VIP guest",
    });
    let resp = app.oneshot(post_guest(&bad)).await.unwrap();
    assert_eq!(resp.status(), 400);
    let json = json_body(resp).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "phone number must be 10-13 digits");

    // Duplicate email across two creates -> second one conflicts
    let good = serde_json::json!({
        "name": "Alice Tan",
        "email": "alice@example.com",
        "phone": "0812345678",
        "id_card": "3174012345678901",
        "remark": "VIP guest",
    });
    let app = create_router(Arc::clone(&state));
    assert_eq!(app.oneshot(post_guest(&good)).await.unwrap().status(), 201);

    let mut again = good.clone();
    again["id_card"] = serde_json::json!("9999888877776666");
    let app = create_router(Arc::clone(&state));
    let resp = app.oneshot(post_guest(&again)).await.unwrap();
    assert_eq!(resp.status(), 409, "duplicate email should conflict");
}
