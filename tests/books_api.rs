//! Catalog management and browsing tests

mod common;

use common::{create_book, register_and_login, spawn_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_admin_list_empty_catalog() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    let response = app
        .client
        .get(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    // The administrator listing reports an empty catalog as an empty list
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_user_list_empty_catalog_is_404() {
    let app = spawn_app().await;
    let user = register_and_login(&app, "alice", "passw0rd1", "User").await;

    let response = app
        .client
        .get(app.url("/user/books"))
        .header("Authorization", format!("Bearer {}", user))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "No books found");
}

#[tokio::test]
async fn test_create_and_get_book() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    let response = app
        .client
        .post(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "title": "Dune", "author": "Frank Herbert", "genre": "Sci-Fi" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_i64().expect("No book ID");
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["available"], true);
    assert_eq!(body["borrowed"], false);

    let response = app
        .client
        .get(app.url(&format!("/admin/books/{}", id)))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"], "Frank Herbert");
}

#[tokio::test]
async fn test_create_book_with_seeded_flags() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    let response = app
        .client
        .post(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": "Reserved Copy",
            "author": "N. N.",
            "genre": "Reference",
            "available": false,
            "borrowed": true
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["available"], false);
    assert_eq!(body["borrowed"], true);
}

#[tokio::test]
async fn test_create_duplicate_book() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    create_book(&app, &admin, "Dune", "Frank Herbert", "Sci-Fi").await;

    let response = app
        .client
        .post(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "title": "Dune", "author": "Frank Herbert", "genre": "Classic" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book already exists");

    // Same title by a different author is a different book
    let response = app
        .client
        .post(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "title": "Dune", "author": "Someone Else", "genre": "Parody" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_partial_update_changes_only_given_fields() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    let id = create_book(&app, &admin, "Dune", "Frank Herbert", "Sci-Fi").await;

    let response = app
        .client
        .put(app.url(&format!("/admin/books/{}", id)))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "genre": "Classic Sci-Fi" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["genre"], "Classic Sci-Fi");
    assert_eq!(body["title"], "Dune");
    assert_eq!(body["author"], "Frank Herbert");
    assert_eq!(body["available"], true);

    // An empty update changes nothing
    let response = app
        .client
        .put(app.url(&format!("/admin/books/{}", id)))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["genre"], "Classic Sci-Fi");

    // Availability can be edited on its own
    let response = app
        .client
        .put(app.url(&format!("/admin/books/{}", id)))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "available": false }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["available"], false);
    assert_eq!(body["title"], "Dune");
}

#[tokio::test]
async fn test_update_missing_book() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    let response = app
        .client
        .put(app.url("/admin/books/9999"))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "title": "Whatever" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Book not found");
}

#[tokio::test]
async fn test_delete_book() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    let id = create_book(&app, &admin, "Dune", "Frank Herbert", "Sci-Fi").await;

    let response = app
        .client
        .delete(app.url(&format!("/admin/books/{}", id)))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    let response = app
        .client
        .get(app.url(&format!("/admin/books/{}", id)))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);

    // A second delete reports the same absence
    let response = app
        .client
        .delete(app.url(&format!("/admin/books/{}", id)))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_user_sees_catalog_once_filled() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;
    let user = register_and_login(&app, "alice", "passw0rd1", "User").await;

    create_book(&app, &admin, "Dune", "Frank Herbert", "Sci-Fi").await;
    create_book(&app, &admin, "Emma", "Jane Austen", "Classic").await;

    let response = app
        .client
        .get(app.url("/user/books"))
        .header("Authorization", format!("Bearer {}", user))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_admin_routes_reject_user_tokens() {
    let app = spawn_app().await;
    let user = register_and_login(&app, "alice", "passw0rd1", "User").await;

    let response = app
        .client
        .get(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", user))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Not authorized");

    let response = app
        .client
        .post(app.url("/admin/books"))
        .header("Authorization", format!("Bearer {}", user))
        .json(&json!({ "title": "Dune", "author": "Frank Herbert", "genre": "Sci-Fi" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
async fn test_user_routes_reject_admin_tokens() {
    let app = spawn_app().await;
    let admin = register_and_login(&app, "root", "adminpass1", "Admin").await;

    create_book(&app, &admin, "Dune", "Frank Herbert", "Sci-Fi").await;

    // Guards are exact: administrator tokens do not pass reader endpoints
    let response = app
        .client
        .get(app.url("/user/books"))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Not authorized");
}

#[tokio::test]
async fn test_admin_routes_reject_missing_token() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/admin/books"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}
