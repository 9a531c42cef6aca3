/// HTTP-level tests: drive the router in-process against an in-memory
/// database and check status codes and JSON bodies.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use memalbum_api::{AppStateInner, router};
use memalbum_db::Database;

fn app() -> Router {
    router(AppStateInner::new(Database::open_in_memory().unwrap()))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

async fn create_card(app: &Router, body: Value) -> String {
    let (status, body) = post(app, "/api/cards/new", body).await;
    assert_eq!(status, StatusCode::CREATED);
    body["card"]["code"].as_str().unwrap().to_string()
}

async fn create_album(app: &Router, name: &str, passcode: &str) -> Value {
    let (status, body) = post(
        app,
        "/api/albums/create",
        json!({ "name": name, "passcode": passcode }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["album"].clone()
}

#[tokio::test]
async fn birthday_album_end_to_end() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/cards/new",
        json!({ "recipient": "Sam", "occasion": "Birthday" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["card"]["recipient"], "Sam");
    assert_eq!(body["card"]["occasion"], "Birthday");
    assert!(body["card"]["custom_message"].is_null());
    let code = body["card"]["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);

    let (status, body) = post(
        &app,
        &format!("/api/cards/{code}/messages/send"),
        json!({ "message": "Happy birthday!" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"]["author"], "Anon");
    assert_eq!(body["message"]["message"], "Happy birthday!");

    let (status, body) = get(&app, &format!("/api/cards/{code}/messages")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["card"]["code"], code.as_str());
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["message"], "Happy birthday!");

    let album = create_album(&app, "Family", "abcd").await;
    let album_id = album["id"].as_str().unwrap().to_string();
    let album_code = album["code"].as_str().unwrap().to_string();
    assert_eq!(album["name"], "Family");
    assert!(album.get("passcode_hash").is_none());

    let (status, body) = post(
        &app,
        "/api/albums/add-card",
        json!({ "albumId": album_id, "passcode": "abcd", "cardCode": code }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["added"]["albumId"], album_id.as_str());
    assert_eq!(body["added"]["cardCode"], code.as_str());
    assert!(body["added"]["year"].is_null());

    let (status, body) = post(
        &app,
        "/api/album",
        json!({ "albumCode": album_code, "passcode": "abcd" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["album"]["id"], album_id.as_str());
    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["code"], code.as_str());
    assert_eq!(cards[0]["recipient"], "Sam");
    assert!(cards[0]["cardId"].is_string());
    assert!(cards[0]["added_at"].is_string());

    let (status, body) = post(
        &app,
        "/api/album",
        json!({ "albumCode": album_code, "passcode": "wxyz" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid passcode");

    let (status, body) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "cards": 1, "messages": 1 }));
}

#[tokio::test]
async fn card_defaults_and_limits() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/cards/new",
        json!({ "recipient": "   ", "custom_message": "x".repeat(600) }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["card"]["recipient"], "Someone special");
    assert_eq!(body["card"]["occasion"], "Other");
    assert_eq!(body["card"]["custom_message"].as_str().unwrap().len(), 500);
}

#[tokio::test]
async fn card_text_fields_are_clipped_to_their_limits() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/cards/new",
        json!({
            "recipient": "r".repeat(200),
            "occasion": "o".repeat(200),
            "custom_message": "   ",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["card"]["recipient"].as_str().unwrap().chars().count(), 120);
    assert_eq!(body["card"]["occasion"].as_str().unwrap().chars().count(), 120);
    assert!(body["card"]["custom_message"].is_null());

    // Limits count characters, not bytes
    let (_, body) = post(&app, "/api/cards/new", json!({ "recipient": "é".repeat(130) })).await;
    assert_eq!(body["card"]["recipient"], "é".repeat(120));
}

#[tokio::test]
async fn requested_card_code_is_used_then_replaced() {
    let app = app();

    let first = create_card(&app, json!({ "code": "party1" })).await;
    assert_eq!(first, "party1");

    let second = create_card(&app, json!({ "code": "party1" })).await;
    assert_ne!(second, "party1");
    assert_eq!(second.len(), 6);

    let (status, body) = get(&app, "/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cards"], 2);
}

#[tokio::test]
async fn card_exists_is_case_sensitive() {
    let app = app();
    let code = create_card(&app, json!({ "code": "abcdef" })).await;

    let (status, body) = get(&app, &format!("/api/cards/{code}/exists")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "exists": true, "code": "abcdef" }));

    let (status, body) = get(&app, "/api/cards/ABCDEF/exists").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "exists": false }));
}

#[tokio::test]
async fn blank_code_is_a_bad_request() {
    let app = app();

    let (status, body) = get(&app, "/api/cards/%20/exists").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing code");
}

#[tokio::test]
async fn undecodable_path_is_a_json_bad_request() {
    let app = app();

    // %FF decodes to a byte that is not valid UTF-8
    let (status, body) = get(&app, "/api/cards/%FF/exists").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing code" }));

    let (status, body) = get(&app, "/api/cards/%FF/messages").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing code");

    let (status, body) = post(&app, "/api/cards/%FF/messages/send", json!({ "message": "hi" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing code");

    let (status, body) = get(&app, "/api/albums/%FF/cards?passcode=abcd").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Missing code" }));

    let (status, body) = post(&app, "/api/albums/%FF/cards", json!({ "passcode": "abcd" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing code");
}

#[tokio::test]
async fn message_validation() {
    let app = app();
    let code = create_card(&app, json!({})).await;
    let uri = format!("/api/cards/{code}/messages/send");

    let (status, body) = post(&app, &uri, json!({ "author": "Kim", "message": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Message text is required");

    let (status, body) = post_raw(&app, &uri, "{not json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON");

    let (status, body) = post(&app, &uri, json!({ "message": "hi", "colour": "red" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON");

    let (status, body) = post(
        &app,
        "/api/cards/nope00/messages/send",
        json!({ "message": "hi" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Card not found");

    let (status, body) = post(
        &app,
        &uri,
        json!({
            "author": " Kim ",
            "message": "y".repeat(6000),
            "gif": "https://media.example.com/cake.gif",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"]["author"], "Kim");
    assert_eq!(body["message"]["message"].as_str().unwrap().len(), 5000);
    assert_eq!(body["message"]["gif"], "https://media.example.com/cake.gif");
}

#[tokio::test]
async fn message_author_and_gif_are_clipped() {
    let app = app();
    let code = create_card(&app, json!({})).await;
    let uri = format!("/api/cards/{code}/messages/send");

    let gif = format!("https://media.example.com/{}", "g".repeat(3000));
    let (status, body) = post(
        &app,
        &uri,
        json!({ "author": "a".repeat(100), "message": "hi", "gif": gif }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"]["author"].as_str().unwrap().chars().count(), 80);
    assert_eq!(body["message"]["gif"].as_str().unwrap().chars().count(), 2048);
    assert!(body["message"]["gif"].as_str().unwrap().starts_with("https://media.example.com/"));

    let (_, body) = post(&app, &uri, json!({ "author": "  ", "message": "hi", "gif": " " })).await;
    assert_eq!(body["message"]["author"], "Anon");
    assert!(body["message"]["gif"].is_null());
}

#[tokio::test]
async fn messages_listed_newest_first() {
    let app = app();
    let code = create_card(&app, json!({})).await;
    let uri = format!("/api/cards/{code}/messages/send");

    for text in ["first", "second", "third"] {
        let (status, _) = post(&app, &uri, json!({ "message": text })).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = get(&app, &format!("/api/cards/{code}/messages")).await;
    let texts: Vec<_> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["message"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, ["third", "second", "first"]);

    let (status, _) = get(&app, "/api/cards/nope00/messages").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn album_creation_validation() {
    let app = app();

    let (status, body) = post(&app, "/api/albums/create", json!({ "passcode": "abcd" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (status, body) = post(
        &app,
        "/api/albums/create",
        json!({ "name": "Family", "passcode": " abc " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passcode must be at least 4 chars");

    let (status, body) = post(
        &app,
        "/api/albums/create",
        json!({ "name": "Family", "passcode": "abcd", "code": "fam001" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["album"]["code"], "FAM001");
}

#[tokio::test]
async fn album_name_is_clipped() {
    let app = app();

    let album = create_album(&app, &"n".repeat(200), "abcd").await;
    assert_eq!(album["name"].as_str().unwrap().chars().count(), 120);
}

#[tokio::test]
async fn view_album_checks_not_found_before_passcode() {
    let app = app();
    let album = create_album(&app, "Family", "abcd").await;
    let album_code = album["code"].as_str().unwrap();

    let (status, body) = post(
        &app,
        "/api/album",
        json!({ "albumCode": "ZZZZZZ", "passcode": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Album not found");

    let (status, _) = post(
        &app,
        "/api/album",
        json!({ "albumCode": album_code, "passcode": "wrong" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post(&app, "/api/album", json!({ "albumCode": album_code })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "albumCode and passcode are required");

    // Code lookup is case-normalised
    let (status, body) = post(
        &app,
        "/api/album",
        json!({ "albumCode": album_code.to_lowercase(), "passcode": "abcd" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["album"]["code"], album_code);
    assert_eq!(body["cards"], json!([]));
}

#[tokio::test]
async fn adding_same_card_twice_keeps_one_link() {
    let app = app();
    let code = create_card(&app, json!({ "recipient": "Sam" })).await;
    let album = create_album(&app, "Family", "abcd").await;
    let album_id = album["id"].as_str().unwrap();

    let (status, body) = post(
        &app,
        "/api/albums/add-card",
        json!({ "albumId": album_id, "passcode": "abcd", "cardCode": code, "year": 2024 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["added"]["year"], 2024);

    let (status, body) = post(
        &app,
        "/api/albums/add-card",
        json!({ "albumId": album_id, "passcode": "abcd", "cardCode": code }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["added"]["year"], 2024);

    let (status, body) = get(&app, &format!("/api/albums/{album_id}/cards?passcode=abcd")).await;
    assert_eq!(status, StatusCode::OK);
    let cards = body["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["year"], 2024);
}

#[tokio::test]
async fn add_card_errors() {
    let app = app();
    let code = create_card(&app, json!({})).await;
    let album = create_album(&app, "Family", "abcd").await;
    let album_id = album["id"].as_str().unwrap();

    let (status, body) = post(
        &app,
        "/api/albums/add-card",
        json!({ "albumId": album_id, "cardCode": code }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "albumId, passcode, and cardCode are required");

    let (status, _) = post(
        &app,
        "/api/albums/add-card",
        json!({ "albumId": "missing", "passcode": "abcd", "cardCode": code }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/api/albums/add-card",
        json!({ "albumId": album_id, "passcode": "nope", "cardCode": code }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = post(
        &app,
        "/api/albums/add-card",
        json!({ "albumId": album_id, "passcode": "abcd", "cardCode": "nope00" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Card not found");
}

#[tokio::test]
async fn album_cards_by_id_or_code() {
    let app = app();
    let older = create_card(&app, json!({ "recipient": "Ana" })).await;
    let newer = create_card(&app, json!({ "recipient": "Ben" })).await;
    let album = create_album(&app, "Friends", "secret").await;
    let album_id = album["id"].as_str().unwrap();
    let album_code = album["code"].as_str().unwrap();

    for card in [&older, &newer] {
        let (status, _) = post(
            &app,
            "/api/albums/add-card",
            json!({ "albumId": album_code, "passcode": "secret", "cardCode": card }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, &format!("/api/albums/{album_id}/cards?passcode=secret")).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<_> = body["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, [newer.clone(), older.clone()]);

    let lower = album_code.to_lowercase();
    let (status, body) = post(
        &app,
        &format!("/api/albums/{lower}/cards"),
        json!({ "passcode": "secret" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["album"]["id"], album_id);
    assert_eq!(body["cards"].as_array().unwrap().len(), 2);

    let (status, body) = get(&app, &format!("/api/albums/{album_id}/cards")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passcode required");

    let (status, body) =
        post_raw(&app, &format!("/api/albums/{album_id}/cards"), "garbage".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Passcode required");

    let (status, _) = get(&app, "/api/albums/NOPE00/cards?passcode=secret").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, &format!("/api/albums/{album_id}/cards?passcode=wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_reports_version() {
    let app = app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}
