//! Token issuance and gate behaviour over the full router
//!
//! Run with: cargo test --test auth_tests

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::spawn_app;
use harbor::auth::{Claims, TokenService};
use harbor::config::AuthConfig;
use harbor::error::{INSUFFICIENT_ROLE_MESSAGE, INVALID_TOKEN_MESSAGE, MISSING_AUTH_MESSAGE, MISSING_PARAMETER_MESSAGE};
use serde_json::{json, Value};

// ============================================================================
// Token issuance
// ============================================================================

#[tokio::test]
async fn test_authenticate_trusted_domain_gets_admin() {
    let app = spawn_app().await;

    let (status, body) = app
        .send_json(
            Method::POST,
            "/api/v1/user/authenticate",
            None,
            json!({ "email": "marlin@turing.io", "app_name": "wallabies" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().expect("token in body");
    let claims = app.state.tokens.verify(token).expect("valid token");
    assert!(claims.admin);
    assert_eq!(claims.email, "marlin@turing.io");
    assert_eq!(claims.app_name, "wallabies");
    assert_eq!(claims.exp - claims.iat, 48 * 3600);
}

#[tokio::test]
async fn test_authenticate_other_domain_is_read_only() {
    let app = spawn_app().await;

    let (status, body) = app
        .send_json(
            Method::POST,
            "/api/v1/user/authenticate",
            None,
            json!({ "email": "someone@gmail.com", "app_name": "Jargo" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let claims = app
        .state
        .tokens
        .verify(body["token"].as_str().unwrap())
        .unwrap();
    assert!(!claims.admin);
}

#[tokio::test]
async fn test_authenticate_missing_parameter() {
    let app = spawn_app().await;

    for payload in [
        json!({ "name": "max" }),
        json!({ "email": "max@turing.io" }),
        json!({ "app_name": "wallabies" }),
        json!({ "email": "", "app_name": "wallabies" }),
    ] {
        let (status, body) = app
            .send_json(Method::POST, "/api/v1/user/authenticate", None, payload)
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], MISSING_PARAMETER_MESSAGE);
    }
}

#[tokio::test]
async fn test_authenticate_without_body() {
    let app = spawn_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/user/authenticate")
        .body(Body::empty())
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], MISSING_PARAMETER_MESSAGE);
}

#[tokio::test]
async fn test_authenticate_with_form_body() {
    let app = spawn_app().await;
    let (status, body) = app
        .send_raw(
            Method::POST,
            "/api/v1/user/authenticate",
            None,
            Some("application/x-www-form-urlencoded"),
            "email=a%40turing.io&app_name=Jargo",
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let claims = app
        .state
        .tokens
        .verify(body["token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.email, "a@turing.io");
    assert!(claims.admin);
}

// ============================================================================
// Token transport
// ============================================================================

#[tokio::test]
async fn test_all_transports_return_same_payload() {
    let app = spawn_app().await;
    let token = app.user_token.clone();

    let (status, from_header) = app.get("/api/v1/ports", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(from_header.as_array().unwrap().len(), 3);

    let (status, from_query) = app
        .get(&format!("/api/v1/ports?token={}", token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/ports")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "token": token }).to_string()))
        .unwrap();
    let (status, from_body) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(from_header, from_query);
    assert_eq!(from_header, from_body);
}

#[tokio::test]
async fn test_form_body_token() {
    let app = spawn_app().await;
    let (status, body) = app
        .send_raw(
            Method::GET,
            "/api/v1/ports",
            None,
            Some("application/x-www-form-urlencoded"),
            &format!("token={}", app.user_token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    // Admin token in a form body also unlocks writes, and is not persisted
    let (status, body) = app
        .send_raw(
            Method::PATCH,
            &format!("/api/v1/ships/{}", app.ships[0]),
            None,
            Some("application/x-www-form-urlencoded"),
            &format!("token={}&ship_type=Tanker", app.admin_token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["ship_type"], "Tanker");
}

#[tokio::test]
async fn test_bearer_scheme_is_accepted() {
    let app = spawn_app().await;
    let (status, _) = app
        .get("/api/v1/ships", Some(&format!("Bearer {}", app.user_token)))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_first_location_is_used_exclusively() {
    let app = spawn_app().await;

    // A bad header token is not rescued by a good query token
    let (status, body) = app
        .get(
            &format!("/api/v1/ports?token={}", app.user_token),
            Some("not-a-token"),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], INVALID_TOKEN_MESSAGE);
}

// ============================================================================
// Rejections
// ============================================================================

#[tokio::test]
async fn test_missing_token_rejected_everywhere() {
    let app = spawn_app().await;
    let ship = app.ships[0];
    let port = app.ports[0];

    let requests = vec![
        (Method::GET, "/api/v1/ports".to_string()),
        (Method::GET, format!("/api/v1/ports/{}", port)),
        (Method::GET, "/api/v1/port-usage".to_string()),
        (Method::GET, "/api/v1/ships".to_string()),
        (Method::GET, format!("/api/v1/ships/{}", ship)),
        (Method::POST, "/api/v1/ports".to_string()),
        (Method::PATCH, format!("/api/v1/ships/{}", ship)),
        (Method::PUT, format!("/api/v1/port-usage/{}", port)),
        (Method::DELETE, format!("/api/v1/ports/{}", port)),
    ];

    for (method, uri) in requests {
        let (status, body) = app.send_json(method.clone(), &uri, None, json!({})).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{} {}", method, uri);
        assert_eq!(body["error"], MISSING_AUTH_MESSAGE, "{} {}", method, uri);
    }

    assert_eq!(app.count("/api/v1/ports").await, 3);
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let app = spawn_app().await;
    // Admin signature over a standard user's claims
    let admin: Vec<&str> = app.admin_token.split('.').collect();
    let user: Vec<&str> = app.user_token.split('.').collect();
    let token = format!("{}.{}.{}", admin[0], user[1], admin[2]);

    let (status, body) = app.get("/api/v1/ports", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], INVALID_TOKEN_MESSAGE);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = spawn_app().await;
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        email: "test@turing.io".to_string(),
        app_name: "Jargo".to_string(),
        admin: true,
        iat: now - 72 * 3600,
        exp: now - 24 * 3600,
    };
    let token = app.state.tokens.sign(&claims).unwrap();

    let (status, body) = app.get("/api/v1/ships", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], INVALID_TOKEN_MESSAGE);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let app = spawn_app().await;
    let foreign = TokenService::new("some-other-secret", &AuthConfig::default()).unwrap();
    let token = foreign.issue("test@turing.io", "Jargo").unwrap();

    let (status, body) = app.get("/api/v1/port-usage", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], INVALID_TOKEN_MESSAGE);
}

#[tokio::test]
async fn test_standard_token_cannot_write() {
    let app = spawn_app().await;
    let token = app.user_token.clone();
    let ship = app.ships[0];
    let port = app.ports[0];

    let (status, body) = app
        .send_json(
            Method::PATCH,
            &format!("/api/v1/ships/{}", ship),
            Some(&token),
            json!({ "ship_status": "underway using engine" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], INSUFFICIENT_ROLE_MESSAGE);

    let (status, body) = app.delete(&format!("/api/v1/ports/{}", port), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], INSUFFICIENT_ROLE_MESSAGE);

    let (_, ships) = app.get(&format!("/api/v1/ships/{}", ship), Some(&token)).await;
    assert_eq!(ships[0]["ship_status"], "moored");
    assert_eq!(app.count("/api/v1/ports").await, 3);
}

#[tokio::test]
async fn test_admin_token_in_body_is_not_persisted() {
    let app = spawn_app().await;

    let payload = json!({
        "token": app.admin_token,
        "ship_name": "Boaty McBoatface",
        "ship_country": "UK",
        "ship_type": "Research",
        "ship_length": "129x24m",
        "ship_imo": "9798961",
        "ship_status": "moored",
        "ship_mmsi_callsign": "235113649",
        "ship_current_port": app.ports[1]
    });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/ships")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();

    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::CREATED);
    let created = &body[0];
    assert_eq!(created["ship_name"], "Boaty McBoatface");
    assert_eq!(created.get("token"), None::<&Value>);
}
