//! Shared helpers: an in-memory app seeded with three ports and ten ships
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use harbor::api::{create_router, AppState, SharedState};
use harbor::config::{Config, DatabaseConfig};
use harbor::db::{NewPort, NewShip, UsageFields};
use harbor::Store;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub state: SharedState,
    pub admin_token: String,
    pub user_token: String,
    /// Seeded port ids in insertion order
    pub ports: Vec<i64>,
    /// Seeded ship ids in insertion order
    pub ships: Vec<i64>,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.secret = Some(SECRET.to_string());
    config.database = DatabaseConfig::in_memory();
    config.server.static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public");
    config
}

fn usage(values: [&str; 9]) -> UsageFields {
    UsageFields::from_ordered(values.map(str::to_string))
}

fn port(name: &str, locode: &str, max: &str, total: i64, country: &str, cargo: &str) -> NewPort {
    NewPort {
        port_name: name.to_string(),
        port_locode: locode.to_string(),
        port_max_vessel_size: max.to_string(),
        port_total_ships: total,
        port_country: country.to_string(),
        port_usage: usage([cargo, "1%", "2%", "3%", "4%", "5%", "6%", "7%", "0%"]),
    }
}

fn ship(name: &str, kind: &str, status: &str, port: i64) -> NewShip {
    NewShip {
        ship_name: name.to_string(),
        ship_country: "Russia".to_string(),
        ship_type: kind.to_string(),
        ship_length: "105x16m".to_string(),
        ship_imo: "9143881".to_string(),
        ship_status: status.to_string(),
        ship_mmsi_callsign: "273394480".to_string(),
        ship_current_port: port,
    }
}

async fn seed(store: &Store) -> (Vec<i64>, Vec<i64>) {
    let mut ports = Vec::new();
    for new in [
        port("Vladivostok", "RUVVO", "unavailable", 118, "Russia", "40%"),
        port("Rotterdam", "NLRTM", "399x61m", 1240, "Netherlands", "63%"),
        port("Los Angeles", "USLAX", "366x51m", 511, "USA", "58%"),
    ] {
        ports.push(store.create_port(&new).await.expect("seed port").port.id);
    }

    let names = [
        ("IRBIS", "Tug", "moored"),
        ("SEA SPIRIT", "Cargo", "underway using engine"),
        ("ANNA", "Tanker", "at anchor"),
        ("MAERSK KOBE", "Cargo", "moored"),
        ("NORDIC", "Fishing", "underway using engine"),
        ("EVER GIVEN", "Cargo", "moored"),
        ("STELLA", "Passenger", "at anchor"),
        ("PACIFIC", "Tanker", "moored"),
        ("HARMONY", "Sailing", "underway sailing"),
        ("GUARDIAN", "Military", "moored"),
    ];
    let mut ships = Vec::new();
    for (i, (name, kind, status)) in names.into_iter().enumerate() {
        let new = ship(name, kind, status, ports[i % ports.len()]);
        ships.push(store.create_ship(&new).await.expect("seed ship").id);
    }

    (ports, ships)
}

pub async fn spawn_app() -> TestApp {
    let store = Store::in_memory().await.expect("in-memory store");
    let (ports, ships) = seed(&store).await;

    let state = Arc::new(AppState::new(test_config(), store).expect("app state"));
    let admin_token = state
        .tokens
        .issue("test@turing.io", "Jargo")
        .expect("admin token");
    let user_token = state
        .tokens
        .issue("test@gmail.com", "Jargo")
        .expect("user token");

    TestApp {
        router: create_router(state.clone()),
        state,
        admin_token,
        user_token,
        ports,
        ships,
    }
}

impl TestApp {
    /// Send a request; the body is parsed as JSON when there is one
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        self.send(builder.body(Body::empty()).expect("request")).await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        self.send(builder.body(Body::from(body.to_string())).expect("request"))
            .await
    }

    /// Send a body as-is, with an optional content type
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.send(builder.body(Body::from(body.to_string())).expect("request"))
            .await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .header(header::AUTHORIZATION, token)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    /// Length of a list endpoint, read with a standard token
    pub async fn count(&self, uri: &str) -> usize {
        let (status, body) = self.get(uri, Some(&self.user_token)).await;
        assert_eq!(status, StatusCode::OK);
        body.as_array().expect("list body").len()
    }
}
