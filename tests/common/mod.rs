#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use movies_admin::{AppState, config::DbSettings, db, db::ConnectionFactory, router};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory SQLite database with the movies table.
pub async fn app() -> (Router, DatabaseConnection) {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn = Database::connect(opts).await.expect("open sqlite");
    db::create_schema(&conn).await.expect("create movies table");

    let app = router(AppState::new(ConnectionFactory::shared(conn.clone())));
    (app, conn)
}

/// Router whose settings cannot produce a connection: any store access is a 500.
pub fn unreachable_app() -> Router {
    router(AppState::new(ConnectionFactory::per_request(DbSettings::default())))
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("router is infallible")
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        },
        None => Body::empty(),
    };
    let resp = send(app, builder.body(body).unwrap()).await;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

pub async fn send_form(app: &Router, uri: &str, fields: &[(&str, &str)]) -> Response<Body> {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

pub async fn get_html(app: &Router, uri: &str) -> (StatusCode, String) {
    let resp = send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}
