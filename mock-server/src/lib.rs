//! In-memory stand-in for the Oura v2 usercollection endpoints.
//!
//! Serves fixed fixture documents, paginates list endpoints `PAGE_SIZE`
//! documents at a time, and reproduces the upstream habit of answering some
//! failures with HTTP 200 and a `{"message": ...}` body (any document id equal
//! to `INVALID_DOCUMENT_ID`). Every route requires a bearer token.

pub mod fixtures;

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub const PAGE_SIZE: usize = 2;
pub const INVALID_DOCUMENT_ID: &str = "invalid";

#[derive(Debug, Clone)]
pub struct Store {
    pub personal_info: Value,
    pub daily_activity: Vec<Value>,
    pub sleep_time: Vec<Value>,
    pub sleep: Vec<Value>,
}

impl Store {
    pub fn seeded() -> Self {
        Self {
            personal_info: fixtures::personal_info(),
            daily_activity: fixtures::daily_activities(),
            sleep_time: fixtures::sleep_times(),
            sleep: fixtures::sleeps(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub next_token: Option<String>,
}

pub type Db = Arc<Store>;

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    Router::new()
        .route("/v2/usercollection/personal_info", get(personal_info))
        .route("/v2/usercollection/daily_activity", get(list_daily_activity))
        .route("/v2/usercollection/daily_activity/{id}", get(get_daily_activity))
        .route("/v2/usercollection/sleep_time", get(list_sleep_time))
        .route("/v2/usercollection/sleep_time/{id}", get(get_sleep_time))
        .route("/v2/usercollection/sleep", get(list_sleep))
        .route("/v2/usercollection/sleep/{id}", get(get_sleep))
        .layer(middleware::from_fn(require_bearer))
        .with_state(Arc::new(store))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_bearer(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());

    let response = if authorized {
        next.run(request).await
    } else {
        problem(StatusCode::UNAUTHORIZED, "Missing or invalid bearer token")
    };
    info!(%method, %uri, status = response.status().as_u16(), "request");
    response
}

async fn personal_info(State(db): State<Db>) -> Json<Value> {
    Json(db.personal_info.clone())
}

async fn get_daily_activity(State(db): State<Db>, Path(id): Path<String>) -> Response {
    find_document(&db.daily_activity, &id)
}

async fn list_daily_activity(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    list_documents(&db.daily_activity, &params)
}

async fn get_sleep_time(State(db): State<Db>, Path(id): Path<String>) -> Response {
    find_document(&db.sleep_time, &id)
}

async fn list_sleep_time(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    list_documents(&db.sleep_time, &params)
}

async fn get_sleep(State(db): State<Db>, Path(id): Path<String>) -> Response {
    find_document(&db.sleep, &id)
}

async fn list_sleep(State(db): State<Db>, Query(params): Query<ListParams>) -> Response {
    list_documents(&db.sleep, &params)
}

fn find_document(documents: &[Value], id: &str) -> Response {
    if id == INVALID_DOCUMENT_ID {
        return (StatusCode::OK, Json(json!({"message": "invalid"}))).into_response();
    }
    match documents.iter().find(|doc| doc["id"] == id) {
        Some(doc) => Json(doc.clone()).into_response(),
        None => problem(StatusCode::NOT_FOUND, "Document not found"),
    }
}

fn list_documents(documents: &[Value], params: &ListParams) -> Response {
    for (name, value) in [("start_date", &params.start_date), ("end_date", &params.end_date)] {
        if let Some(value) = value {
            if !is_calendar_date(value) {
                return problem(StatusCode::BAD_REQUEST, &format!("Invalid {name}: {value}"));
            }
        }
    }

    let offset = match params.next_token.as_deref().map(str::parse::<usize>) {
        None => 0,
        Some(Ok(offset)) => offset,
        Some(Err(_)) => return problem(StatusCode::BAD_REQUEST, "Invalid next_token"),
    };

    // YYYY-MM-DD strings order the same lexically and chronologically.
    let matching: Vec<&Value> = documents
        .iter()
        .filter(|doc| {
            let day = doc["day"].as_str().unwrap_or_default();
            params.start_date.as_deref().map_or(true, |start| day >= start)
                && params.end_date.as_deref().map_or(true, |end| day <= end)
        })
        .collect();

    let data: Vec<Value> = matching.iter().skip(offset).take(PAGE_SIZE).map(|doc| (*doc).clone()).collect();
    let next = offset + PAGE_SIZE;
    let next_token = (next < matching.len()).then(|| next.to_string());
    debug!(matched = matching.len(), offset, returned = data.len(), "list page");

    Json(json!({"data": data, "next_token": next_token})).into_response()
}

fn is_calendar_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
}

fn problem(status: StatusCode, detail: &str) -> Response {
    let body = json!({
        "status": status.as_u16(),
        "title": status.canonical_reason().unwrap_or_default(),
        "detail": detail,
    });
    (status, Json(body)).into_response()
}
