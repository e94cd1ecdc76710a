//! In-process HRMS backend used by the integration tests.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct Data {
    pub employees: Vec<Value>,
    pub attendance: Vec<Value>,
    pub requests: Vec<String>,
    next_id: u64,
}

impl Data {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<Data>>;

pub struct FakeBackend {
    pub base_url: String,
    data: Shared,
}

impl FakeBackend {
    pub fn reset(&self) {
        *self.data.lock().unwrap() = Data::default();
    }

    pub fn seed_employee(&self, code: &str, name: &str) -> u64 {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        data.employees.push(json!({
            "id": id,
            "employee_id": code,
            "full_name": name,
            "email": format!("{}@example.com", code.to_lowercase()),
            "department": "Engineering",
        }));
        id
    }

    pub fn seed_attendance(&self, code: &str, date: &str, status: &str) {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        data.attendance.push(json!({
            "id": id,
            "employee_id": code,
            "date": date,
            "status": status,
            "employee_name": code,
        }));
    }

    pub fn employee_count(&self) -> usize {
        self.data.lock().unwrap().employees.len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.data.lock().unwrap().requests.clone()
    }
}

pub static BACKEND: Lazy<FakeBackend> = Lazy::new(start_backend);

fn start_backend() -> FakeBackend {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind fake backend");
    listener.set_nonblocking(true).expect("nonblocking listener");
    let addr = listener.local_addr().unwrap();
    let data: Shared = Arc::default();
    let app = router(Arc::clone(&data));

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("fake backend runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
            axum::serve(listener, app).await.expect("fake backend serve");
        });
    });

    FakeBackend {
        base_url: format!("http://{addr}"),
        data,
    }
}

fn router(data: Shared) -> Router {
    Router::new()
        .route("/api/employees/", get(list_employees).post(create_employee))
        .route("/api/employees/:id/", get(get_employee).delete(delete_employee))
        .route("/api/attendance/", get(list_attendance).post(create_attendance))
        .route("/api/attendance/employee/:pk/", get(list_by_employee))
        .route("/api/fixtures/no-content", get(|| async { StatusCode::NO_CONTENT }))
        .route("/api/fixtures/not-json", get(|| async { "plain text" }))
        .route("/api/fixtures/teapot", get(|| async { StatusCode::IM_A_TEAPOT }))
        .route("/api/fixtures/echo", post(echo))
        .with_state(data)
}

fn log(data: &mut Data, line: String) {
    data.requests.push(line);
}

fn with_query(path: &str, query: &Option<String>) -> String {
    match query.as_deref() {
        Some(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    }
}

fn invalid(details: Value) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Validation failed", "details": details })),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("{what} not found") })),
    )
        .into_response()
}

fn text_field<'a>(body: &'a Value, field: &str) -> &'a str {
    body.get(field).and_then(Value::as_str).unwrap_or_default().trim()
}

async fn list_employees(State(data): State<Shared>) -> Json<Value> {
    let mut data = data.lock().unwrap();
    log(&mut data, "GET /api/employees/".to_string());
    Json(Value::Array(data.employees.clone()))
}

async fn create_employee(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut data = data.lock().unwrap();
    log(&mut data, "POST /api/employees/".to_string());

    let mut details = serde_json::Map::new();
    for field in ["employee_id", "full_name", "email", "department"] {
        if text_field(&body, field).is_empty() {
            details.insert(field.to_string(), json!(["This field is required."]));
        }
    }
    if !details.is_empty() {
        return invalid(Value::Object(details));
    }

    let code = text_field(&body, "employee_id").to_string();
    if data.employees.iter().any(|e| e["employee_id"] == code) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Conflict", "details": "Employee ID already exists." })),
        )
            .into_response();
    }

    let id = data.next_id();
    let employee = json!({
        "id": id,
        "employee_id": code,
        "full_name": text_field(&body, "full_name"),
        "email": text_field(&body, "email"),
        "department": text_field(&body, "department"),
    });
    data.employees.push(employee.clone());
    (StatusCode::CREATED, Json(employee)).into_response()
}

async fn get_employee(State(data): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut data = data.lock().unwrap();
    log(&mut data, format!("GET /api/employees/{id}/"));
    match data.employees.iter().find(|e| e["id"] == id) {
        Some(employee) => Json(employee.clone()).into_response(),
        None => not_found("Employee"),
    }
}

async fn delete_employee(State(data): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut data = data.lock().unwrap();
    log(&mut data, format!("DELETE /api/employees/{id}/"));
    let before = data.employees.len();
    data.employees.retain(|e| e["id"] != id);
    if data.employees.len() == before {
        return not_found("Employee");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_attendance(
    State(data): State<Shared>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let mut data = data.lock().unwrap();
    log(&mut data, with_query("GET /api/attendance/", &raw));
    let records = data
        .attendance
        .iter()
        .filter(|r| params.get("date").is_none_or(|date| r["date"] == date.as_str()))
        .filter(|r| {
            params
                .get("employee_id")
                .is_none_or(|code| r["employee_id"] == code.as_str())
        })
        .cloned()
        .collect();
    Json(Value::Array(records))
}

async fn list_by_employee(
    State(data): State<Shared>,
    Path(pk): Path<u64>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut data = data.lock().unwrap();
    log(&mut data, with_query(&format!("GET /api/attendance/employee/{pk}/"), &raw));
    let Some(code) = data
        .employees
        .iter()
        .find(|e| e["id"] == pk)
        .map(|e| e["employee_id"].clone())
    else {
        return not_found("Employee");
    };
    let records: Vec<Value> = data
        .attendance
        .iter()
        .filter(|r| r["employee_id"] == code)
        .filter(|r| params.get("date").is_none_or(|date| r["date"] == date.as_str()))
        .cloned()
        .collect();
    Json(Value::Array(records)).into_response()
}

async fn create_attendance(State(data): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut data = data.lock().unwrap();
    log(&mut data, "POST /api/attendance/".to_string());

    let code = text_field(&body, "employee_id").to_string();
    let date = text_field(&body, "date").to_string();
    let status = text_field(&body, "status").to_string();
    if date.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid", "details": { "date": "required" } })),
        )
            .into_response();
    }
    if status != "Present" && status != "Absent" {
        return invalid(json!({ "status": "Must be Present or Absent." }));
    }
    let Some(name) = data
        .employees
        .iter()
        .find(|e| e["employee_id"] == code.as_str())
        .map(|e| e["full_name"].clone())
    else {
        return invalid(json!({ "employee_id": "Employee not found." }));
    };

    let id = data.next_id();
    let record = json!({
        "id": id,
        "employee_id": code,
        "date": date,
        "status": status,
        "employee_name": name,
    });
    data.attendance.push(record.clone());
    (StatusCode::CREATED, Json(record)).into_response()
}

async fn echo(headers: HeaderMap, body: String) -> Json<Value> {
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({ "content_type": content_type, "body": body }))
}
