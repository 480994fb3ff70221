//! Stub of the Business Manager service for integration tests.
//!
//! Every request is recorded; answers come from canned `(method, path)`
//! responses registered by the test. Anything else gets a FastAPI-style 404.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

#[derive(Debug, Clone)]
pub struct Hit {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct Stub {
    hits: Mutex<Vec<Hit>>,
    responses: Mutex<HashMap<(String, String), (u16, String)>>,
}

impl Stub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: &str, path: &str, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.into()));
    }

    pub fn respond_json(&self, method: &str, path: &str, status: u16, body: Value) {
        self.respond(method, path, status, body.to_string());
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hits_to(&self, method: &str, path: &str) -> Vec<Hit> {
        self.hits()
            .into_iter()
            .filter(|h| h.method == method && h.path == path)
            .collect()
    }
}

async fn handle(req: HttpRequest, body: web::Bytes, stub: web::Data<Stub>) -> HttpResponse {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let hit = Hit {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    stub.hits.lock().unwrap().push(hit.clone());

    let canned = stub
        .responses
        .lock()
        .unwrap()
        .get(&(hit.method.clone(), hit.path.clone()))
        .cloned();

    match canned {
        Some((status, body)) => HttpResponse::build(StatusCode::from_u16(status).unwrap())
            .content_type("application/json")
            .body(body),
        None => HttpResponse::NotFound().json(json!({"detail": "Not Found"})),
    }
}

/// Starts the stub on an ephemeral port and returns its base URL.
pub fn start(stub: Arc<Stub>) -> String {
    let data = web::Data::from(stub);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .default_service(web::to(handle))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

pub fn user_json(id: u64, role: u8) -> Value {
    json!({
        "id": id,
        "username": format!("user{id}"),
        "email": format!("user{id}@example.com"),
        "full_name": format!("User {id}"),
        "role": role,
        "role_name": match role { 1 => "Engineer", 2 => "Manager", 3 => "Director", _ => "Unknown role" },
        "is_active": true,
        "is_admin": false,
        "created_at": "2024-01-10T08:30:00.000000"
    })
}

pub fn login_json(id: u64, role: u8, token: &str) -> Value {
    json!({
        "access_token": token,
        "token_type": "bearer",
        "user": user_json(id, role)
    })
}

pub fn project_json(id: u64) -> Value {
    json!({
        "id": id,
        "name": format!("Project {id}"),
        "description": "desc",
        "status": "active",
        "created_by": 1,
        "created_at": "2024-01-10T08:30:00"
    })
}

pub fn task_json(id: u64, assigned_to: Option<u64>) -> Value {
    json!({
        "id": id,
        "title": format!("Task {id}"),
        "description": null,
        "status": "todo",
        "priority": "medium",
        "due_date": null,
        "project_id": 1,
        "assigned_to": assigned_to,
        "created_by": 1,
        "created_at": "2024-01-10T08:30:00"
    })
}
