#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value as JsonValue};
use superquiz_client::models::user::{Credential, User};
use tokio::net::TcpListener;
use url::Url;

pub const EMAIL: &str = "ana@example.com";
pub const PASSWORD: &str = "correct horse";
pub const TOKEN: &str = "token-ana";

type ApiResult = Result<Json<JsonValue>, (StatusCode, Json<JsonValue>)>;

#[derive(Clone, Default)]
pub struct FakeState {
    pub submissions: Arc<Mutex<Vec<(i64, JsonValue)>>>,
    pub created: Arc<Mutex<Vec<JsonValue>>>,
    pub list_fetches: Arc<AtomicUsize>,
    pub quiz_fetches: Arc<AtomicUsize>,
    pub fail_submit: Arc<AtomicBool>,
    pub revoked: Arc<AtomicBool>,
}

impl FakeState {
    pub fn submissions(&self) -> Vec<(i64, JsonValue)> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<JsonValue> {
        self.created.lock().unwrap().clone()
    }
}

pub struct FakeApi {
    pub url: Url,
    pub state: FakeState,
}

pub async fn spawn() -> FakeApi {
    let state = FakeState::default();
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/quizzes", get(list_quizzes).post(create_quiz))
        .route("/api/quizzes/:id", get(get_quiz))
        .route("/api/quizzes/:id/submit", post(submit_quiz))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake api");
    });

    FakeApi {
        url: Url::parse(&format!("http://{}", addr)).expect("url"),
        state,
    }
}

pub fn ana() -> User {
    User {
        id: 1,
        username: "ana".into(),
        email: EMAIL.into(),
    }
}

pub fn ana_credential() -> Credential {
    Credential {
        token: TOKEN.into(),
        user: ana(),
    }
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<JsonValue>) {
    (status, Json(json!({ "error": message })))
}

fn authorize(state: &FakeState, headers: &HeaderMap) -> Result<(), (StatusCode, Json<JsonValue>)> {
    let expected = format!("Bearer {}", TOKEN);
    let given = headers.get("authorization").and_then(|v| v.to_str().ok());
    if given == Some(expected.as_str()) && !state.revoked.load(Ordering::SeqCst) {
        Ok(())
    } else {
        Err(reject(StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }
}

async fn login(Json(body): Json<JsonValue>) -> ApiResult {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        Ok(Json(json!({ "token": TOKEN, "user": ana() })))
    } else {
        Err(reject(StatusCode::BAD_REQUEST, "Invalid credentials"))
    }
}

async fn register(Json(body): Json<JsonValue>) -> ApiResult {
    if body["email"] == EMAIL {
        return Err(reject(StatusCode::CONFLICT, "Email already registered"));
    }
    let username = body["username"].as_str().unwrap_or_default();
    Ok(Json(json!({
        "token": format!("token-{}", username),
        "user": { "id": 2, "username": username, "email": body["email"] }
    })))
}

async fn me(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    Ok(Json(json!(ana())))
}

async fn list_quizzes(State(state): State<FakeState>, headers: HeaderMap) -> ApiResult {
    authorize(&state, &headers)?;
    state.list_fetches.fetch_add(1, Ordering::SeqCst);
    let created = state.created.lock().unwrap().len();
    let mut list = vec![json!({
        "id": 1,
        "title": "Planets",
        "description": "The solar system",
        "category": "Science",
        "difficulty": "EASY",
        "questionCount": 2,
        "author": { "id": 1, "username": "ana" }
    })];
    if created > 0 {
        list.push(json!({
            "id": 99,
            "title": "Fresh quiz",
            "description": "",
            "category": "New",
            "difficulty": "MEDIUM",
            "questionCount": 1,
            "author": { "id": 1, "username": "ana" }
        }));
    }
    Ok(Json(JsonValue::Array(list)))
}

async fn get_quiz(
    State(state): State<FakeState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult {
    authorize(&state, &headers)?;
    state.quiz_fetches.fetch_add(1, Ordering::SeqCst);
    if id != 1 {
        return Err(reject(StatusCode::NOT_FOUND, "Quiz not found"));
    }
    Ok(Json(json!({
        "id": 1,
        "title": "Planets",
        "description": "The solar system",
        "category": "Science",
        "difficulty": "EASY",
        "questions": [
            { "id": 1, "text": "Largest planet?", "options": ["Jupiter", "Mars", "Venus"] },
            { "id": 2, "text": "Red planet?", "options": ["Venus", "Mars", "Saturn"] }
        ],
        "author": { "id": 1, "username": "ana" }
    })))
}

async fn create_quiz(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> ApiResult {
    authorize(&state, &headers)?;
    state.created.lock().unwrap().push(body.clone());
    let questions: Vec<JsonValue> = body["questions"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, q)| json!({ "id": i + 1, "text": q["text"], "options": q["options"] }))
        .collect();
    Ok(Json(json!({
        "id": 99,
        "title": body["title"],
        "description": body["description"],
        "category": body["category"],
        "difficulty": body["difficulty"],
        "questions": questions,
        "author": { "id": 1, "username": "ana" }
    })))
}

async fn submit_quiz(
    State(state): State<FakeState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<JsonValue>,
) -> ApiResult {
    authorize(&state, &headers)?;
    if state.fail_submit.load(Ordering::SeqCst) {
        return Err(reject(StatusCode::INTERNAL_SERVER_ERROR, "Grading unavailable"));
    }
    state.submissions.lock().unwrap().push((id, body));
    Ok(Json(json!({ "score": 1, "totalQuestions": 2, "passed": false })))
}
