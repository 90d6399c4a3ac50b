//!
//! vestibule demo HTTP server
//! --------------------------
//! Axum wiring for the session gate: a named-route table, stub handlers for
//! the public routes the gate's classification refers to, and the gate itself
//! mounted as router-wide middleware so every request passes through it
//! before reaching a handler.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use tracing::info;

use crate::gate::{
    Decision, Identity, MemorySessionStore, RouteClassifier, RouteTable, Session, SessionGate,
    SessionStore,
};

pub const SESSION_COOKIE: &str = "sessionID";

/// Shared server state injected into all handlers and the gate middleware.
#[derive(Clone)]
pub struct AppState {
    pub gate: SessionGate,
    pub routes: Arc<RouteTable>,
}

fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}

/// Router-wide gate. Extracts the session cookie and the matched route name,
/// then applies the gate decision: forward (attaching identity when a session
/// resolved) or 302 Found to the login page. Unmatched paths carry no route
/// name and fall on the protected side.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let token = parse_cookie(request.headers(), SESSION_COOKIE);
    let route_name = match request.extensions().get::<MatchedPath>() {
        Some(m) => state.routes.name_for(m.as_str()).map(str::to_string),
        None => state.routes.name_for(request.uri().path()).map(str::to_string),
    };

    match state.gate.decide(token.as_deref(), route_name.as_deref()).await {
        Decision::Forward(identity) => {
            let mut request = request;
            if let Some(identity) = identity {
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        Decision::Redirect(location) => {
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
    }
}

fn route_table() -> RouteTable {
    let mut t = RouteTable::new();
    t.register("login", "/login");
    t.register("check_login", "/check_login");
    t.register("stylesheet", "/css/app.css");
    t.register("javascript", "/js/app.js");
    t.register("index", "/");
    t
}

/// Build the demo router over the given store, with the gate in front of
/// every route.
pub fn app(store: Arc<dyn SessionStore>) -> Router {
    let routes = Arc::new(route_table());
    let gate = SessionGate::new(store, routes.clone() as Arc<dyn RouteClassifier>);
    let state = AppState { gate, routes };
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_page))
        .route("/check_login", post(check_login))
        .route("/css/app.css", get(stylesheet))
        .route("/js/app.js", get(javascript))
        .layer(middleware::from_fn_with_state(state.clone(), require_session))
        .with_state(state)
}

async fn index(Extension(identity): Extension<Identity>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "user_id": identity.user_id,
        "is_authenticated": identity.is_authenticated,
    }))
}

async fn login_page(identity: Option<Extension<Identity>>) -> Json<serde_json::Value> {
    // public route; an authenticated user may land here too
    let authenticated = identity.map(|Extension(id)| id.is_authenticated).unwrap_or(false);
    Json(serde_json::json!({"page": "login", "authenticated": authenticated}))
}

async fn check_login() -> impl IntoResponse {
    // credential verification and session issuance live outside this service
    StatusCode::NOT_IMPLEMENTED
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], "body { margin: 0; }\n")
}

async fn javascript() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], "\"use strict\";\n")
}

/// Start the demo server bound to the given port, with a seeded in-memory
/// session so the gate has something to resolve out of the box.
pub async fn run_with_port(http_port: u16) -> anyhow::Result<()> {
    let store = Arc::new(MemorySessionStore::new());
    store.insert(Session { token: "demo".into(), user_id: 1 });
    info!("seeded demo session: cookie {}=demo", SESSION_COOKIE);

    let app = app(store);
    let addr: SocketAddr = format!("0.0.0.0:{}", http_port).parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Convenience entry point using the default port.
pub async fn run() -> anyhow::Result<()> {
    run_with_port(7878).await
}
