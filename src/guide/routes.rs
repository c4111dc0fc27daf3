//! REST endpoints for the guide — a JSON render adapter over `GuideSessions`.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use uuid::Uuid;

use super::action::Action;
use super::quick_reference::{SectionKey, quick_reference};
use super::session::GuideSessions;
use super::tiers::{TierId, tier};
use crate::access::AccessCheck;
use crate::error::{AccessError, Error, SessionError, WizardError};

/// Shared state for guide routes.
#[derive(Clone)]
pub struct GuideRouteState {
    pub sessions: Arc<GuideSessions>,
    pub access: Arc<dyn AccessCheck>,
}

/// Build the guide REST routes.
///
/// Everything under `/api/guide` sits behind the access check; only
/// `/health` is open.
pub fn guide_routes(sessions: Arc<GuideSessions>, access: Arc<dyn AccessCheck>) -> Router {
    let state = GuideRouteState { sessions, access };

    let api = Router::new()
        .route("/api/guide/sessions", post(create_session))
        .route(
            "/api/guide/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/guide/sessions/{id}/actions", post(dispatch_action))
        .route(
            "/api/guide/sessions/{id}/sections/{key}/toggle",
            post(toggle_section),
        )
        .route("/api/guide/sessions/{id}/reset", post(reset_session))
        .route("/api/guide/tiers/{n}", get(get_tier))
        .route("/api/guide/reference/{key}", get(get_reference))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_access));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(ServiceBuilder::new().layer(CorsLayer::new().allow_origin(Any).allow_methods(Any)))
        .with_state(state)
}

/// Map a guide error to a status code and `{"error": ...}` body.
fn error_response(err: Error) -> Response {
    let status = match &err {
        Error::Wizard(WizardError::InvalidAction { .. }) => StatusCode::CONFLICT,
        Error::Wizard(WizardError::UndefinedCatalogReference { .. }) => StatusCode::NOT_FOUND,
        Error::Access(AccessError::Unauthorized) => StatusCode::FORBIDDEN,
        Error::Session(SessionError::NotFound { .. }) => StatusCode::NOT_FOUND,
        Error::Session(SessionError::CapacityReached { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

/// Reject requests from viewers the access check does not recognise.
async fn require_access(
    State(state): State<GuideRouteState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.access.is_authorized(request.headers()) {
        warn!(path = %request.uri().path(), "Request rejected by access check");
        return error_response(AccessError::Unauthorized.into());
    }
    next.run(request).await
}

fn respond<T: serde::Serialize>(status: StatusCode, result: crate::error::Result<T>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => error_response(e),
    }
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "outbound-guide"
    }))
}

// ── Sessions ────────────────────────────────────────────────────────────

/// POST /api/guide/sessions
///
/// Mounts a fresh traversal if the access check passes.
async fn create_session(State(state): State<GuideRouteState>, headers: HeaderMap) -> Response {
    let authorized = state.access.is_authorized(&headers);
    respond(StatusCode::CREATED, state.sessions.open(authorized).await)
}

/// GET /api/guide/sessions/{id}
async fn get_session(State(state): State<GuideRouteState>, Path(id): Path<Uuid>) -> Response {
    respond(StatusCode::OK, state.sessions.view(id).await)
}

/// POST /api/guide/sessions/{id}/actions
///
/// Body is an `Action`. Invalid actions return 409 and leave state unchanged.
async fn dispatch_action(
    State(state): State<GuideRouteState>,
    Path(id): Path<Uuid>,
    Json(action): Json<Action>,
) -> Response {
    respond(StatusCode::OK, state.sessions.dispatch(id, action).await)
}

/// POST /api/guide/sessions/{id}/sections/{key}/toggle
async fn toggle_section(
    State(state): State<GuideRouteState>,
    Path((id, key)): Path<(Uuid, String)>,
) -> Response {
    let key = match key.parse::<SectionKey>() {
        Ok(k) => k,
        Err(e) => return error_response(e.into()),
    };
    respond(StatusCode::OK, state.sessions.toggle_section(id, key).await)
}

/// POST /api/guide/sessions/{id}/reset
async fn reset_session(State(state): State<GuideRouteState>, Path(id): Path<Uuid>) -> Response {
    respond(StatusCode::OK, state.sessions.reset(id).await)
}

/// DELETE /api/guide/sessions/{id}
async fn delete_session(State(state): State<GuideRouteState>, Path(id): Path<Uuid>) -> Response {
    match state.sessions.close(id).await {
        Ok(()) => {
            info!(session_id = %id, "Session deleted via API");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => error_response(e),
    }
}

// ── Catalogs ────────────────────────────────────────────────────────────

/// GET /api/guide/tiers/{n}
async fn get_tier(Path(n): Path<u8>) -> Response {
    match TierId::try_from(n) {
        Ok(id) => Json(tier(id)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

/// GET /api/guide/reference/{key}
async fn get_reference(Path(key): Path<String>) -> Response {
    match key.parse::<SectionKey>() {
        Ok(key) => Json(quick_reference(key)).into_response(),
        Err(e) => error_response(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::access::TrustedHeader;

    const IDENTITY: &str = "x-authenticated-user";

    fn app() -> Router {
        let sessions = GuideSessions::new(16, Duration::from_secs(600));
        let access: Arc<dyn AccessCheck> = Arc::new(TrustedHeader::new(IDENTITY).unwrap());
        guide_routes(sessions, access)
    }

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), 1_000_000)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&bytes).expect("Failed to parse JSON")
    }

    fn post(uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(IDENTITY, "ana@example.com")
            .header("content-type", "application/json");
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
        builder.body(body).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(IDENTITY, "ana@example.com")
            .body(Body::empty())
            .unwrap()
    }

    async fn create(app: &Router) -> String {
        let resp = app
            .clone()
            .oneshot(post("/api/guide/sessions", None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["screen"]["stepId"], "initial");
        json["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_requires_identity_header() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/guide/sessions")
            .body(Body::empty())
            .unwrap();
        let resp = app().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("not authorized"));
    }

    #[tokio::test]
    async fn dispatch_walks_the_flow() {
        let app = app();
        let id = create(&app).await;
        let uri = format!("/api/guide/sessions/{id}/actions");

        let resp = app
            .clone()
            .oneshot(post(&uri, Some(serde_json::json!({"type": "start_qualification"}))))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = app
            .clone()
            .oneshot(post(
                &uri,
                Some(serde_json::json!({"type": "answer_value", "explained": false})),
            ))
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["state"]["currentStep"], "noValue");
        assert_eq!(json["state"]["answers"]["valueExplained"], false);
        assert_eq!(json["screen"]["title"], "Do Not Engage");
    }

    #[tokio::test]
    async fn invalid_action_is_conflict() {
        let app = app();
        let id = create(&app).await;
        let resp = app
            .clone()
            .oneshot(post(
                &format!("/api/guide/sessions/{id}/actions"),
                Some(serde_json::json!({"type": "select_tier", "tier": 1})),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = app
            .oneshot(get(&format!("/api/guide/sessions/{id}")))
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["state"]["currentStep"], "initial");
    }

    #[tokio::test]
    async fn toggle_unknown_section_is_not_found() {
        let app = app();
        let id = create(&app).await;
        let resp = app
            .clone()
            .oneshot(post(&format!("/api/guide/sessions/{id}/sections/pricing/toggle"), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app
            .oneshot(post(&format!("/api/guide/sessions/{id}/sections/comms/toggle"), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["state"]["expandedSections"]["comms"], true);
    }

    #[tokio::test]
    async fn catalog_lookups() {
        let resp = app()
            .oneshot(get("/api/guide/tiers/3"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["researchBar"], "high");
        assert_eq!(json["requirements"].as_array().unwrap().len(), 6);

        let resp = app()
            .oneshot(get("/api/guide/tiers/5"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app()
            .oneshot(get("/api/guide/reference/comms"))
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["label"], "Communication Rules");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let resp = app()
            .oneshot(post(&format!("/api/guide/sessions/{}/reset", Uuid::new_v4()), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn api_routes_require_identity_header() {
        let app = app();
        let id = create(&app).await;

        let anonymous = |method: &str, uri: String, body: Body| {
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .unwrap()
        };

        let requests = [
            anonymous("GET", "/api/guide/tiers/3".to_string(), Body::empty()),
            anonymous("GET", "/api/guide/reference/comms".to_string(), Body::empty()),
            anonymous("GET", format!("/api/guide/sessions/{id}"), Body::empty()),
            anonymous(
                "POST",
                format!("/api/guide/sessions/{id}/actions"),
                Body::from(r#"{"type":"start_qualification"}"#),
            ),
            anonymous("POST", format!("/api/guide/sessions/{id}/reset"), Body::empty()),
            anonymous("DELETE", format!("/api/guide/sessions/{id}"), Body::empty()),
        ];
        for req in requests {
            let uri = req.uri().to_string();
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
        }

        // The rejected action never reached the session.
        let resp = app.clone().oneshot(get(&format!("/api/guide/sessions/{id}"))).await.unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["state"]["currentStep"], "initial");

        let resp = app
            .oneshot(anonymous("GET", "/health".to_string(), Body::empty()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
