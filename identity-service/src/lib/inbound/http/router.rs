use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::current_identity::current_identity;
use super::handlers::delete_todo::delete_todo;
use super::handlers::delete_todos::delete_todos;
use super::handlers::get_todo::get_todo;
use super::handlers::health::health;
use super::handlers::list_todos::list_todos;
use super::handlers::login::login;
use super::handlers::refresh_token::refresh_token;
use super::handlers::sign_up::sign_up;
use super::handlers::update_todo::update_todo;
use super::middleware::authenticate as auth_middleware;
use crate::domain::identity::ports::IdentityServicePort;
use crate::domain::todo::ports::TodoServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        identity_service,
        todo_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/signup", post(sign_up))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token));

    let protected_routes = Router::new()
        .route("/api/me", get(current_identity))
        .route(
            "/todos",
            post(create_todo).get(list_todos).delete(delete_todos),
        )
        .route(
            "/todos/:id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::SigningSecret;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::identity::models::IdentitySettings;
    use crate::domain::identity::service::IdentityService;
    use crate::domain::todo::service::TodoService;
    use crate::outbound::repositories::InMemoryIdentityRepository;
    use crate::outbound::repositories::InMemoryTodoRepository;

    fn router() -> Router {
        let authenticator = Arc::new(Authenticator::new(
            &SigningSecret::new("test-secret-key-for-jwt-signing-at-least-32-bytes").unwrap(),
        ));
        let identity_service = Arc::new(IdentityService::new(
            Arc::new(InMemoryIdentityRepository::new()),
            Arc::clone(&authenticator),
            IdentitySettings::default(),
        ));

        let todo_service = Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::new())));

        create_router(identity_service, todo_service, authenticator)
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["status"], "ok");
        assert_eq!(body["status_code"], 200);
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/api/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_todos_require_token() {
        for (method, uri) in [
            ("GET", "/todos"),
            ("POST", "/todos"),
            ("DELETE", "/todos"),
            ("GET", "/todos/not-a-uuid"),
            ("PUT", "/todos/not-a-uuid"),
            ("DELETE", "/todos/not-a-uuid"),
        ] {
            let response = router()
                .oneshot(
                    Request::builder()
                        .method(method)
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::UNAUTHORIZED,
                "{} {}",
                method,
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_malformed_json_rejected_before_service() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/signup")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
