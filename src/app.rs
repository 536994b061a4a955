//! Application state and HTTP router.
//!
//! One GraphQL endpoint (GraphiQL for browser GETs) plus a health probe.
//! The GraphQL handler builds the per-request auth context before
//! execution and fails closed on unverifiable bearer tokens.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::response::IntoResponse;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::graphql::{CatalogSchema, CurrentUser, errors};
use crate::services::AuthService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub schema: CatalogSchema,
    pub auth: AuthService,
}

/// Build the HTTP router: GraphQL endpoint, health probe, CORS and trace
/// layers.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Raw Authorization header value, if any
fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok())
}

/// GraphQL query/mutation handler with auth context
///
/// A verified bearer token becomes the request's [CurrentUser]. No header,
/// a non-bearer scheme, or a token for a since-deleted user executes
/// anonymously. A bearer token that fails verification answers the whole
/// request with an INVALID_TOKEN error and no resolver runs.
async fn graphql_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    match state.auth.resolve_bearer(authorization_header(&headers)).await {
        Ok(Some(user)) => {
            request = request.data(CurrentUser(user));
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "rejected request with unverifiable bearer token");
            return errors::request_rejected(&e).into();
        }
    }

    state.schema.execute(request).await.into()
}

/// GraphiQL interactive playground (only for browsers)
async fn graphiql(headers: HeaderMap) -> impl IntoResponse {
    // Check if this is a browser request (accepts HTML)
    let accepts_html = headers
        .get(axum::http::header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        axum::response::Html(GraphiQLSource::build().endpoint("/graphql").finish())
            .into_response()
    } else {
        // Return a helpful JSON error for non-browser requests
        (
            axum::http::StatusCode::METHOD_NOT_ALLOWED,
            axum::Json(serde_json::json!({
                "error": "GET requests are not supported for GraphQL queries. Use POST with Content-Type: application/json"
            })),
        )
            .into_response()
    }
}

/// Liveness probe
async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
