//! REST API Server for the Financial Advisor Gateway
//!
//! Serves the mock gateway routes the dashboard calls, plus direct access
//! to the financial tools and the agent directory.

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::agents::{self, QueryRouter};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::{GatewayOutcome, GatewayRequest, MockGateway};
use crate::models::{Deployment, ToolInput};
use crate::tools::{create_registry, ToolRegistry};

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Failure that still carries a payload (e.g. unsupported currency).
    pub fn soft_error(data: serde_json::Value, message: Option<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            error: message,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub registry: Arc<ToolRegistry>,
    pub gateway: Arc<MockGateway>,
    pub config: Arc<GatewayConfig>,
}

impl ApiState {
    pub fn from_config(config: GatewayConfig) -> Self {
        Self {
            registry: Arc::new(create_registry(config.mock_seed)),
            gateway: Arc::new(MockGateway::new(config.mock_seed)),
            config: Arc::new(config),
        }
    }
}

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub query: String,
    #[serde(default)]
    pub deployment: Deployment,
}

/// =============================
/// Auth
/// =============================

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

async fn require_bearer(State(state): State<ApiState>, request: Request, next: Next) -> Response {
    let authorized = bearer_token(&request).is_some_and(|token| token == state.config.api_key);
    if authorized {
        return next.run(request).await;
    }

    let err = GatewayError::Unauthorized("missing or invalid bearer token".to_string());
    warn!(path = %request.uri().path(), "Rejected unauthenticated request");
    (StatusCode::UNAUTHORIZED, Json(ApiResponse::error(err.to_string()))).into_response()
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Gateway Endpoint
/// =============================

async fn gateway_handler(
    State(state): State<ApiState>,
    Path(route): Path<String>,
    Json(req): Json<GatewayRequest>,
) -> Response {
    let route = format!("/v1/{}", route);
    info!(%route, demo_modes = ?req.demo_modes, "Gateway request");

    let reply = state.gateway.respond(&route, &req, chrono::Utc::now());

    if let Some(latency) = reply.simulated_latency {
        if state.config.simulate_latency {
            tokio::time::sleep(latency).await;
        }
    }

    match reply.outcome {
        GatewayOutcome::Completed(response) => (StatusCode::OK, Json(response)).into_response(),
        GatewayOutcome::RateLimited(err) => (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, err.retry_after.to_string())],
            Json(err),
        )
            .into_response(),
    }
}

/// =============================
/// Tool Endpoints
/// =============================

async fn list_tools(State(state): State<ApiState>) -> Json<ApiResponse> {
    let tools: Vec<serde_json::Value> = state
        .registry
        .list()
        .into_iter()
        .filter_map(|name| state.registry.get(name))
        .map(|tool| {
            serde_json::json!({
                "name": tool.name(),
                "description": tool.description(),
            })
        })
        .collect();

    Json(ApiResponse::success(tools))
}

async fn invoke_tool(
    State(state): State<ApiState>,
    Path(name): Path<String>,
    Json(parameters): Json<serde_json::Value>,
) -> (StatusCode, Json<ApiResponse>) {
    let input = ToolInput {
        tool_name: name,
        parameters,
    };

    match state.registry.execute(&input).await {
        Ok(output) if output.success => (StatusCode::OK, Json(ApiResponse::success(output.data))),
        Ok(output) => (
            StatusCode::OK,
            Json(ApiResponse::soft_error(output.data, output.error)),
        ),
        Err(e) => {
            let status = match e {
                GatewayError::ToolNotFound(_) => StatusCode::NOT_FOUND,
                GatewayError::InvalidArgument(_) | GatewayError::InvalidToolInput(_) => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(ApiResponse::error(e.to_string())))
        }
    }
}

/// =============================
/// Agent Endpoints
/// =============================

async fn list_agents() -> Json<ApiResponse> {
    Json(ApiResponse::success(agents::all_agents()))
}

async fn route_query(
    State(state): State<ApiState>,
    Json(req): Json<RouteRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    if req.query.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error("Query must not be empty".into())),
        );
    }

    let decision = QueryRouter::classify(&req.query);
    let agent = agents::agent_for(decision.category);
    info!(category = %decision.category, agent = agent.name, "Routed query");

    (
        StatusCode::OK,
        Json(ApiResponse::success(serde_json::json!({
            "category": decision.category,
            "score": decision.score,
            "agent": agent.name,
            "route": agents::gateway_route(decision.category, req.deployment),
            "tools": agent.local_tools(&state.registry),
        }))),
    )
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    let protected = Router::new()
        .route("/v1/:route", post(gateway_handler))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/:name", post(invoke_tool))
        .route("/api/agents", get(list_agents))
        .route("/api/route", post(route_query))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(health))
        .merge(protected)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(config: GatewayConfig) -> crate::Result<()> {
    let port = config.port;
    let router = create_router(ApiState::from_config(config));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("Gateway listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request as HttpRequest};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const KEY: &str = "test-key";

    fn test_router() -> Router {
        create_router(ApiState::from_config(GatewayConfig {
            port: 0,
            api_key: KEY.to_string(),
            mock_seed: Some(1234),
            simulate_latency: false,
        }))
    }

    fn post_json(uri: &str, body: Value, token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let response = test_router()
            .oneshot(HttpRequest::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_gateway_requires_bearer_token() {
        let app = test_router();
        let body = json!({ "prompt": "What is compound interest?", "demo_modes": [] });

        let response = app
            .clone()
            .oneshot(post_json("/v1/general", body.clone(), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(post_json("/v1/general", body.clone(), Some("wrong")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(post_json("/v1/general", body, Some(KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["model"], "gemini-1.5-pro");
        assert_eq!(json["provider"], "google");
        assert_eq!(json["usage"]["input_tokens"], 6);
        assert!(json["response"].is_string());
        assert!(json["request_id"].as_str().unwrap().starts_with("req_"));
    }

    #[tokio::test]
    async fn test_local_route_with_custom_model() {
        let response = test_router()
            .oneshot(post_json(
                "/v1/loan-local",
                json!({
                    "prompt": "Should I refinance?",
                    "demo_modes": ["Latency Metrics", "Token Usage"],
                    "model": "phi-2"
                }),
                Some(KEY),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["model"], "phi-2");
        assert_eq!(json["provider"], "ollama");
    }

    #[tokio::test]
    async fn test_tool_invocation() {
        let response = test_router()
            .oneshot(post_json(
                "/api/tools/calculate_loan_payment",
                json!({
                    "principal": 12000.0,
                    "annual_interest_rate": 0.0,
                    "loan_term_years": 1,
                    "payment_frequency": "monthly"
                }),
                Some(KEY),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["payment_amount"], json!(1000.0));
    }

    #[tokio::test]
    async fn test_tool_hard_and_soft_failures() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/tools/calculate_loan_payment",
                json!({
                    "principal": 1000.0,
                    "annual_interest_rate": 5.0,
                    "loan_term_years": 1,
                    "payment_frequency": "daily"
                }),
                Some(KEY),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Payment frequency"));

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/tools/get_exchange_rate",
                json!({ "from_currency": "USD", "to_currency": "XYZ", "amount": 1.0 }),
                Some(KEY),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["error"], true);

        let response = app
            .oneshot(post_json("/api/tools/google_search", json!({}), Some(KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_route_query() {
        let response = test_router()
            .oneshot(post_json(
                "/api/route",
                json!({ "query": "What is my monthly mortgage payment?", "deployment": "local" }),
                Some(KEY),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["category"], "loan");
        assert_eq!(json["data"]["agent"], "loan_specialist");
        assert_eq!(json["data"]["route"], "/v1/loan-local");
    }

    #[tokio::test]
    async fn test_list_tools_and_agents() {
        let app = test_router();

        let request = HttpRequest::builder()
            .uri("/api/tools")
            .header(header::AUTHORIZATION, format!("Bearer {}", KEY))
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.clone().oneshot(request).await.unwrap()).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 5);
        assert_eq!(json["data"][0]["name"], "calculate_investment_returns");

        let request = HttpRequest::builder()
            .uri("/api/agents")
            .header(header::AUTHORIZATION, format!("Bearer {}", KEY))
            .body(Body::empty())
            .unwrap();
        let json = body_json(app.oneshot(request).await.unwrap()).await;
        assert_eq!(json["data"][1]["name"], "loan_specialist");
    }
}
