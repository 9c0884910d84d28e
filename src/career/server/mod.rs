// SPDX-License-Identifier: MIT

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::career::render::{render_reply, run_and_render};
use crate::career::workflow::{Pipeline, WorkflowInput};

pub fn router(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/workflow", post(run_workflow))
        .route("/api/chat", post(chat))
        .with_state(pipeline)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve until Ctrl-C
pub async fn serve(
    pipeline: Arc<Pipeline>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    serve_until(pipeline, port, ctrl_c()).await
}

/// Serve until `shutdown` resolves, letting in-flight requests finish
pub async fn serve_until<F>(
    pipeline: Arc<Pipeline>,
    port: u16,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(pipeline);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    log::info!("Server stopped");
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn run_workflow(
    State(pipeline): State<Arc<Pipeline>>,
    Json(payload): Json<WorkflowInput>,
) -> (StatusCode, Json<Value>) {
    log::info!("Workflow request: {}", payload.user_text);
    match pipeline.invoke(payload).await {
        Ok(state) => (
            StatusCode::OK,
            Json(json!({
                "status": "completed",
                "reply": render_reply(&state),
                "state": state.to_json(),
            })),
        ),
        Err(e) => {
            log::error!("Workflow request failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Error running workflow: {}", e) })),
            )
        }
    }
}

#[derive(Deserialize)]
struct ChatRequest {
    message: String,
}

// The chat surface uses the message as its own follow-up question
async fn chat(
    State(pipeline): State<Arc<Pipeline>>,
    Json(payload): Json<ChatRequest>,
) -> Json<Value> {
    let input = WorkflowInput {
        user_text: payload.message.clone(),
        followup_question: payload.message,
    };
    Json(json!({ "reply": run_and_render(&pipeline, input).await }))
}
