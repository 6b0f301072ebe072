use super::{AppState, ChatBody};
use crate::client::AuthToken;
use crate::commands::dispatch;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json},
};

/// GET /health — always public (no secrets leaked)
pub(super) async fn handle_health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "service": "taskbridge"}))
}

/// POST /chat — one utterance in, one reply out.
///
/// A missing or malformed Authorization header still reaches the core with
/// an empty credential; the client rejects it before any network call and
/// the handler maps that outcome to 401.
pub(super) async fn handle_chat(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: Result<Json<ChatBody>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let auth = AuthToken::from_bearer_header(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok()),
    );

    let Json(chat) = match body {
        Ok(b) => b,
        Err(e) => {
            let err = serde_json::json!({
                "error": format!("Invalid JSON: {e}. Expected: {{\"message\": \"...\"}}")
            });
            return (StatusCode::BAD_REQUEST, Json(err));
        }
    };

    let reply = dispatch(state.api.as_ref(), &auth, &chat.message).await;
    tracing::info!(succeeded = reply.succeeded, "chat command handled");

    let status = if auth.is_empty() && !reply.succeeded {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::OK
    };

    let message = match &state.presenter {
        Some(presenter) if reply.succeeded => {
            match presenter.present(&chat.message, &reply.message).await {
                Ok(rephrased) => rephrased,
                Err(e) => {
                    tracing::warn!("presenter failed, using deterministic reply: {e:#}");
                    reply.message
                }
            }
        }
        _ => reply.message,
    };

    (status, Json(serde_json::json!({"response": message})))
}
