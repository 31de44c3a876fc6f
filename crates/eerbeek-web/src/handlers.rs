// SPDX-FileCopyrightText: 2026 ICT Eerbeek Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON request handlers.
//!
//! Handles POST /contact, POST /chat and GET /health.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eerbeek_core::{ContactForm, HealthStatus, ValidationError};
use serde::{Deserialize, Serialize};

use crate::server::WebState;

/// Confirmation shown to the visitor after a stored submission.
pub const CONTACT_ACCEPTED_MESSAGE: &str = "Bericht succesvol verzonden!";

/// Generic message returned when the store fails. Details are only logged.
pub const STORAGE_FAILURE_MESSAGE: &str =
    "Uw bericht kon niet worden opgeslagen. Probeer het later opnieuw.";

/// Response body for POST /contact.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable failure kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Offending form key, when the failure concerns a single field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ContactResponse {
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: Some(CONTACT_ACCEPTED_MESSAGE.to_string()),
            error: None,
            code: None,
            field: None,
        }
    }

    pub fn rejected(err: &ValidationError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(err.to_string()),
            code: Some(err.code().to_string()),
            field: err.field().map(|f| f.key().to_string()),
        }
    }

    pub fn storage_failure() -> Self {
        Self {
            success: false,
            message: None,
            error: Some(STORAGE_FAILURE_MESSAGE.to_string()),
            code: Some("storage_failure".to_string()),
            field: None,
        }
    }
}

/// Request body for POST /chat.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response body for POST /chat.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Storage adapter health.
    pub storage: String,
    pub chat_enabled: bool,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

/// POST /contact
///
/// Parses and validates the form, then appends it to the store. The raw body
/// is taken so malformed JSON maps to `malformed_input` instead of axum's
/// default rejection.
pub async fn post_contact(State(state): State<WebState>, body: Bytes) -> Response {
    let contact = match ContactForm::parse(&body).and_then(ContactForm::validate) {
        Ok(contact) => contact,
        Err(err) => {
            tracing::debug!(code = err.code(), "contact submission rejected");
            return (StatusCode::BAD_REQUEST, Json(ContactResponse::rejected(&err)))
                .into_response();
        }
    };

    match state.storage.insert_contact(contact).await {
        Ok(saved) => {
            tracing::info!(
                id = %saved.id,
                subject = %saved.subject,
                urgency = %saved.urgency,
                "contact submission stored"
            );
            (StatusCode::OK, Json(ContactResponse::accepted())).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to store contact submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::storage_failure()),
            )
                .into_response()
        }
    }
}

/// POST /chat
///
/// Relays one message to the chat adapter and returns its reply.
pub async fn post_chat(State(state): State<WebState>, body: Bytes) -> Response {
    let Some(chat) = state.chat.as_ref() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "chat is not available");
    };

    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            return error_response(StatusCode::BAD_REQUEST, format!("malformed request body: {e}"));
        }
    };
    if request.message.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "message must not be empty");
    }

    match chat.send(&request.message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })).into_response(),
        Err(e) => {
            tracing::warn!(adapter = chat.name(), error = %e, "chat relay failed");
            error_response(StatusCode::BAD_GATEWAY, "chat service failed to respond")
        }
    }
}

/// GET /health
///
/// Unauthenticated liveness and storage check.
pub async fn get_health(State(state): State<WebState>) -> Response {
    let storage = match state.storage.health_check().await {
        Ok(HealthStatus::Healthy) => "healthy".to_string(),
        Ok(HealthStatus::Degraded(reason)) => format!("degraded: {reason}"),
        Ok(HealthStatus::Unhealthy(reason)) => format!("unhealthy: {reason}"),
        Err(e) => format!("unhealthy: {e}"),
    };
    let healthy = storage == "healthy";

    let body = HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        storage,
        chat_enabled: state.chat.is_some(),
    };
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body)).into_response()
}
