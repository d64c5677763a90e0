//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Json},
};
use calmind_core::{domain::Interaction, ports::PortError, sentiment};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};

/// Returned with a 400 when the request carries no text.
pub const EMPTY_INPUT_MESSAGE: &str = "Please provide some text input.";
/// Returned when no AI credential was configured at startup.
pub const AI_UNAVAILABLE_MESSAGE: &str =
    "The AI service is unavailable due to a missing or invalid API key.";
/// Returned when the configured AI service fails mid-call.
pub const AI_FAILED_MESSAGE: &str =
    "Sorry, the AI service encountered an error while generating a reply.";

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        calmind_handler,
    ),
    components(
        schemas(CalmindRequest, CalmindResponse, PromptResponse)
    ),
    tags(
        (name = "Calmind API", description = "API endpoints for the supportive chat backend.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The request payload for the chat endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CalmindRequest {
    /// The user's free-text input. Missing and empty are treated alike.
    #[serde(default)]
    pub text: Option<String>,
}

/// The response payload for a handled chat request.
#[derive(Debug, Serialize, ToSchema)]
pub struct CalmindResponse {
    pub response: String,
    pub emotion: String,
    pub raw_text: String,
}

/// The response payload when the input was missing or empty.
#[derive(Debug, Serialize, ToSchema)]
pub struct PromptResponse {
    pub response: String,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// Serves the static chat frontend.
pub async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// Main API endpoint for the frontend to send user input.
///
/// Classifies the text's sentiment, generates a supportive reply, persists
/// the interaction to both sinks, and returns the reply. Sink failures are
/// logged and never alter the response.
#[utoipa::path(
    post,
    path = "/api/calmind",
    request_body = CalmindRequest,
    responses(
        (status = 200, description = "Reply generated", body = CalmindResponse),
        (status = 400, description = "Missing or empty text input", body = PromptResponse)
    )
)]
pub async fn calmind_handler(
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CalmindRequest>,
) -> Result<Json<CalmindResponse>, (StatusCode, Json<PromptResponse>)> {
    // 1. Validate.
    let text = payload.text.unwrap_or_default();
    if text.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(PromptResponse {
                response: EMPTY_INPUT_MESSAGE.to_string(),
            }),
        ));
    }

    // 2. Classify the emotion.
    let emotion = sentiment::classify(&text);

    // 3. Generate the reply, degrading to a fixed message on failure.
    let reply = match app_state.reply.generate_reply(emotion, &text).await {
        Ok(reply) => reply,
        Err(PortError::Unconfigured(_)) => AI_UNAVAILABLE_MESSAGE.to_string(),
        Err(e) => {
            error!("Reply generation failed: {:?}", e);
            AI_FAILED_MESSAGE.to_string()
        }
    };

    // 4. Persist to both sinks. Each failure is independent and non-fatal.
    let interaction = Interaction::new(text.clone(), emotion);
    if let Err(e) = app_state.journal.append(&interaction).await {
        error!("Failed to append interaction to the mood log: {:?}", e);
    }
    if let Err(e) = app_state.store.save_interaction(&interaction).await {
        error!("Failed to save interaction to the database: {:?}", e);
    }

    // 5. Respond.
    Ok(Json(CalmindResponse {
        response: reply,
        emotion: emotion.as_str().to_string(),
        raw_text: text,
    }))
}
