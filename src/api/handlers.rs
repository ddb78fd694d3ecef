use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{AssessmentResult, CollegeSummary, UserAccount};
use crate::services::{accounts, assessments, matcher};
use crate::store::Collection;

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct GeminiRequest {
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub user: UserAccount,
}

const SUCCESS: StatusResponse = StatusResponse { status: "success" };

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Get the full college catalog
pub async fn get_colleges(State(state): State<AppState>) -> Json<Vec<CollegeSummary>> {
    let catalog: Vec<CollegeSummary> = state.store.load(&Collection::Colleges).await;
    Json(catalog)
}

/// Run the recommendation matcher for one user
///
/// A missing assessment is a 404; everything else is reduced to one generic
/// message so internal detail stays out of the response.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<matcher::Recommendations>> {
    if username.trim().is_empty() {
        return Err(AppError::InvalidInput("Username is required".to_string()));
    }

    match matcher::get_recommendations(&state.store, &username).await {
        Ok(recommendations) => Ok(Json(recommendations)),
        Err(e @ AppError::NotFound(_)) => Err(e),
        Err(e) => {
            tracing::error!(username = %username, error = %e, "Recommendation matching failed");
            Err(AppError::Internal(
                "Failed to get recommendations".to_string(),
            ))
        }
    }
}

/// Upsert a user's assessment result
pub async fn save_assessment(
    State(state): State<AppState>,
    Json(result): Json<AssessmentResult>,
) -> AppResult<Json<StatusResponse>> {
    assessments::save(&state.store, result).await?;
    Ok(Json(SUCCESS))
}

/// Check whether a user has a stored assessment
pub async fn check_assessment(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<Value> {
    let taken = assessments::has_taken(&state.store, &username).await;
    Json(json!({ "hasTakenAssessment": taken }))
}

/// Password-based signup
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<Json<StatusResponse>> {
    accounts::signup(&state.store, &request.name, &request.username, &request.password).await?;
    Ok(Json(SUCCESS))
}

/// Password-based login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = accounts::login(&state.store, &request.username, &request.password).await?;
    Ok(Json(LoginResponse {
        status: "success",
        user,
    }))
}

/// Google-keyed signup (no credential stored)
pub async fn google_signup(
    State(state): State<AppState>,
    Json(request): Json<GoogleSignupRequest>,
) -> AppResult<Json<StatusResponse>> {
    accounts::google_signup(
        &state.store,
        &request.name,
        &request.email,
        request.profile_image,
    )
    .await?;
    Ok(Json(SUCCESS))
}

/// Google-keyed login
pub async fn google_login(
    State(state): State<AppState>,
    Json(request): Json<GoogleLoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = accounts::google_login(&state.store, &request.email).await?;
    Ok(Json(LoginResponse {
        status: "success",
        user,
    }))
}

/// Forward a prompt to the generative-AI provider
pub async fn gemini_proxy(
    State(state): State<AppState>,
    Json(request): Json<GeminiRequest>,
) -> AppResult<Json<Value>> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::InvalidInput("Prompt is required".to_string()));
    }

    let text = state.ai.generate(&request.prompt).await?;
    Ok(Json(json!({ "text": text })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockGenerativeProvider;
    use crate::store::{MemoryBackend, Store};
    use std::sync::Arc;

    fn state_with_provider(provider: MockGenerativeProvider) -> AppState {
        AppState::new(
            Store::new(Arc::new(MemoryBackend::default())),
            Arc::new(provider),
        )
    }

    #[tokio::test]
    async fn gemini_proxy_passes_prompt_through() {
        let mut provider = MockGenerativeProvider::new();
        provider
            .expect_generate()
            .withf(|prompt| prompt == "Suggest colleges in Delhi")
            .returning(|_| Ok("Sure.".to_string()));

        let Json(body) = gemini_proxy(
            State(state_with_provider(provider)),
            Json(GeminiRequest {
                prompt: "Suggest colleges in Delhi".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body["text"], "Sure.");
    }

    #[tokio::test]
    async fn gemini_proxy_rejects_blank_prompt() {
        let provider = MockGenerativeProvider::new();

        let err = gemini_proxy(
            State(state_with_provider(provider)),
            Json(GeminiRequest {
                prompt: "   ".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn gemini_proxy_maps_provider_failure_upstream() {
        let mut provider = MockGenerativeProvider::new();
        provider
            .expect_generate()
            .returning(|_| Err(AppError::Upstream("model unavailable".to_string())));

        let err = gemini_proxy(
            State(state_with_provider(provider)),
            Json(GeminiRequest {
                prompt: "Suggest colleges in Delhi".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Upstream(_)));
    }
}
