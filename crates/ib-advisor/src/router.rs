use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::notification::{DispatchError, EmailDispatcher};
use crate::recommendation::AnswerSet;
use crate::service::{AdvisorService, AdvisorServiceError, SendResultsRequest};

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    #[serde(default)]
    answers: AnswerSet,
}

/// Router exposing the questionnaire API under `/api`.
pub fn advisor_router<D>(service: Arc<AdvisorService<D>>) -> Router
where
    D: EmailDispatcher + 'static,
{
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/recommendation", post(recommendation_handler::<D>))
        .route("/api/sendEmail", post(send_email_handler::<D>))
        .with_state(service)
}

pub(crate) async fn health_handler() -> Response {
    let payload = json!({
        "status": "OK",
        "message": "Server is running!",
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn recommendation_handler<D>(
    State(service): State<Arc<AdvisorService<D>>>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Response
where
    D: EmailDispatcher + 'static,
{
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    let (recommendation, scores) = service.recommend(&request.answers);
    let payload = json!({
        "recommendation": recommendation,
        "scores": scores,
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn send_email_handler<D>(
    State(service): State<Arc<AdvisorService<D>>>,
    payload: Result<Json<SendResultsRequest>, JsonRejection>,
) -> Response
where
    D: EmailDispatcher + 'static,
{
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return invalid_body(rejection),
    };

    match service.email_results(request).await {
        Ok(_) => {
            let payload = json!({
                "success": true,
                "message": "Email sent successfully!",
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(AdvisorServiceError::MissingInput) => {
            let payload = json!({
                "error": "Email and results are required.",
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(AdvisorServiceError::InvalidAddress(_)) => {
            let payload = json!({
                "error": "Invalid email address.",
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(AdvisorServiceError::Dispatch(DispatchError::Rejected { status, details })) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            let payload = json!({
                "error": "Failed to send email via MailerSend",
                "details": details,
            });
            (status, Json(payload)).into_response()
        }
        Err(other) => {
            error!(error = %other, "sendEmail failed");
            let payload = json!({
                "error": "Internal server error",
                "details": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn invalid_body(rejection: JsonRejection) -> Response {
    let payload = json!({
        "error": "Invalid request body.",
        "details": rejection.body_text(),
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}
