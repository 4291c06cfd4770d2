//! Survey trigger handler.

use axum::{Json, extract::State};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::SURVEY_TAG;
use crate::api::dto::{ErrorResponse, TriggerSurveyRequest, TriggerSurveyResponse};
use crate::error::AppResult;
use crate::models::TriggerRequest;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the survey routes
///
/// # Routes
/// - `POST /trigger-survey` - Send the survey invitation over WhatsApp
pub fn survey_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(trigger_survey))
}

/// POST /trigger-survey - Send a survey invitation
///
/// Sends one WhatsApp message inviting the customer to the feedback survey.
/// Provider failures are retried up to three times before giving up.
#[utoipa::path(
    post,
    path = "/trigger-survey",
    tag = SURVEY_TAG,
    request_body = TriggerSurveyRequest,
    responses(
        (status = 200, description = "Message accepted by the provider", body = TriggerSurveyResponse),
        (status = 422, description = "Missing, empty or malformed fields", body = ErrorResponse),
        (status = 500, description = "All message attempts failed or an unexpected error occurred", body = ErrorResponse)
    )
)]
async fn trigger_survey(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TriggerSurveyRequest>,
) -> AppResult<Json<TriggerSurveyResponse>> {
    let request: TriggerRequest = payload.into();
    let result = state.services.survey.trigger(&request).await?;
    Ok(Json(result.into()))
}
