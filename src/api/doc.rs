use utoipa::OpenApi;

pub const SURVEY_TAG: &str = "Survey";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Survey Notify",
        description = "Sends customer feedback survey invitations over WhatsApp",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::FieldError,
        )
    ),
    tags(
        (name = SURVEY_TAG, description = "Survey invitation endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
