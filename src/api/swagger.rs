use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Incubator Service API",
        version = "1.0.0",
        description = "Back-office API for the startup incubator: public form intake, events, mentors and startups catalog, mentor-request approval pipeline, token-gated email actions, and admin tooling.\n\n**Authentication:** Portal and admin endpoints require a JWT Bearer token; `/api/cleanup-tokens` uses a shared cron secret instead.",
        contact(
            name = "Incubator Platform Team",
            email = "platform@incubator.example"
        )
    ),
    paths(
        // Auth endpoints
        crate::api::auth::login,
        crate::api::auth::register,
        crate::api::auth::verify_token,
        crate::api::auth::get_me,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,

        // Public intake
        crate::api::submissions::create_submission,

        // Token-gated mentor actions
        crate::api::mentor_actions::act_on_token,
        crate::api::mentor_actions::cleanup_tokens,

        // Admin tooling
        crate::api::admin::delete_auth_user,
        crate::api::admin::migrate_mentors,
    ),
    components(
        schemas(
            // Auth
            crate::services::auth_service::LoginRequest,
            crate::services::auth_service::RegisterRequest,
            crate::services::auth_service::AuthResponse,
            crate::services::auth_service::UserInfo,

            // Health & Metrics
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,

            // Intake & workflow
            crate::models::ContactSubmissionRequest,
            crate::models::CreateMentorRequestBody,
            crate::models::RequestStatus,
            crate::models::TokenAction,
            crate::api::mentor_actions::ActBody,
            crate::api::admin::DeleteAuthUserRequest,
        )
    ),
    tags(
        (name = "Auth", description = "Authentication and session endpoints for the user, mentor and admin portals."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
        (name = "Submissions", description = "Public applicant form intake with fixed-enumeration validation."),
        (name = "MentorActions", description = "Single-use emailed action tokens and their cron cleanup."),
        (name = "Admin", description = "Administrative tooling: user deletion, mentor schema migration, spreadsheet import."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build(),
                ),
            );
        }
    }
}
