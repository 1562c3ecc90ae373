use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Register Service API",
        version = "1.0.0",
        description = "User sign-up form backed by MongoDB.\n\n`POST /register` takes a form-encoded body and always answers HTTP 200 with a plain-text message; the message, not the status code, carries the outcome."
    ),
    paths(
        // Registration
        crate::api::register::register,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::RegisterForm,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Registration", description = "User sign-up. No validation, no password hashing."),
        (name = "Health", description = "Health check and counters for monitoring service status."),
    )
)]
pub struct ApiDoc;
