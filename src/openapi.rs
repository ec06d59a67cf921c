use utoipa::OpenApi;

/// OpenAPI Specification Documentation
///
/// Generated at compile time from the `utoipa::path` annotations on the
/// route handlers.
///
/// # Endpoints
/// - Health Check: `GET /health`
/// - Email Validation: `POST /email/validate`
///
/// # Schemas
/// - `HealthResponse`: Service status payload
/// - `EmailRequest`: Email validation input structure
/// - `ValidationReport`, `CheckOutcome`: Validation result payload
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::email::validate_email,
    ),
    components(
        schemas(
            crate::models::health::HealthResponse,
            crate::models::email::EmailRequest,
            crate::validation::ValidationReport,
            crate::validation::CheckOutcome
        )
    ),
    tags(
        (name = "Health Check", description = "Service health monitoring endpoints"),
        (name = "Email Validation", description = "Email address validation endpoints")
    ),
    info(
        description = "Validates email addresses by syntax, MX records and SMTP port reachability",
        title = "Email Validator API",
        version = "0.1.0",
    )
)]
pub struct ApiDoc;
