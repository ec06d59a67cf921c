use actix_web::web;

/// # Health Check Endpoint
///
/// Returns the current health status of the service along with a timestamp.
///
/// ## Response
///
/// - **200 OK**: Service is healthy
///   - Body: JSON object with `status` ("UP"), `version` and `timestamp` in ISO 8601 format
pub mod health;

/// # Email Validation Endpoint
///
/// Validates an email address through three checks, in order:
/// 1. Syntax (structural pattern, extracts the domain)
/// 2. MX records for the domain
/// 3. TCP reachability of port 25 on the MX hosts
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `email` field
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
pub mod email;


/// # Route Configuration
///
/// ## Mounted Services
/// - Health check endpoints (see [`health::configure_routes`] for details)
/// - Email validation endpoints (see [`email::configure_routes`] for details)
///
/// ## Endpoints
///
/// ```text
/// GET /health - Service health status
/// POST /email/validate - Email validation endpoint
/// ```
///
/// [`health::configure_routes`]: crate::routes::health::configure_routes
/// [`email::configure_routes`]: crate::routes::email::configure_routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(email::configure_routes);
}
