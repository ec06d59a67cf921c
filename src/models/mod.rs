/// # Health Status Response
///
/// Represents the operational status of the service with a timestamp.
///
/// ## Example JSON
/// ```json
/// {
///   "status": "UP",
///   "version": "0.1.0",
///   "timestamp": "2024-03-10T15:30:45.123456789Z"
/// }
/// ```
pub mod health;

/// Request payload for email validation.
pub mod email;

pub use email::EmailRequest;
pub use health::HealthResponse;
