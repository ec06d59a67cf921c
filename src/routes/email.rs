use crate::models::EmailRequest;
use crate::validation::ValidationReport;
use crate::validation::pipeline::Pipeline;
use actix_web::error::PayloadError;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, post, web};
use futures::StreamExt;
use thiserror::Error;

/// Upper bound on the request body.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

pub const MISSING_EMAIL: &str = "Mandatory parameter 'email' missing";

#[derive(Debug, Error)]
enum BodyError {
    #[error("Request body exceeds {MAX_BODY_SIZE} bytes")]
    TooLarge,
    #[error("Cannot read request body: {0}")]
    Read(#[from] PayloadError),
}

/// # Email Validation Endpoint
///
/// Runs the syntax, MX and SMTP reachability checks on the address, stopping
/// at the first failing one.
///
/// ## Request
/// - Method: POST
/// - Body: JSON object with `email` field
///
/// ## Responses
/// - **200 OK**: Validation ran; `valid` tells whether the address passed.
///   Only the stages that ran appear under `validators`.
/// - **400 Bad Request**: Malformed JSON or missing `email` (plain text)
/// - **413 Payload Too Large**: Body over 64 KiB (plain text)
/// - **500 Internal Server Error**: Body could not be read or the report could
///   not be serialized (plain text)
///
/// ## Example Request
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// ## Example Response
/// ```json
/// {
///   "valid": false,
///   "validators": {
///     "syntax": { "valid": true },
///     "mx": { "valid": false, "reason": "No MX records for the domain" }
///   }
/// }
/// ```
#[utoipa::path(
    post,
    path = "/email/validate",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Validation report", body = ValidationReport),
        (status = 400, description = "Malformed request", body = String, content_type = "text/plain"),
        (status = 413, description = "Request body too large", body = String, content_type = "text/plain"),
        (status = 500, description = "Server error", body = String, content_type = "text/plain")
    ),
    tag = "Email Validation"
)]
#[post("/email/validate")]
pub async fn validate_email(mut payload: web::Payload, pipeline: web::Data<Pipeline>) -> HttpResponse {
    let body = match read_body(&mut payload).await {
        Ok(body) => body,
        Err(e @ BodyError::TooLarge) => {
            return plain_text(HttpResponse::PayloadTooLarge(), e.to_string());
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to read request body");
            return plain_text(HttpResponse::InternalServerError(), e.to_string());
        }
    };

    let request = match EmailRequest::from_json(&body) {
        Ok(request) => request,
        Err(e) => {
            return plain_text(
                HttpResponse::BadRequest(),
                format!("Cannot unmarshal JSON: {e}"),
            );
        }
    };

    if request.email.is_empty() {
        return plain_text(HttpResponse::BadRequest(), MISSING_EMAIL);
    }

    let report = pipeline.validate(&request.email).await;
    tracing::info!(
        valid = report.valid,
        stages = report.checks().len(),
        "email validated"
    );

    match serde_json::to_vec(&report) {
        Ok(output) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(output),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize validation report");
            plain_text(
                HttpResponse::InternalServerError(),
                format!("Cannot format response: {e}"),
            )
        }
    }
}

async fn read_body(payload: &mut web::Payload) -> Result<web::BytesMut, BodyError> {
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk?;
        if body.len() + chunk.len() > MAX_BODY_SIZE {
            return Err(BodyError::TooLarge);
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

fn plain_text(
    mut builder: actix_web::HttpResponseBuilder,
    message: impl Into<String>,
) -> HttpResponse {
    builder
        .content_type(ContentType::plaintext())
        .body(message.into())
}

/// Configures email validation routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(validate_email);
}
