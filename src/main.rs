use actix_web::{App, HttpServer, web::Data};
use email_validator::config::Config;
use email_validator::openapi::ApiDoc;
use email_validator::telemetry::init_tracing;
use email_validator::validation::pipeline::Pipeline;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Email Validator Service Entry Point
///
/// Configures and launches the Actix-web HTTP server with:
/// - `POST /email/validate` backed by a single shared validation pipeline
/// - Swagger UI for API documentation
/// - Environment configuration via `.env` file
///
/// # Endpoints
/// - Validation: `/email/validate`
/// - Health: `/health`
/// - Swagger UI: `/swagger-ui/`
/// - OpenAPI spec: `/api-docs/openapi.json`
///
/// # Configuration
/// - `PORT` is required; the process exits if it is missing or malformed
/// - See [`Config`] for the optional variables
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.json_logs);

    let pipeline = match Pipeline::with_network(config.dns_timeout, config.smtp_connect_timeout) {
        Ok(pipeline) => Data::new(pipeline),
        Err(e) => {
            tracing::error!(error = %e, "cannot compile email pattern");
            std::process::exit(1);
        }
    };

    tracing::info!(
        address = %config.bind_address,
        port = config.port,
        "starting email validator"
    );

    HttpServer::new(move || {
        let openapi = ApiDoc::openapi();

        App::new()
            .app_data(pipeline.clone())
            .configure(email_validator::routes::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
