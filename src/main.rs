use actix_cors::Cors;
use actix_web::{web, App, HttpServer, HttpResponse, middleware, error, http::StatusCode};
use fit_engine::config::{ExplainerProvider, LogFormat, Settings};
use fit_engine::core::{FitExplainer, Recommender, TemplateExplainer};
use fit_engine::routes::{self, recommendations::AppState};
use fit_engine::services::{CachedExplainer, Catalog, GenerativeExplainer};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

fn init_logging(settings: &Settings) {
    // LOG_LEVEL / LOG_FORMAT win over the config file
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    match LogFormat::parse(&format) {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
        LogFormat::Compact => subscriber.compact().init(),
    }
}

fn build_explainer(settings: &Settings) -> Result<Arc<dyn FitExplainer>, String> {
    let base: Arc<dyn FitExplainer> = match settings.explainer.provider {
        ExplainerProvider::Template => Arc::new(TemplateExplainer),
        ExplainerProvider::Generative => Arc::new(
            GenerativeExplainer::new(
                settings.explainer.endpoint.clone(),
                settings.explainer.api_key.clone(),
                settings.explainer.model.clone(),
                settings.explainer.timeout(),
            )
            .map_err(|e| e.to_string())?,
        ),
    };

    if settings.cache.enabled && settings.explainer.provider == ExplainerProvider::Generative {
        info!(
            "Explanation cache enabled ({} entries, TTL: {}s)",
            settings.cache.max_entries, settings.cache.ttl_secs
        );
        return Ok(Arc::new(CachedExplainer::new(
            base,
            settings.cache.max_entries,
            settings.cache.ttl_secs,
        )));
    }

    Ok(base)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings);
    info!("Starting Fit Engine sizing service...");

    let catalog = match &settings.catalog.path {
        Some(path) => Catalog::from_json_file(path).map_err(|e| {
            error!("Failed to load catalog from {}: {}", path, e);
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?,
        None => Catalog::builtin(),
    };

    info!("Catalog ready with {} brands", catalog.brands().len());

    let explainer = build_explainer(&settings).map_err(|e| {
        error!("Failed to create explainer: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let rules = settings.scoring.rules();
    let recommender = Recommender::new(explainer, rules, settings.explainer.timeout());

    info!(
        "Recommender initialized with {:?} explainer and rules: {:?}",
        settings.explainer.provider, rules
    );

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        recommender,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
