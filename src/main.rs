use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use culture_match::config::Settings;
use culture_match::core::CultureScorer;
use culture_match::models::ScoringPolicy;
use culture_match::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use culture_match::services::Enricher;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    match settings.logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.json().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration before logging so the log level can come from it
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    init_logging(&settings);

    info!("Starting culture match service...");

    let enricher = Enricher::from_settings(&settings.enrichment).map_err(|e| {
        error!("Failed to initialize enrichment: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    info!(
        "Enrichment initialized (llm: {}, search: {}, seed: {:?})",
        enricher.llm_enabled(),
        enricher.search_enabled(),
        settings.enrichment.seed
    );

    let policy = ScoringPolicy::from(&settings.scoring);
    let scorer = CultureScorer::new(policy);

    info!("Scorer initialized with policy: {:?}", policy);

    let app_state = AppState {
        enricher: Arc::new(enricher),
        scorer,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
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
