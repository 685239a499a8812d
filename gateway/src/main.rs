use std::sync::Arc;

use actix_web::{middleware as actix_middleware, web, App, HttpServer};

use gateway::auth::SecretValidator;
use gateway::config::GatewayConfig;
use gateway::db::{DocumentStore, MongoStore};
use gateway::handlers;
use gateway::middleware::BodyLimit;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if it exists (for development)
    // Try loading from current directory first, then from gateway/ directory
    if dotenvy::dotenv().is_err() {
        dotenvy::from_filename("gateway/.env").ok();
    }

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    log::info!("Starting document gateway...");

    let config = GatewayConfig::from_env().unwrap_or_else(|e| {
        log::error!("Failed to load configuration: {}", e);
        eprintln!("Hint: set MONGODB_CONNECTION_URL, DATABASE_NAME, COLLECTION_NAME and CODELIB_SECRET_KEY");
        std::process::exit(1);
    });

    log::info!(
        "Serving collection '{}' of database '{}'",
        config.collection_name,
        config.database_name
    );

    // Connection is established on the first request and reused afterwards
    let store: Arc<dyn DocumentStore> = Arc::new(MongoStore::new(&config));
    let store = web::Data::from(store);
    let validator = web::Data::new(SecretValidator::new(config.secret_key.clone()));
    let body_limit = web::Data::new(BodyLimit(config.max_payload_bytes));

    log::info!(
        "Starting HTTP server at {}:{}...",
        config.server_host,
        config.server_port
    );

    HttpServer::new(move || {
        App::new()
            // Shared state
            .app_data(store.clone())
            .app_data(validator.clone())
            .app_data(body_limit.clone())
            // Middleware
            .wrap(actix_middleware::Logger::default())
            .wrap(actix_middleware::Compress::default())
            .configure(handlers::configure)
            .default_service(web::to(handlers::route_not_found))
    })
    .bind((config.server_host.clone(), config.server_port))?
    .run()
    .await
}
