use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use credito::config::Config;
use credito::middleware::RequestId;
use credito::modules::credits::repositories::{CreditRepository, SqlCreditRepository};
use credito::modules::credits::services::CreditService;
use credito::modules::customers::repositories::{CustomerRepository, SqlCustomerRepository};
use credito::modules::customers::services::CustomerService;
use credito::modules::{credits, customers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credito=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting Credito credit application backend");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    // Wire repositories and services
    let customer_repo: Arc<dyn CustomerRepository> =
        Arc::new(SqlCustomerRepository::new(db_pool.clone()));
    let credit_repo: Arc<dyn CreditRepository> = Arc::new(SqlCreditRepository::new(db_pool));

    let customer_service = Arc::new(CustomerService::new(customer_repo.clone()));
    let credit_service = Arc::new(CreditService::new(credit_repo, customer_repo));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .app_data(web::Data::new(customer_service.clone()))
            .app_data(web::Data::new(credit_service.clone()))
            .service(
                web::scope("/api")
                    .configure(customers::controllers::configure)
                    .configure(credits::controllers::configure),
            )
            .route("/health", web::get().to(health_check))
            .route("/", web::get().to(index))
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "credito"
    }))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "Credito credit application backend",
        "version": "0.1.0",
        "status": "running"
    }))
}
