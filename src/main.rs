mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::database::{MongoDB, UnavailableStore, UserStore};
use crate::utils::AppError;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Configuration (.env + environment, defaults = legacy hard-coded values)
    let config = config::AppConfig::from_env()?;

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    log::info!("🚀 Starting Register Service...");
    log::info!("📊 Database: {}", config.database_url);

    let store = connect_store(&config).await?;
    let store_data: web::Data<dyn UserStore> = web::Data::from(store);

    let assets = api::AssetPaths {
        index_file: config.index_file.clone(),
        static_dir: config.static_dir.clone(),
    };

    let bind_address = config.bind_address();
    log::info!("🌐 Server running on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);

    // Start HTTP server
    HttpServer::new(move || {
        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(|cfg| api::configure(cfg, &assets))
    })
    .bind(bind_address)?
    .run()
    .await
}

/// Connects to MongoDB. Failures are logged; they only abort startup when
/// `DB_FAIL_FAST` is set, otherwise requests fail one by one at the point of use.
async fn connect_store(config: &config::AppConfig) -> Result<Arc<dyn UserStore>, AppError> {
    let db = match MongoDB::new(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            log::error!("❌ MongoDB connection error: {}", e);
            if config.db_fail_fast {
                return Err(e);
            }
            log::warn!("⚠️  Serving without a database, registrations will fail");
            return Ok(Arc::new(UnavailableStore::new(e.to_string())));
        }
    };

    match db.ping().await {
        // O ping também cria os índices (uma vez só)
        Ok(()) => log::info!("✅ MongoDB connected"),
        Err(e) => {
            log::error!("❌ MongoDB connection error: {}", e);
            if config.db_fail_fast {
                return Err(e);
            }
        }
    }

    Ok(Arc::new(db))
}
