use actix_web::cookie::Key;
use actix_web::{web, App, HttpResponse, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use anyhow::{Context, Result};
use board_service::{db, handlers, Config};
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_check(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "board-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "board-service"
        })),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Local runs read .env; deployed environments pass real variables.
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🔧 Starting board-service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::from_env()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to load configuration")?;
    info!(
        "✅ Configuration loaded: env={}, host={}, port={}",
        config.app.env, config.app.host, config.app.port
    );

    // Initialize database connection pool
    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;
    info!("✅ Connected to database");

    // Flash notices travel in a signed one-shot cookie
    let signing_key = Key::from(&config.secret_key);
    let message_store = CookieMessageStore::builder(signing_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    info!("✅ Flash notice framework initialized");

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!("🚀 Starting HTTP server at http://{}", bind_address);

    let config_data = web::Data::new(config.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(config_data.clone())
            .wrap(message_framework.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_check))
            // Board pages
            .route("/", web::get().to(handlers::index))
            .route("/create/", web::get().to(handlers::create_form))
            .route("/create/", web::post().to(handlers::create_post))
            .route(
                "/post/comment/{post_id}",
                web::post().to(handlers::add_comment),
            )
            .route("/post/like/{post_id}", web::post().to(handlers::like_post))
            .route("/post/{post_id}", web::get().to(handlers::view_post))
            .route("/edit/{post_id}", web::get().to(handlers::edit_form))
            .route("/edit/{post_id}", web::post().to(handlers::edit_post))
            .route("/delete/{post_id}", web::post().to(handlers::delete_post))
            // FMS pages
            .route("/fms/result", web::get().to(handlers::fms_result))
            .route("/fms/analytics", web::get().to(handlers::fms_analytics))
            .route("/fms/map", web::get().to(handlers::fms_map))
    })
    .bind(&bind_address)
    .context("Failed to bind HTTP server")?
    .workers(4)
    .run()
    .await
    .context("HTTP server error")?;

    info!("🛑 board-service shutting down");
    Ok(())
}
