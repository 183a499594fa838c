use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use blog_service::handlers;
use blog_service::middleware::SessionAuthMiddleware;
use blog_service::repository::{BlogRepository, PostgresRepository};
use blog_service::{db, AppState, Config};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Blog Service
///
/// Posts, groups, comments and follows behind page-style routes.
///
/// # Routes
///
/// - `/`, `/group/{slug}/`, `/profile/{username}/`, `/follow/` - paged listings
/// - `/posts/{id}/` - post detail with comments
/// - `/create/`, `/posts/{id}/edit/` - post forms (login required)
/// - `/posts/{id}/comment/`, `/profile/{username}/follow/`,
///   `/profile/{username}/unfollow/` - form actions (login required)
/// - `/health`, `/metrics`, `/admin/cache/clear/` - operations
#[actix_web::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    if config.cache.admin_token.is_none() {
        if config.is_production() {
            tracing::warn!("ADMIN_TOKEN not set; index cache cannot be cleared remotely");
        } else {
            tracing::info!("ADMIN_TOKEN not set; cache clear endpoint disabled");
        }
    }

    let db_pool = match db::create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {:#}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    if config.database.run_migrations {
        db::run_migrations(&db_pool).await.map_err(|e| {
            io::Error::new(
                io::ErrorKind::Other,
                format!("{e:#}"),
            )
        })?;
    } else {
        tracing::info!("Skipping database migrations (DATABASE_RUN_MIGRATIONS=false)");
    }

    let repo: Arc<dyn BlogRepository> = Arc::new(PostgresRepository::new(db_pool));
    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    let jwt_secret = config.auth.jwt_secret.clone();
    let allowed_origins = config.cors.allowed_origins.clone();

    let state = web::Data::new(AppState::new(repo, config));
    tracing::info!(
        ttl_secs = state.page_cache.ttl().as_secs(),
        page_size = state.config.pagination.page_size,
        "Index cache and pagination configured"
    );
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else if !origin.is_empty() {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(SessionAuthMiddleware::new(&jwt_secret))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind(&bind_address)?
    .shutdown_timeout(30)
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping HTTP server");
        handle.stop(true).await;
    });

    server.await?;
    tracing::info!("blog-service stopped");
    Ok(())
}
