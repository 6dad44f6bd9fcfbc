use actix_web::{web, App, HttpServer};
use post_service::config::LogFormat;
use post_service::db::JsonFileStore;
use post_service::handlers;
use post_service::services::PostCollection;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

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

/// Post Service
///
/// Serves the ordered post collection over HTTP + JSON.
///
/// # Routes
///
/// - `GET|POST|PUT /posts` - list, create, reorder (full replacement)
/// - `GET|PUT|DELETE /posts/{id}` - read, update, delete one post
/// - `/health`, `/health/ready`, `/metrics`
///
/// # Deployment
///
/// Listens on port 8080 by default (POST_SERVICE_PORT) and keeps the collection in the
/// JSON file named by POST_STORE_PATH.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match post_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log.format);

    tracing::info!("Starting post-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let store = Arc::new(JsonFileStore::new(&config.store.path));
    let collection = web::Data::new(PostCollection::new(store));

    match collection.check_ready().await {
        Ok(count) => tracing::info!(
            store = %collection.store_location(),
            posts = count,
            "Post store opened"
        ),
        Err(e) => {
            tracing::error!(store = %collection.store_location(), "Post store unreadable: {}", e);
            return Err(anyhow::anyhow!("post store unreadable: {e}"));
        }
    }

    let bind_address = config.bind_address();
    let cors_config = config.cors.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(collection.clone())
            .wrap(handlers::cors_policy(&cors_config))
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .workers(config.app.workers)
    .disable_signals()
    .bind(&bind_address)?
    .run();

    tracing::info!("Server running on http://{}", bind_address);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(Ok(())) => tracing::info!("HTTP server stopped"),
                Ok(Err(e)) => {
                    tracing::error!("HTTP server error: {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    tracing::error!("HTTP server task join error: {}", e);
                    return Err(io::Error::other(e.to_string()).into());
                }
            }
        }
        _ = &mut shutdown => {
            tracing::info!("Shutdown signal received");
            server_handle.stop(true).await;
        }
    }

    tracing::info!("post-service shutting down");
    Ok(())
}
