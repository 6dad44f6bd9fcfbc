//! Test Harness Module
//!
//! Starts a real post-service on an ephemeral port, backed by a JSON file in a temp
//! directory, and hands out sync clients pointed at it.

use actix_web::dev::ServerHandle;
use actix_web::{web, App, HttpServer};
use post_client::{ClientConfig, HttpPostsApi, PostsApi, SyncClient};
use post_service::config::CorsConfig;
use post_service::db::JsonFileStore;
use post_service::handlers;
use post_service::services::PostCollection;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test Environment
pub struct TestEnvironment {
    pub api_url: String,
    pub store_path: PathBuf,
    handle: ServerHandle,
    _dir: TempDir,
}

impl TestEnvironment {
    /// Start a service over a fresh, empty store.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store_path = dir.path().join("posts.json");
        Self::start(dir, store_path)
    }

    /// Start another service over an existing store file, e.g. to simulate a restart.
    pub async fn restart(self) -> Self {
        self.handle.stop(true).await;
        let store_path = self.store_path.clone();
        Self::start(self._dir, store_path)
    }

    fn start(dir: TempDir, store_path: PathBuf) -> Self {
        let store = Arc::new(JsonFileStore::new(&store_path));
        let collection = web::Data::new(PostCollection::new(store));
        let cors = CorsConfig {
            allowed_origins: "*".to_string(),
        };

        let server = HttpServer::new(move || {
            App::new()
                .app_data(collection.clone())
                .wrap(handlers::cors_policy(&cors))
                .configure(handlers::configure)
        })
        .workers(1)
        .disable_signals()
        .shutdown_timeout(1)
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind test server");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            api_url: format!("http://{addr}"),
            store_path,
            handle,
            _dir: dir,
        }
    }

    pub fn api(&self) -> HttpPostsApi {
        HttpPostsApi::new(ClientConfig::new(&self.api_url))
    }

    pub fn client(&self) -> SyncClient {
        let api: Arc<dyn PostsApi> = Arc::new(self.api());
        SyncClient::new(api)
    }

    pub async fn cleanup(self) {
        self.handle.stop(true).await;
    }
}
