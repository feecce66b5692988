//! Shared-text content service.
//!
//! Texts are posted once, fetched by id until they expire, and deleted on
//! request. Everything lives in memory; a restart forgets all content.

mod client;
mod config;
mod cors;
mod error;
mod rate_limit;
mod routes;
mod store;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use log::{debug, info};
use tokio::{net::TcpListener, task::JoinHandle};

pub use client::{ContentClient, DEFAULT_API_URL, FetchError};
pub use config::ContentServiceConfig;
pub use cors::CorsPolicy;
pub use error::{ContentError, ErrorResponse};
pub use rate_limit::RateLimiter;
pub use routes::{
    ContentResponse, CreateContentResponse, DeleteContentResponse, parse_content_id,
    source_identifier,
};
pub use store::{ContentStore, StoredContent};

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Wall-clock source in milliseconds since the Unix epoch.
pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| chrono::Utc::now().timestamp_millis().max(0) as u64)
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<ContentServiceConfig>,
    store: Arc<ContentStore>,
    limiter: Arc<RateLimiter>,
    clock: Clock,
}

impl AppState {
    pub fn new(config: ContentServiceConfig) -> Self {
        Self {
            store: Arc::new(ContentStore::new(config.ttl_ms())),
            limiter: Arc::new(RateLimiter::new(
                config.rate_limit_max,
                config.rate_limit_window_ms(),
            )),
            config: Arc::new(config),
            clock: system_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &ContentServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    pub fn now_ms(&self) -> u64 {
        (self.clock)()
    }

    /// Drops expired content and idle rate-limit windows.
    pub fn purge(&self) -> (usize, usize) {
        let now_ms = self.now_ms();
        (
            self.store.purge_expired(now_ms),
            self.limiter.purge_idle(now_ms),
        )
    }
}

pub fn router(state: AppState) -> Router {
    let cors_policy = CorsPolicy::new(state.config().allowed_origin.clone());

    Router::new()
        .route("/health", get(routes::health))
        .route("/api/content", post(routes::create_content))
        .route(
            "/api/content/{id}",
            get(routes::get_content).delete(routes::delete_content),
        )
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(cors_policy, cors::cors))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let response = next.run(request).await;

    if path != "/health" {
        info!(
            "http: {} {} status={}",
            method,
            path,
            response.status().as_u16()
        );
    }
    response
}

pub fn spawn_purge_task(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            let (content, sources) = state.purge();
            if content > 0 || sources > 0 {
                debug!("content: purged entries={} sources={}", content, sources);
            }
        }
    })
}

/// Binds `0.0.0.0:<port>` and serves until Ctrl-C.
pub async fn serve(config: ContentServiceConfig) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config);
    let purge = spawn_purge_task(state.clone());

    let listener = TcpListener::bind(addr).await?;
    info!(
        "content: listening addr={} origin={} ttl_s={}",
        listener.local_addr()?,
        state.config().allowed_origin,
        state.config().content_ttl_seconds
    );

    let result = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;
    purge.abort();
    result
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::warn!("content: signal handler failed err={}", err);
        std::future::pending::<()>().await;
    }
    info!("content: shutting down");
}
