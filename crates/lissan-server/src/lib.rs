#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod assets;
mod cors;
mod error;
mod handlers;
mod intro;
mod request;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use lissan_chain::Orchestrator;
use lissan_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use assets::{AssetError, AssetStore};
pub use error::ApiError;
pub use intro::IntroStore;

use handlers::AppState;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    chains: CancellationToken,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a vendor client cannot be initialized
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = lissan_jobs::http_client();
        let orchestrator = Orchestrator::from_config(config, &client)?;

        Ok(Self::with_orchestrator(config, orchestrator))
    }

    /// Build the server around an already assembled orchestrator
    pub fn with_orchestrator(config: &Config, orchestrator: Orchestrator) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let chains = CancellationToken::new();
        let assets = AssetStore::new(&config.assets);

        let state = AppState {
            orchestrator: Arc::new(orchestrator),
            intro: IntroStore::new(config.intro.initial_text.clone()),
            assets: assets.clone(),
            redirect_to: Arc::from(config.intro.redirect_to.as_str()),
            cancel: chains.clone(),
        };

        let mut app = Router::new()
            .route("/", get(handlers::root))
            .route("/ask", post(handlers::ask))
            .route("/askEnglish", post(handlers::ask_english))
            .route("/askAmharic", post(handlers::ask_amharic))
            .route("/askAmharicText", post(handlers::ask_amharic_text))
            .route("/generateAudio", post(handlers::generate_audio))
            .route("/saveEngIntro", post(handlers::save_intro))
            .route("/EngIntroText", get(handlers::intro_text))
            .route(
                "/changeAudio",
                post(handlers::change_audio).layer(DefaultBodyLimit::max(config.assets.max_upload_bytes)),
            )
            .with_state(state);

        if config.server.health.enabled {
            app = app.route(&config.server.health.path, get(handlers::health));
        }

        app = app.nest_service(&config.assets.serve_path, ServeDir::new(assets.directory()));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if config.server.cors.enabled {
            app = app.layer(cors::cors_layer(&config.server.cors));
        }

        tracing::debug!(
            assets = %assets.directory().display(),
            serve_path = %config.assets.serve_path,
            "routes assembled"
        );

        Self {
            router: app,
            listen_address,
            chains,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. In-flight chains
    /// are cancelled at that point so pending polls stop right away.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        let chains = self.chains;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
                chains.cancel();
            })
            .await?;

        Ok(())
    }
}
