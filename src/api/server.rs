use axum::{
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::config::QuotesConfig;
use crate::contacts::ContactStore;
use crate::controller::ViewController;
use crate::export::{AssetFetcher, FileAssetFetcher, HttpAssetFetcher, InvoiceRenderer};
use crate::quotes::{sample_quotes, QuoteStore};
use crate::storage::FileStore;
use crate::wallet::StaticWalletProvider;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<RwLock<ViewController>>,
    pub renderer: Arc<InvoiceRenderer>,
    /// Cancelled on shutdown; aborts in-flight invoice generation
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(controller: ViewController, renderer: InvoiceRenderer) -> Self {
        Self {
            controller: Arc::new(RwLock::new(controller)),
            renderer: Arc::new(renderer),
            shutdown: CancellationToken::new(),
        }
    }

    /// Wire stores, wallet and renderer from configuration
    pub fn from_config(config: &QuotesConfig) -> Self {
        let storage = Arc::new(FileStore::new_with_base_dir(config.data_dir.clone()));
        let contacts = ContactStore::load(storage);

        let quotes = if config.demo_data {
            log::info!("Seeding demonstration quotes");
            QuoteStore::seeded(sample_quotes())
        } else {
            QuoteStore::new()
        };

        let mut wallet =
            StaticWalletProvider::new(config.wallet_adapters.clone(), config.public_key.clone());
        if let Err(e) = wallet.auto_connect() {
            log::warn!("Wallet not connected at startup: {}", e);
        }

        let fetcher: Arc<dyn AssetFetcher> = match &config.logo_url {
            Some(url) => Arc::new(HttpAssetFetcher::new(url.clone())),
            None => Arc::new(FileAssetFetcher::new(config.asset_dir.clone())),
        };
        let renderer = InvoiceRenderer::new(fetcher)
            .with_logo_path(config.logo_path.clone())
            .with_timeout(config.logo_timeout);

        let controller =
            ViewController::new(quotes, contacts, Box::new(wallet), config.network.clone());
        Self::new(controller, renderer)
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard", get(handlers::dashboard_handler))
        .route(
            "/api/quotes",
            get(handlers::list_quotes_handler).post(handlers::create_quote_handler),
        )
        .route("/api/quotes/export", get(handlers::export_csv_handler))
        .route("/api/quotes/:id/invoice", get(handlers::invoice_handler))
        .route(
            "/api/contacts",
            get(handlers::list_contacts_handler).post(handlers::add_contact_handler),
        )
        .route(
            "/api/contacts/:id",
            delete(handlers::remove_contact_handler),
        )
        .route(
            "/api/contacts/:id/select",
            post(handlers::select_contact_handler),
        )
        .route("/api/settings", get(handlers::settings_handler))
        .route("/api/wallet", get(handlers::wallet_status_handler))
        .route("/api/wallet/select", post(handlers::select_wallet_handler))
        .route("/api/wallet/connect", post(handlers::connect_wallet_handler))
        .route(
            "/api/wallet/disconnect",
            post(handlers::disconnect_wallet_handler),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        log::warn!("CORS: Allowing all origins (development mode). Set ALLOWED_ORIGINS for production.");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    log::info!("CORS configured for origins: {}", allowed_origins.join(","));
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn start_server(config: QuotesConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let shutdown = state.shutdown.clone();
    let app = build_router(state).layer(cors_layer(&config.allowed_origins));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    log::info!("Server listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            log::info!("Received SIGTERM signal");
        },
    }

    log::info!("Shutdown signal received, cancelling in-flight invoices...");
    token.cancel();
}
