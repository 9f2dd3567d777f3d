/// Service configuration from environment variables
///
/// Controls where contacts are stored, where the invoice logo comes from and
/// what the wallet provider reports.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct QuotesConfig {
    /// Listen address of the HTTP API
    pub bind_address: String,
    /// Directory of the file key-value store
    pub data_dir: PathBuf,
    /// Base URL to fetch the logo from; the asset directory is used when unset
    pub logo_url: Option<String>,
    /// Local asset directory
    pub asset_dir: PathBuf,
    /// Resource path of the logo
    pub logo_path: String,
    /// Upper bound on the logo fetch
    pub logo_timeout: Duration,
    /// Network label shown in settings
    pub network: String,
    /// Wallet adapter names offered for selection
    pub wallet_adapters: Vec<String>,
    /// Public key reported by the wallet provider once connected
    pub public_key: Option<String>,
    /// Seed the demonstration quotes on startup
    pub demo_data: bool,
    /// CORS origins; any origin when empty
    pub allowed_origins: Vec<String>,
}

impl QuotesConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `BIND_ADDRESS`: listen address (default `0.0.0.0:3000`)
    /// - `QUOTES_DATA_DIR`: contact storage directory (default `./data`)
    /// - `LOGO_URL`: base URL serving the logo (optional)
    /// - `ASSET_DIR`: local asset directory (default `./public`)
    /// - `LOGO_PATH`: logo resource path (default `/logo.png`)
    /// - `LOGO_FETCH_TIMEOUT_MS`: logo fetch timeout (default 5000)
    /// - `ALEO_NETWORK`: network label (default `testnetbeta`)
    /// - `ALEO_WALLETS`: comma-separated adapter names (default `Leo Wallet`)
    /// - `ALEO_PUBLIC_KEY`: public key reported when connected (optional)
    /// - `QUOTES_DEMO_DATA`: `true` to seed demonstration quotes
    /// - `ALLOWED_ORIGINS`: comma-separated CORS origins (optional)
    ///
    /// # Examples
    ///
    /// ```bash
    /// ALEO_PUBLIC_KEY=aleo1... QUOTES_DEMO_DATA=true cargo run
    /// ```
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_address = env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address);

        let data_dir = env::var("QUOTES_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        log::info!("📁 Data directory: {:?}", data_dir);

        let logo_url = non_empty_var("LOGO_URL");
        let asset_dir = env::var("ASSET_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.asset_dir);
        match &logo_url {
            Some(url) => log::info!("🖼️  Logo source: {}", url),
            None => log::info!("🖼️  Logo source: {:?}", asset_dir),
        }

        let logo_path = env::var("LOGO_PATH").unwrap_or(defaults.logo_path);

        let logo_timeout = match env::var("LOGO_FETCH_TIMEOUT_MS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    log::warn!(
                        "⚠️  Invalid LOGO_FETCH_TIMEOUT_MS '{}', using {:?}",
                        raw,
                        defaults.logo_timeout
                    );
                    defaults.logo_timeout
                }
            },
            Err(_) => defaults.logo_timeout,
        };

        let network = env::var("ALEO_NETWORK")
            .map(|n| n.to_lowercase())
            .unwrap_or(defaults.network);
        log::info!("🌐 Aleo network: {}", network);

        let wallet_adapters = non_empty_var("ALEO_WALLETS")
            .map(|raw| split_list(&raw))
            .filter(|list| !list.is_empty())
            .unwrap_or(defaults.wallet_adapters);

        let public_key = non_empty_var("ALEO_PUBLIC_KEY");
        if let Some(key) = &public_key {
            if !crate::aleo::validate(key) {
                log::warn!("⚠️  ALEO_PUBLIC_KEY does not look like an Aleo address");
            }
        }

        let demo_data = match env::var("QUOTES_DEMO_DATA") {
            Ok(raw) => matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
            Err(_) => defaults.demo_data,
        };

        let allowed_origins = non_empty_var("ALLOWED_ORIGINS")
            .map(|raw| split_list(&raw))
            .unwrap_or_default();

        Self {
            bind_address,
            data_dir,
            logo_url,
            asset_dir,
            logo_path,
            logo_timeout,
            network,
            wallet_adapters,
            public_key,
            demo_data,
            allowed_origins,
        }
    }
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            data_dir: PathBuf::from("./data"),
            logo_url: None,
            asset_dir: PathBuf::from("./public"),
            logo_path: "/logo.png".to_string(),
            logo_timeout: Duration::from_millis(5000),
            network: "testnetbeta".to_string(),
            wallet_adapters: vec!["Leo Wallet".to_string()],
            public_key: None,
            demo_data: false,
            allowed_origins: Vec::new(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
