//! Wallet capability provider
//!
//! Quote creation only needs to know whether a wallet is connected and which
//! public key it reports. No signing or transaction interface is exposed.

use serde::Serialize;

use crate::error::WalletError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletEntry {
    pub adapter: AdapterInfo,
}

pub trait WalletProvider: Send + Sync {
    fn connected(&self) -> bool;

    fn public_key(&self) -> Option<String>;

    /// Name of the selected adapter, if any
    fn selected(&self) -> Option<String>;

    fn select(&mut self, wallet_name: &str) -> Result<(), WalletError>;

    fn connect(&mut self) -> Result<(), WalletError>;

    fn disconnect(&mut self);

    fn wallets(&self) -> Vec<WalletEntry>;
}

/// Wallet provider backed by configuration
///
/// Connecting succeeds when an adapter is selected and a public key was
/// configured; the key is reported as-is.
#[derive(Debug, Clone)]
pub struct StaticWalletProvider {
    adapters: Vec<String>,
    configured_key: Option<String>,
    selected: Option<String>,
    connected: bool,
}

impl StaticWalletProvider {
    pub fn new(adapters: Vec<String>, public_key: Option<String>) -> Self {
        Self {
            adapters,
            configured_key: public_key,
            selected: None,
            connected: false,
        }
    }

    /// Select the first adapter and connect immediately
    ///
    /// Failure leaves the provider disconnected.
    pub fn auto_connect(&mut self) -> Result<(), WalletError> {
        let first = self
            .adapters
            .first()
            .cloned()
            .ok_or(WalletError::NoWalletSelected)?;
        self.select(&first)?;
        self.connect()
    }
}

impl WalletProvider for StaticWalletProvider {
    fn connected(&self) -> bool {
        self.connected
    }

    fn public_key(&self) -> Option<String> {
        if self.connected {
            self.configured_key.clone()
        } else {
            None
        }
    }

    fn selected(&self) -> Option<String> {
        self.selected.clone()
    }

    fn select(&mut self, wallet_name: &str) -> Result<(), WalletError> {
        if !self.adapters.iter().any(|a| a == wallet_name) {
            return Err(WalletError::UnknownAdapter(wallet_name.to_string()));
        }
        if self.selected.as_deref() != Some(wallet_name) {
            self.connected = false;
        }
        self.selected = Some(wallet_name.to_string());
        log::info!("Wallet adapter selected: {}", wallet_name);
        Ok(())
    }

    fn connect(&mut self) -> Result<(), WalletError> {
        let name = self.selected.clone().ok_or(WalletError::NoWalletSelected)?;
        if self.configured_key.is_none() {
            return Err(WalletError::NoPublicKey(name));
        }
        self.connected = true;
        log::info!("Wallet connected via {}", name);
        Ok(())
    }

    fn disconnect(&mut self) {
        if self.connected {
            log::info!("Wallet disconnected");
        }
        self.connected = false;
    }

    fn wallets(&self) -> Vec<WalletEntry> {
        self.adapters
            .iter()
            .map(|name| WalletEntry {
                adapter: AdapterInfo { name: name.clone() },
            })
            .collect()
    }
}
