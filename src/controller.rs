//! View controller
//!
//! Owns both stores and the wallet provider. Reads come out as view
//! projections; user intents (submit a quote, pick a contact, export) are
//! plain method calls composed here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::contacts::ContactStore;
use crate::error::{QuoteError, ValidationError, WalletError};
use crate::export::{format_currency, to_csv, CSV_FILENAME};
use crate::models::{Contact, Quote, QuoteStatus};
use crate::quotes::QuoteStore;
use crate::wallet::{WalletEntry, WalletProvider};

/// Number of quotes shown on the dashboard
pub const RECENT_QUOTES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Quotes,
    Clients,
    Settings,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_quotes: usize,
    /// Quotes still `Pending`
    pub active_quotes: usize,
    pub paid_quotes: usize,
    pub rejected_quotes: usize,
    pub total_value: Decimal,
    pub total_value_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub recent_quotes: Vec<Quote>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuotesView {
    pub count: usize,
    pub quotes: Vec<Quote>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientsView {
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletStatus {
    pub connected: bool,
    pub public_key: Option<String>,
    pub selected: Option<String>,
    pub wallets: Vec<WalletEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub network: String,
    pub wallet: WalletStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum ViewModel {
    Dashboard(DashboardView),
    Quotes(QuotesView),
    Clients(ClientsView),
    Settings(SettingsView),
}

/// Quote form contents as entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteForm {
    #[serde(default)]
    pub client_address: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub client_name: String,
}

/// A file handed to the download sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Sum of quote amounts, saturating at `Decimal::MAX`
pub fn total_value(quotes: &[Quote]) -> Decimal {
    let mut total = Decimal::ZERO;
    for quote in quotes {
        match total.checked_add(quote.amount) {
            Some(sum) => total = sum,
            None => {
                log::warn!("Quote total exceeds the decimal range, capping at maximum");
                return Decimal::MAX;
            }
        }
    }
    total
}

pub struct ViewController {
    quotes: QuoteStore,
    contacts: ContactStore,
    wallet: Box<dyn WalletProvider>,
    network: String,
    active_view: View,
}

impl ViewController {
    pub fn new(
        quotes: QuoteStore,
        contacts: ContactStore,
        wallet: Box<dyn WalletProvider>,
        network: impl Into<String>,
    ) -> Self {
        Self {
            quotes,
            contacts,
            wallet,
            network: network.into(),
            active_view: View::Dashboard,
        }
    }

    pub fn quotes(&self) -> &QuoteStore {
        &self.quotes
    }

    pub fn contacts(&self) -> &ContactStore {
        &self.contacts
    }

    pub fn wallet(&self) -> &dyn WalletProvider {
        self.wallet.as_ref()
    }

    pub fn wallet_mut(&mut self) -> &mut dyn WalletProvider {
        self.wallet.as_mut()
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    pub fn set_view(&mut self, view: View) {
        self.active_view = view;
    }

    /// Projection of the active view
    pub fn render(&self) -> ViewModel {
        match self.active_view {
            View::Dashboard => ViewModel::Dashboard(self.dashboard()),
            View::Quotes => ViewModel::Quotes(self.quotes_view()),
            View::Clients => ViewModel::Clients(self.clients_view()),
            View::Settings => ViewModel::Settings(self.settings_view()),
        }
    }

    pub fn dashboard(&self) -> DashboardView {
        let quotes = self.quotes.list();
        let count = |status: QuoteStatus| quotes.iter().filter(|q| q.status == status).count();
        let total_value = total_value(quotes);

        DashboardView {
            stats: DashboardStats {
                total_quotes: quotes.len(),
                active_quotes: count(QuoteStatus::Pending),
                paid_quotes: count(QuoteStatus::Paid),
                rejected_quotes: count(QuoteStatus::Rejected),
                total_value,
                total_value_display: format_currency(total_value),
            },
            recent_quotes: quotes.iter().take(RECENT_QUOTES).cloned().collect(),
        }
    }

    pub fn quotes_view(&self) -> QuotesView {
        QuotesView {
            count: self.quotes.len(),
            quotes: self.quotes.list().to_vec(),
        }
    }

    pub fn clients_view(&self) -> ClientsView {
        ClientsView {
            contacts: self.contacts.list(),
        }
    }

    pub fn wallet_status(&self) -> WalletStatus {
        WalletStatus {
            connected: self.wallet.connected(),
            public_key: self.wallet.public_key(),
            selected: self.wallet.selected(),
            wallets: self.wallet.wallets(),
        }
    }

    pub fn settings_view(&self) -> SettingsView {
        SettingsView {
            network: self.network.clone(),
            wallet: self.wallet_status(),
        }
    }

    /// Submit the quote form
    ///
    /// Requires a connected wallet and all three fields; a rejected
    /// submission stores nothing.
    pub fn submit_quote(&mut self, form: &QuoteForm) -> Result<Quote, QuoteError> {
        if !self.wallet.connected() {
            return Err(WalletError::NotConnected.into());
        }

        let required = [
            ("client_name", &form.client_name),
            ("client_address", &form.client_address),
            ("amount", &form.amount),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field).into());
            }
        }

        let quote = self
            .quotes
            .create(&form.client_address, &form.amount, &form.client_name)?;
        self.active_view = View::Quotes;
        Ok(quote)
    }

    pub fn add_contact(&mut self, name: &str, address: &str) -> Result<Contact, QuoteError> {
        self.contacts.add(name, address)
    }

    pub fn remove_contact(&mut self, id: &str) -> Result<bool, QuoteError> {
        self.contacts.remove(id)
    }

    /// "Use this address": a quote form pre-filled with the contact's address
    pub fn select_contact(&self, id: &str) -> Result<QuoteForm, QuoteError> {
        let contact = self
            .contacts
            .get(id)
            .ok_or_else(|| QuoteError::NotFound(format!("contact {}", id)))?;
        Ok(QuoteForm {
            client_address: contact.address.clone(),
            ..QuoteForm::default()
        })
    }

    /// Owned copy of a quote, for rendering outside any lock
    pub fn quote(&self, id: &str) -> Result<Quote, QuoteError> {
        self.quotes
            .get(id)
            .cloned()
            .ok_or_else(|| QuoteError::NotFound(format!("quote {}", id)))
    }

    /// All quotes as a CSV download
    pub fn export_csv(&self) -> Result<Download, QuoteError> {
        let text = to_csv(self.quotes.list())?;
        log::info!("Quotes exported to CSV ({} rows)", self.quotes.len());
        Ok(Download {
            filename: CSV_FILENAME.to_string(),
            content_type: "text/csv; charset=utf-8",
            bytes: text.into_bytes(),
        })
    }
}
