use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::server::AppState;
use super::types::{AddContactRequest, RemoveContactResponse, SelectWalletRequest};
use crate::controller::{
    ClientsView, DashboardView, Download, QuoteForm, QuotesView, SettingsView, View, WalletStatus,
};
use crate::error::QuoteError;
use crate::models::{Contact, Quote};

/// Fingerprint of the invoice PDF as an Aleo `field` literal
pub const CONTENT_HASH_HEADER: &str = "x-content-hash";
/// Quote amount as an Aleo `u64` literal, when it has one
pub const AMOUNT_LITERAL_HEADER: &str = "x-aleo-amount";

/// Attachment response for the download sink
fn attachment(download: Download) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", download.filename);
    (
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    )
        .into_response()
}

pub async fn dashboard_handler(State(state): State<AppState>) -> Json<DashboardView> {
    let mut controller = state.controller.write().await;
    controller.set_view(View::Dashboard);
    Json(controller.dashboard())
}

pub async fn list_quotes_handler(State(state): State<AppState>) -> Json<QuotesView> {
    let mut controller = state.controller.write().await;
    controller.set_view(View::Quotes);
    Json(controller.quotes_view())
}

pub async fn create_quote_handler(
    State(state): State<AppState>,
    Json(form): Json<QuoteForm>,
) -> Result<(StatusCode, Json<Quote>), QuoteError> {
    let quote = state.controller.write().await.submit_quote(&form)?;
    Ok((StatusCode::CREATED, Json(quote)))
}

pub async fn export_csv_handler(State(state): State<AppState>) -> Result<Response, QuoteError> {
    let download = state.controller.read().await.export_csv()?;
    Ok(attachment(download))
}

pub async fn invoice_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, QuoteError> {
    // Clone out and release the lock before the logo fetch suspends
    let quote = state.controller.read().await.quote(&id)?;

    let rendered = state.renderer.render(&quote, &state.shutdown).await?;
    let mut response = attachment(Download {
        filename: rendered.filename,
        content_type: "application/pdf",
        bytes: rendered.bytes,
    });

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&rendered.content_hash) {
        headers.insert(CONTENT_HASH_HEADER, value);
    }
    if let Some(Ok(value)) = rendered.amount_literal.as_deref().map(HeaderValue::from_str) {
        headers.insert(AMOUNT_LITERAL_HEADER, value);
    }
    Ok(response)
}

pub async fn list_contacts_handler(State(state): State<AppState>) -> Json<ClientsView> {
    let mut controller = state.controller.write().await;
    controller.set_view(View::Clients);
    Json(controller.clients_view())
}

pub async fn add_contact_handler(
    State(state): State<AppState>,
    Json(req): Json<AddContactRequest>,
) -> Result<(StatusCode, Json<Contact>), QuoteError> {
    let contact = state
        .controller
        .write()
        .await
        .add_contact(&req.name, &req.address)?;
    Ok((StatusCode::CREATED, Json(contact)))
}

pub async fn remove_contact_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RemoveContactResponse>, QuoteError> {
    let removed = state.controller.write().await.remove_contact(&id)?;
    if !removed {
        log::debug!("No contact {} to remove", id);
    }
    Ok(Json(RemoveContactResponse { id, removed }))
}

pub async fn select_contact_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuoteForm>, QuoteError> {
    let draft = state.controller.read().await.select_contact(&id)?;
    Ok(Json(draft))
}

pub async fn settings_handler(State(state): State<AppState>) -> Json<SettingsView> {
    let mut controller = state.controller.write().await;
    controller.set_view(View::Settings);
    Json(controller.settings_view())
}

pub async fn wallet_status_handler(State(state): State<AppState>) -> Json<WalletStatus> {
    Json(state.controller.read().await.wallet_status())
}

pub async fn select_wallet_handler(
    State(state): State<AppState>,
    Json(req): Json<SelectWalletRequest>,
) -> Result<Json<WalletStatus>, QuoteError> {
    let mut controller = state.controller.write().await;
    controller.wallet_mut().select(&req.name)?;
    Ok(Json(controller.wallet_status()))
}

pub async fn connect_wallet_handler(
    State(state): State<AppState>,
) -> Result<Json<WalletStatus>, QuoteError> {
    let mut controller = state.controller.write().await;
    controller.wallet_mut().connect()?;
    Ok(Json(controller.wallet_status()))
}

pub async fn disconnect_wallet_handler(State(state): State<AppState>) -> Json<WalletStatus> {
    let mut controller = state.controller.write().await;
    controller.wallet_mut().disconnect();
    Json(controller.wallet_status())
}
