use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveContactResponse {
    pub id: String,
    pub removed: bool,
}

#[derive(Debug, Deserialize)]
pub struct SelectWalletRequest {
    pub name: String,
}
