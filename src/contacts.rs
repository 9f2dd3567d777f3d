//! Address book of named Aleo addresses
//!
//! The whole collection is written back to the key-value store on every
//! mutation. There is no incremental write and no debounce. Removing the last
//! contact deletes the key instead of storing an empty list.

use std::sync::Arc;

use crate::aleo;
use crate::error::{QuoteError, StorageError, ValidationError};
use crate::models::{fresh_id, Contact};
use crate::storage::KeyValueStore;

/// Storage key holding the serialized contact list
pub const CONTACTS_KEY: &str = "aleo_contacts";

pub struct ContactStore {
    storage: Arc<dyn KeyValueStore>,
    contacts: Vec<Contact>,
}

impl ContactStore {
    /// Load the contact list from `storage`
    ///
    /// A missing or unparsable blob yields an empty address book. Read errors
    /// of the backing store are treated the same way.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let contacts = match storage.get(CONTACTS_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Contact>>(&blob) {
                Ok(contacts) => contacts,
                Err(e) => {
                    log::warn!("Stored contacts are unreadable ({}), starting empty", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read stored contacts ({}), starting empty", e);
                Vec::new()
            }
        };

        log::debug!("Loaded {} contacts", contacts.len());
        Self { storage, contacts }
    }

    /// Contacts in insertion order, oldest first
    pub fn list(&self) -> Vec<Contact> {
        self.contacts.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Validate and append a contact, then persist the full list
    pub fn add(&mut self, name: &str, address: &str) -> Result<Contact, QuoteError> {
        let name = name.trim();
        let address = address.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingField("name").into());
        }
        if address.is_empty() {
            return Err(ValidationError::MissingField("address").into());
        }
        if !aleo::validate(address) {
            return Err(ValidationError::InvalidAddress(address.to_string()).into());
        }

        let contact = Contact {
            id: fresh_id(|id| self.get(id).is_some()),
            name: name.to_string(),
            address: address.to_string(),
        };

        self.contacts.push(contact.clone());
        if let Err(e) = self.persist() {
            self.contacts.pop();
            return Err(e.into());
        }

        log::info!("Contact saved: {} ({})", contact.name, contact.id);
        Ok(contact)
    }

    /// Remove the contact with `id`; returns whether one was removed
    pub fn remove(&mut self, id: &str) -> Result<bool, QuoteError> {
        let Some(index) = self.contacts.iter().position(|c| c.id == id) else {
            return Ok(false);
        };

        let removed = self.contacts.remove(index);
        if let Err(e) = self.persist() {
            self.contacts.insert(index, removed);
            return Err(e.into());
        }

        log::info!("Contact removed: {} ({})", removed.name, removed.id);
        Ok(true)
    }

    /// Write the list back; an empty address book clears the key
    fn persist(&self) -> Result<(), StorageError> {
        if self.contacts.is_empty() {
            return self.storage.remove(CONTACTS_KEY);
        }
        let json = serde_json::to_string(&self.contacts)?;
        self.storage.set(CONTACTS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    fn address(fill: char) -> String {
        format!("aleo1{}", fill.to_string().repeat(58))
    }

    #[test]
    fn test_add_trims_input() {
        let mut store = ContactStore::load(Arc::new(MemoryStore::new()));
        let contact = store.add("  Alice ", &format!(" {} ", address('a'))).unwrap();
        assert_eq!(contact.name, "Alice");
        assert_eq!(contact.address, address('a'));
    }

    #[test]
    fn test_failed_persist_rolls_back() {
        let mut store = ContactStore::load(Arc::new(ReadOnlyStore));
        let result = store.add("Alice", &address('a'));
        assert!(matches!(result, Err(QuoteError::Storage(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_by_id() {
        let mut store = ContactStore::load(Arc::new(MemoryStore::new()));
        let contact = store.add("Bob", &address('b')).unwrap();
        assert_eq!(store.get(&contact.id), Some(&contact));
        assert_eq!(store.get("missing"), None);
    }
}
