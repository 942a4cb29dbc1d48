// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Flat storage: the synchronous JSON key-value fallback.
//!
//! Flat storage is a single JSON file holding a string-keyed map. It carries
//! the legacy keys older installations wrote, serves as the mirror target
//! for every save, and becomes the sole backend when the structured store
//! cannot be opened. Writes go to disk immediately; there is no caching
//! layer to flush.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::PersistenceError;

/// The flat-storage key names, kept byte-identical to the legacy ones so an
/// old data file reads back without translation.
pub mod keys {
    /// Access codes awaiting migration into the structured store, and the
    /// mirror target for accepted codes when the store is unavailable.
    pub const VALID_CODES: &str = "codigosValidos";
    /// Raffle list mirror, and the legacy source for lazy migration.
    pub const RAFFLES: &str = "rifasSucre_rifas";
    /// Client list mirror, and the legacy source for lazy migration.
    pub const CLIENTS: &str = "rifasSucre_clientes";
    /// The active raffle selection.
    pub const ACTIVE_RAFFLE: &str = "rifasSucre_rifaActiva";
    /// User-chosen application display name.
    pub const APP_NAME: &str = "nombreApp";
    /// The last accepted access code and when it was accepted.
    pub const LAST_ACCESS: &str = "ultimo_acceso";
    /// Saved ticket layout template.
    pub const TICKET_TEMPLATE: &str = "rifasSucre_plantilla";
    /// Ticket header line template.
    pub const TICKET_TITLE: &str = "plantillaTicketTitulo";
    /// Ticket footer message template.
    pub const TICKET_MESSAGE: &str = "plantillaTicketMensaje";
    /// Invoice header line template.
    pub const INVOICE_TITLE: &str = "plantillaFacturaTitulo";
    /// Invoice footer message template.
    pub const INVOICE_MESSAGE: &str = "plantillaFacturaMensaje";
}

/// A synchronous JSON key-value store backed by one file.
#[derive(Debug)]
pub struct FlatStore {
    path: Option<PathBuf>,
    map: BTreeMap<String, serde_json::Value>,
}

impl FlatStore {
    /// Opens flat storage at `path`, reading any existing content. A missing
    /// file starts empty; the file is only created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let map = if path.exists() {
            let text = fs::read_to_string(&path)
                .map_err(|e| PersistenceError::FlatReadFailed(e.to_string()))?;
            serde_json::from_str(&text)
                .map_err(|e| PersistenceError::FlatReadFailed(e.to_string()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: Some(path),
            map,
        })
    }

    /// Creates a flat store that lives purely in memory, for tests.
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            path: None,
            map: BTreeMap::new(),
        }
    }

    /// Whether a key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Reads and deserializes one key. Absent keys return `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored value does not deserialize as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        match self.map.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Serializes and writes one key, persisting the whole file before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let value = serde_json::to_value(value)?;
        self.map.insert(key.to_string(), value);
        self.persist()
    }

    /// Removes one key. Returns whether the key was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file write fails.
    pub fn remove(&mut self, key: &str) -> Result<bool, PersistenceError> {
        let removed = self.map.remove(key).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = serde_json::to_string_pretty(&self.map)?;

        // Write-then-rename keeps the previous file intact if the write dies.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, text).map_err(|e| PersistenceError::FlatWriteFailed(e.to_string()))?;
        fs::rename(&tmp, path).map_err(|e| PersistenceError::FlatWriteFailed(e.to_string()))?;
        debug!(path = %path.display(), "Flat storage persisted");
        Ok(())
    }
}
