// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Rifas Sucre raffle manager.
//!
//! Data lives in two places at once:
//!
//! - The **structured store**: a `SQLite` database managed through Diesel,
//!   with one table per collection (raffles, clients, access codes,
//!   settings) and embedded migrations.
//! - **Flat storage**: a single JSON key-value file carrying the legacy
//!   keys, mirroring every save, and standing in as the only backend when
//!   the database cannot be opened.
//!
//! The [`Repository`] adapter fronts both. Every save writes the structured
//! store and the flat mirror; a save is durable when at least one of them
//! accepted the write, and only a double failure is an error. Loads prefer
//! the structured store and fall back to flat storage, migrating legacy
//! payloads in on first sight.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::{info, warn};

use rifas_core::AppState;
use rifas_domain::{AccessCode, Client, Raffle};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod flat;
mod gate;
mod migration;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use flat::{FlatStore, keys};
pub use gate::{
    CODE_GENERATOR, LastAccess, generate_code, prune_expired_codes, record_accepted_code,
    resume_session, verify_code,
};

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Which backends accepted one save.
///
/// A save is durable when either backend took it; the structured store can
/// be down (fallback mode) and flat storage can fail on a full disk, but
/// losing both in one save is the only fatal case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The structured store accepted the write.
    pub structured: bool,
    /// Flat storage accepted the write.
    pub flat: bool,
}

impl SaveOutcome {
    /// Whether the data survived in at least one backend.
    #[must_use]
    pub const fn durable(&self) -> bool {
        self.structured || self.flat
    }

    fn merge(self, other: Self) -> Self {
        Self {
            structured: self.structured && other.structured,
            flat: self.flat && other.flat,
        }
    }
}

/// Persistence adapter fronting the structured store and flat storage.
///
/// Constructed once at startup. When the database cannot be opened the
/// adapter degrades to flat-only mode instead of failing, matching the
/// store-unavailable behavior older installations relied on.
pub struct Repository {
    conn: Option<SqliteConnection>,
    flat: FlatStore,
}

impl Repository {
    /// Opens the repository with a file-based database and flat-storage file.
    ///
    /// A database that cannot be opened or migrated is logged and skipped;
    /// the repository then runs in flat-only mode. Legacy access codes are
    /// migrated eagerly whenever the database is available.
    ///
    /// # Errors
    ///
    /// Returns an error only when flat storage itself cannot be read, since
    /// without it there is no fallback left.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(
        db_path: P,
        flat_path: Q,
    ) -> Result<Self, PersistenceError> {
        let mut flat = FlatStore::open(flat_path)?;

        let db_path_str = db_path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;
        let conn = match backend::sqlite::initialize_database(db_path_str) {
            Ok(mut conn) => {
                if let Err(e) = backend::sqlite::enable_wal_mode(&mut conn) {
                    warn!(error = %e, "Could not enable WAL mode, continuing without it");
                }
                // A failed migration keeps the legacy payload in place and is
                // retried on the next startup; it never aborts the open.
                if let Err(e) = migration::migrate_legacy_codes(&mut conn, &mut flat) {
                    warn!(error = %e, "Legacy access-code migration incomplete, will retry next startup");
                }
                Some(conn)
            }
            Err(e) => {
                warn!(error = %e, "Structured store unavailable, running on flat storage only");
                None
            }
        };

        Ok(Self { conn, flat })
    }

    /// Creates a repository with a unique in-memory database and in-memory
    /// flat storage.
    ///
    /// Each call receives its own database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_rifas_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut flat = FlatStore::in_memory();
        let mut conn = backend::sqlite::initialize_database(&shared_memory_url)?;
        if let Err(e) = migration::migrate_legacy_codes(&mut conn, &mut flat) {
            warn!(error = %e, "Legacy access-code migration incomplete, will retry next startup");
        }

        Ok(Self {
            conn: Some(conn),
            flat,
        })
    }

    /// Creates a repository running on the given flat store alone, with no
    /// structured store at all.
    #[must_use]
    pub const fn flat_only(flat: FlatStore) -> Self {
        Self { conn: None, flat }
    }

    /// Whether the structured store is available.
    #[must_use]
    pub const fn has_structured_store(&self) -> bool {
        self.conn.is_some()
    }

    /// Direct access to flat storage, for template keys and diagnostics.
    pub const fn flat_mut(&mut self) -> &mut FlatStore {
        &mut self.flat
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Loads the complete working state, migrating legacy payloads when the
    /// structured collections are empty.
    ///
    /// An active-raffle selection pointing at a raffle that no longer exists
    /// is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the available backend cannot be read.
    pub fn load_all(&mut self) -> Result<AppState, PersistenceError> {
        let (raffles, clients) = match &mut self.conn {
            Some(conn) => (
                migration::load_raffles_with_migration(conn, &self.flat)?,
                migration::load_clients_with_migration(conn, &self.flat)?,
            ),
            None => (
                self.flat.get::<Vec<Raffle>>(keys::RAFFLES)?.unwrap_or_default(),
                self.flat.get::<Vec<Client>>(keys::CLIENTS)?.unwrap_or_default(),
            ),
        };

        let active_raffle = self
            .get_config(keys::ACTIVE_RAFFLE)?
            .filter(|id| raffles.iter().any(|raffle| &raffle.id == id));

        info!(
            raffles = raffles.len(),
            clients = clients.len(),
            "Working state loaded"
        );
        Ok(AppState {
            raffles,
            clients,
            active_raffle,
        })
    }

    // ========================================================================
    // Saving
    // ========================================================================

    /// Saves the raffle list to both backends.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NothingDurable` when neither backend
    /// accepted the write.
    pub fn save_raffles(&mut self, records: &[Raffle]) -> Result<SaveOutcome, PersistenceError> {
        let structured = match &mut self.conn {
            Some(conn) => match mutations::replace_all_raffles(conn, records) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Structured raffle save failed, relying on flat mirror");
                    false
                }
            },
            None => false,
        };
        let flat = match self.flat.set(keys::RAFFLES, &records) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Flat raffle mirror failed");
                false
            }
        };

        let outcome = SaveOutcome { structured, flat };
        if outcome.durable() {
            Ok(outcome)
        } else {
            Err(PersistenceError::NothingDurable)
        }
    }

    /// Saves the client list to both backends.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NothingDurable` when neither backend
    /// accepted the write.
    pub fn save_clients(&mut self, records: &[Client]) -> Result<SaveOutcome, PersistenceError> {
        let structured = match &mut self.conn {
            Some(conn) => match mutations::replace_all_clients(conn, records) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Structured client save failed, relying on flat mirror");
                    false
                }
            },
            None => false,
        };
        let flat = match self.flat.set(keys::CLIENTS, &records) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Flat client mirror failed");
                false
            }
        };

        let outcome = SaveOutcome { structured, flat };
        if outcome.durable() {
            Ok(outcome)
        } else {
            Err(PersistenceError::NothingDurable)
        }
    }

    /// Saves the whole working state: raffles, clients, and the
    /// active-raffle selection.
    ///
    /// # Errors
    ///
    /// Returns an error when any part failed in both backends.
    pub fn save_all(&mut self, state: &AppState) -> Result<SaveOutcome, PersistenceError> {
        let outcome = self
            .save_raffles(&state.raffles)?
            .merge(self.save_clients(&state.clients)?);
        match &state.active_raffle {
            Some(id) => self.set_config(keys::ACTIVE_RAFFLE, id)?,
            None => self.delete_config(keys::ACTIVE_RAFFLE)?,
        }
        Ok(outcome)
    }

    /// Deletes a raffle and its clients directly in both backends.
    ///
    /// The cascade removes clients before the raffle, inside one transaction
    /// on the structured side, and clears the active-raffle selection when
    /// it pointed at the deleted raffle.
    ///
    /// # Errors
    ///
    /// Returns an error if the available backend rejects the delete.
    pub fn delete_raffle_cascade(&mut self, id: &str) -> Result<(), PersistenceError> {
        if let Some(conn) = &mut self.conn {
            use diesel::Connection;
            conn.transaction::<_, PersistenceError, _>(|conn| {
                mutations::delete_clients_of_raffle(conn, id)?;
                mutations::delete_raffle(conn, id)?;
                Ok(())
            })?;
        }

        // Keep the flat mirrors in step.
        if let Some(mut raffles) = self.flat.get::<Vec<Raffle>>(keys::RAFFLES)? {
            raffles.retain(|raffle| raffle.id != id);
            self.flat.set(keys::RAFFLES, &raffles)?;
        }
        if let Some(mut clients) = self.flat.get::<Vec<Client>>(keys::CLIENTS)? {
            clients.retain(|client| client.raffle_id != id);
            self.flat.set(keys::CLIENTS, &clients)?;
        }

        if self.get_config(keys::ACTIVE_RAFFLE)?.as_deref() == Some(id) {
            self.delete_config(keys::ACTIVE_RAFFLE)?;
        }
        info!(raffle_id = %id, "Raffle and its clients deleted from the store");
        Ok(())
    }

    // ========================================================================
    // Access Codes
    // ========================================================================

    fn flat_codes(&self) -> Result<Vec<AccessCode>, PersistenceError> {
        Ok(self
            .flat
            .get::<Vec<AccessCode>>(keys::VALID_CODES)?
            .unwrap_or_default())
    }

    /// Retrieves every stored access code, falling back to the flat backup
    /// list when the structured store cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an error if neither backend can be read.
    pub fn all_codes(&mut self) -> Result<Vec<AccessCode>, PersistenceError> {
        if let Some(conn) = &mut self.conn {
            match queries::get_all_codes(conn) {
                Ok(codes) => return Ok(codes),
                Err(e) => {
                    warn!(error = %e, "Structured code read failed, using the flat backup");
                }
            }
        }
        self.flat_codes()
    }

    /// Looks up one access code by its code string.
    ///
    /// A code absent from the structured store (or unreachable because the
    /// store failed) is still searched for in the flat backup list, so codes
    /// survive losing the database.
    ///
    /// # Errors
    ///
    /// Returns an error if neither backend can be read.
    pub fn find_code(&mut self, code: &str) -> Result<Option<AccessCode>, PersistenceError> {
        if let Some(conn) = &mut self.conn {
            match queries::get_code(conn, code) {
                Ok(Some(found)) => return Ok(Some(found)),
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "Structured code lookup failed, scanning the flat backup");
                }
            }
        }
        Ok(self
            .flat_codes()?
            .into_iter()
            .find(|candidate| candidate.code == code))
    }

    /// Inserts or replaces one access code in the structured store and in
    /// the flat backup list.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NothingDurable` when neither backend
    /// accepted the write.
    pub fn put_code(&mut self, code: &AccessCode) -> Result<(), PersistenceError> {
        let structured = match &mut self.conn {
            Some(conn) => match mutations::put_code(conn, code) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "Structured code write failed, relying on the flat backup");
                    false
                }
            },
            None => false,
        };
        let flat = match self.flat_codes().and_then(|mut codes| {
            codes.retain(|candidate| candidate.code != code.code);
            codes.push(code.clone());
            self.flat.set(keys::VALID_CODES, &codes)
        }) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Flat code backup failed");
                false
            }
        };

        if structured || flat {
            Ok(())
        } else {
            Err(PersistenceError::NothingDurable)
        }
    }

    /// Deletes one access code from both backends. Returns whether a code
    /// was removed from either.
    ///
    /// # Errors
    ///
    /// Returns an error if the available backend rejects the delete.
    pub fn delete_code(&mut self, code: &str) -> Result<bool, PersistenceError> {
        let mut removed = false;
        if let Some(conn) = &mut self.conn {
            removed = mutations::delete_code(conn, code)? > 0;
        }
        let mut codes = self.flat_codes()?;
        let before = codes.len();
        codes.retain(|candidate| candidate.code != code);
        if codes.len() < before {
            self.flat.set(keys::VALID_CODES, &codes)?;
            removed = true;
        }
        Ok(removed)
    }

    /// Deletes every access code no longer valid at `now` from both
    /// backends. Returns the count removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the available backend rejects the delete.
    pub fn delete_codes_expired_before(
        &mut self,
        now: OffsetDateTime,
    ) -> Result<usize, PersistenceError> {
        let mut structured_removed = 0;
        if let Some(conn) = &mut self.conn {
            structured_removed = mutations::delete_expired_codes(conn, now)?;
        }

        let mut codes = self.flat_codes()?;
        let before = codes.len();
        codes.retain(|candidate| candidate.is_valid_at(now));
        let flat_removed = before - codes.len();
        if flat_removed > 0 {
            self.flat.set(keys::VALID_CODES, &codes)?;
        }
        Ok(structured_removed.max(flat_removed))
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Reads one configuration value, preferring the structured store and
    /// falling back to flat storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the available backend cannot be read.
    pub fn get_config(&mut self, key: &str) -> Result<Option<String>, PersistenceError> {
        if let Some(conn) = &mut self.conn
            && let Some(value) = queries::get_setting(conn, key)?
        {
            return Ok(Some(value));
        }
        self.flat.get::<String>(key)
    }

    /// Writes one configuration value to both backends.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NothingDurable` when neither backend
    /// accepted the write.
    pub fn set_config(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let structured = match &mut self.conn {
            Some(conn) => match mutations::set_setting(conn, key, value) {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, key, "Structured config write failed");
                    false
                }
            },
            None => false,
        };
        let flat = match self.flat.set(key, &value) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, key, "Flat config write failed");
                false
            }
        };

        if structured || flat {
            Ok(())
        } else {
            Err(PersistenceError::NothingDurable)
        }
    }

    /// Removes one configuration value from both backends.
    ///
    /// # Errors
    ///
    /// Returns an error if a backend rejects the delete.
    pub fn delete_config(&mut self, key: &str) -> Result<(), PersistenceError> {
        if let Some(conn) = &mut self.conn {
            mutations::delete_setting(conn, key)?;
        }
        self.flat.remove(key)?;
        Ok(())
    }
}
