// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! One-way migration of legacy flat-storage data into the structured store.
//!
//! Older installations kept everything in flat storage. Raffles and clients
//! migrate lazily, on the first load that finds the structured collection
//! empty while a legacy payload exists. Access codes migrate eagerly at
//! startup: copy every code into the store first, then delete the legacy
//! key. The ordering makes the migration at-least-once rather than
//! at-most-once; re-importing after a crash is harmless because puts are
//! idempotent, while deleting first could lose codes forever.

use diesel::SqliteConnection;
use tracing::{info, warn};

use rifas_domain::{AccessCode, Client, Raffle};

use crate::error::PersistenceError;
use crate::flat::{FlatStore, keys};
use crate::{mutations, queries};

/// Migrates legacy access codes out of flat storage, returning how many
/// codes were imported.
///
/// The legacy key is removed only after every code is in the store. An
/// unparseable legacy payload is left in place and skipped, so it stays
/// inspectable instead of being destroyed.
///
/// # Errors
///
/// Returns an error if a store write or the flat-storage delete fails.
pub fn migrate_legacy_codes(
    conn: &mut SqliteConnection,
    flat: &mut FlatStore,
) -> Result<usize, PersistenceError> {
    if !flat.contains(keys::VALID_CODES) {
        return Ok(0);
    }
    let codes: Vec<AccessCode> = match flat.get(keys::VALID_CODES) {
        Ok(Some(codes)) => codes,
        Ok(None) => return Ok(0),
        Err(e) => {
            warn!(error = %e, "Legacy access-code payload is unreadable, leaving it in place");
            return Ok(0);
        }
    };

    for code in &codes {
        mutations::put_code(conn, code)?;
    }
    flat.remove(keys::VALID_CODES)?;
    info!(count = codes.len(), "Legacy access codes migrated into the store");
    Ok(codes.len())
}

/// Loads all raffles, importing the legacy flat-storage list when the
/// structured collection is empty.
///
/// The legacy key is kept: it doubles as the mirror target for subsequent
/// saves.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the import write fails.
pub fn load_raffles_with_migration(
    conn: &mut SqliteConnection,
    flat: &FlatStore,
) -> Result<Vec<Raffle>, PersistenceError> {
    let stored = queries::get_all_raffles(conn)?;
    if !stored.is_empty() || !flat.contains(keys::RAFFLES) {
        return Ok(stored);
    }

    let legacy: Vec<Raffle> = match flat.get(keys::RAFFLES) {
        Ok(Some(raffles)) => raffles,
        Ok(None) => return Ok(stored),
        Err(e) => {
            warn!(error = %e, "Legacy raffle payload is unreadable, ignoring it");
            return Ok(stored);
        }
    };
    mutations::replace_all_raffles(conn, &legacy)?;
    info!(count = legacy.len(), "Legacy raffles migrated into the store");
    Ok(legacy)
}

/// Loads all clients, importing the legacy flat-storage list when the
/// structured collection is empty.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the import write fails.
pub fn load_clients_with_migration(
    conn: &mut SqliteConnection,
    flat: &FlatStore,
) -> Result<Vec<Client>, PersistenceError> {
    let stored = queries::get_all_clients(conn)?;
    if !stored.is_empty() || !flat.contains(keys::CLIENTS) {
        return Ok(stored);
    }

    let legacy: Vec<Client> = match flat.get(keys::CLIENTS) {
        Ok(Some(clients)) => clients,
        Ok(None) => return Ok(stored),
        Err(e) => {
            warn!(error = %e, "Legacy client payload is unreadable, ignoring it");
            return Ok(stored);
        }
    };
    mutations::replace_all_clients(conn, &legacy)?;
    info!(count = legacy.len(), "Legacy clients migrated into the store");
    Ok(legacy)
}
