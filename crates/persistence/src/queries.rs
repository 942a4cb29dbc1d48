// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read operations over the structured store's collections.
//!
//! Every function takes a live connection and converts rows to domain
//! records at the boundary. A row that no longer parses as a domain record
//! surfaces as a `SerializationError` instead of being silently dropped.

use diesel::prelude::*;
use diesel::SqliteConnection;

use rifas_domain::{AccessCode, Client, Raffle};

use crate::data_models::{AccessCodeRow, ClientRow, RaffleRow, SettingRow};
use crate::diesel_schema::{access_codes, clients, raffles, settings};
use crate::error::PersistenceError;

/// Retrieves every raffle, ordered by id (creation order, since ids are
/// millisecond timestamps).
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn get_all_raffles(conn: &mut SqliteConnection) -> Result<Vec<Raffle>, PersistenceError> {
    raffles::table
        .order(raffles::id.asc())
        .load::<RaffleRow>(conn)?
        .into_iter()
        .map(Raffle::try_from)
        .collect()
}

/// Retrieves one raffle by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
pub fn get_raffle(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Raffle>, PersistenceError> {
    raffles::table
        .filter(raffles::id.eq(id))
        .first::<RaffleRow>(conn)
        .optional()?
        .map(Raffle::try_from)
        .transpose()
}

/// Retrieves every client, ordered by id.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn get_all_clients(conn: &mut SqliteConnection) -> Result<Vec<Client>, PersistenceError> {
    clients::table
        .order(clients::id.asc())
        .load::<ClientRow>(conn)?
        .into_iter()
        .map(Client::try_from)
        .collect()
}

/// Retrieves one client by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be converted.
pub fn get_client(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Client>, PersistenceError> {
    clients::table
        .filter(clients::id.eq(id))
        .first::<ClientRow>(conn)
        .optional()?
        .map(Client::try_from)
        .transpose()
}

/// Retrieves every access code.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_all_codes(conn: &mut SqliteConnection) -> Result<Vec<AccessCode>, PersistenceError> {
    Ok(access_codes::table
        .order(access_codes::generated_at.asc())
        .load::<AccessCodeRow>(conn)?
        .into_iter()
        .map(AccessCode::from)
        .collect())
}

/// Retrieves one access code by its code string.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<AccessCode>, PersistenceError> {
    Ok(access_codes::table
        .filter(access_codes::code.eq(code))
        .first::<AccessCodeRow>(conn)
        .optional()?
        .map(AccessCode::from))
}

/// Reads one settings value.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_setting(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<String>, PersistenceError> {
    Ok(settings::table
        .filter(settings::key.eq(key))
        .first::<SettingRow>(conn)
        .optional()?
        .map(|row| row.value))
}
