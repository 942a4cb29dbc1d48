// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations over the structured store's collections.
//!
//! Saves use the clear-then-bulk-insert pattern inside a transaction: the
//! in-memory state is the source of truth, and the collection is rewritten
//! to match it exactly. A failed transaction leaves the previous contents
//! untouched.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::OffsetDateTime;
use tracing::debug;

use rifas_domain::{AccessCode, Client, Raffle};

use crate::data_models::{AccessCodeRow, ClientRow, RaffleRow, SettingRow};
use crate::diesel_schema::{access_codes, clients, raffles, settings};
use crate::error::PersistenceError;

/// Inserts or replaces one raffle.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn put_raffle(conn: &mut SqliteConnection, raffle: &Raffle) -> Result<(), PersistenceError> {
    let row = RaffleRow::try_from(raffle)?;
    diesel::insert_into(raffles::table)
        .values(&row)
        .on_conflict(raffles::id)
        .do_update()
        .set(&row)
        .execute(conn)?;
    Ok(())
}

/// Rewrites the raffles collection to exactly the given records.
///
/// # Errors
///
/// Returns an error if the transaction fails; the previous contents survive.
pub fn replace_all_raffles(
    conn: &mut SqliteConnection,
    records: &[Raffle],
) -> Result<(), PersistenceError> {
    let rows = records
        .iter()
        .map(RaffleRow::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(raffles::table).execute(conn)?;
        diesel::insert_into(raffles::table)
            .values(&rows)
            .execute(conn)?;
        Ok(())
    })?;
    debug!(count = records.len(), "Raffles collection rewritten");
    Ok(())
}

/// Deletes one raffle row. Does not cascade; callers wanting the cascade go
/// through the repository.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_raffle(conn: &mut SqliteConnection, id: &str) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(raffles::table.filter(raffles::id.eq(id))).execute(conn)?)
}

/// Inserts or replaces one client.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn put_client(conn: &mut SqliteConnection, client: &Client) -> Result<(), PersistenceError> {
    let row = ClientRow::try_from(client)?;
    diesel::insert_into(clients::table)
        .values(&row)
        .on_conflict(clients::id)
        .do_update()
        .set(&row)
        .execute(conn)?;
    Ok(())
}

/// Rewrites the clients collection to exactly the given records.
///
/// # Errors
///
/// Returns an error if the transaction fails; the previous contents survive.
pub fn replace_all_clients(
    conn: &mut SqliteConnection,
    records: &[Client],
) -> Result<(), PersistenceError> {
    let rows = records
        .iter()
        .map(ClientRow::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::delete(clients::table).execute(conn)?;
        diesel::insert_into(clients::table)
            .values(&rows)
            .execute(conn)?;
        Ok(())
    })?;
    debug!(count = records.len(), "Clients collection rewritten");
    Ok(())
}

/// Deletes one client row.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_client(conn: &mut SqliteConnection, id: &str) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(clients::table.filter(clients::id.eq(id))).execute(conn)?)
}

/// Deletes every client belonging to one raffle. Returns the count removed.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_clients_of_raffle(
    conn: &mut SqliteConnection,
    raffle_id: &str,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(clients::table.filter(clients::raffle_id.eq(raffle_id))).execute(conn)?)
}

/// Inserts or replaces one access code.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn put_code(conn: &mut SqliteConnection, code: &AccessCode) -> Result<(), PersistenceError> {
    let row = AccessCodeRow::from(code);
    diesel::insert_into(access_codes::table)
        .values(&row)
        .on_conflict(access_codes::code)
        .do_update()
        .set(&row)
        .execute(conn)?;
    Ok(())
}

/// Deletes one access code.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_code(conn: &mut SqliteConnection, code: &str) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(access_codes::table.filter(access_codes::code.eq(code))).execute(conn)?)
}

/// Deletes every access code no longer valid at `now`. Returns the count
/// removed.
///
/// Expirations are compared as parsed instants, not as strings: RFC 3339
/// renderings vary in fractional-second width, so lexicographic order does
/// not match chronological order. A code whose expiration does not parse is
/// treated as expired.
///
/// # Errors
///
/// Returns an error if the read or the write fails.
pub fn delete_expired_codes(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    let expired: Vec<String> = crate::queries::get_all_codes(conn)?
        .into_iter()
        .filter(|code| !code.is_valid_at(now))
        .map(|code| code.code)
        .collect();
    if expired.is_empty() {
        return Ok(0);
    }
    Ok(
        diesel::delete(access_codes::table.filter(access_codes::code.eq_any(&expired)))
            .execute(conn)?,
    )
}

/// Writes one settings value, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn set_setting(
    conn: &mut SqliteConnection,
    key: &str,
    value: &str,
) -> Result<(), PersistenceError> {
    let row = SettingRow {
        key: key.to_string(),
        value: value.to_string(),
    };
    diesel::insert_into(settings::table)
        .values(&row)
        .on_conflict(settings::key)
        .do_update()
        .set(settings::value.eq(&row.value))
        .execute(conn)?;
    Ok(())
}

/// Removes one settings value.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn delete_setting(conn: &mut SqliteConnection, key: &str) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(settings::table.filter(settings::key.eq(key))).execute(conn)?)
}
