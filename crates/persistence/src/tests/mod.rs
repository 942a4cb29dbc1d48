// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod flat_tests;
mod repository_tests;

use std::sync::atomic::Ordering;

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use rifas_core::rfc3339;
use rifas_domain::{AccessCode, Client, ClientNumber, Raffle, TicketStatus, parse_entries};

use crate::flat::FlatStore;
use crate::{DB_COUNTER, Repository, backend};

/// A fixed base instant, offset by `seconds` where a test needs distinct
/// timestamps.
pub fn test_instant(seconds: i64) -> OffsetDateTime {
    datetime!(2026-01-10 12:00:00 UTC) + Duration::seconds(seconds)
}

/// Opens a repository over a unique in-memory database and the given flat
/// store, running the eager code migration exactly as the constructors do.
pub fn repo_with_flat(mut flat: FlatStore) -> Repository {
    let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    let url = format!("file:memdb_rifas_test_{db_id}?mode=memory&cache=shared");
    let mut conn = backend::sqlite::initialize_database(&url).unwrap();
    crate::migration::migrate_legacy_codes(&mut conn, &mut flat).unwrap();
    Repository {
        conn: Some(conn),
        flat,
    }
}

pub fn sample_raffle(id: &str, total: u32) -> Raffle {
    Raffle::new(
        id.to_string(),
        format!("Rifa {id}"),
        total,
        10,
        25,
        5.0,
        rfc3339(test_instant(0)),
    )
    .unwrap()
}

pub fn sample_client(id: &str, raffle_id: &str, slot: u32, numbers: &str) -> Client {
    Client {
        id: id.to_string(),
        raffle_id: raffle_id.to_string(),
        client_number: ClientNumber::new(slot),
        name: format!("Cliente {slot}"),
        phone: String::from("0414-5551234"),
        numbers: parse_entries(numbers).unwrap(),
        status: TicketStatus::Reserved,
        registered_at: rfc3339(test_instant(0)),
    }
}

pub fn sample_code(code: &str, expires_at: OffsetDateTime) -> AccessCode {
    AccessCode {
        code: code.to_string(),
        expires_at: rfc3339(expires_at),
        generated_at: rfc3339(test_instant(0)),
        generated_by: String::from("superusuario"),
        used: false,
    }
}
