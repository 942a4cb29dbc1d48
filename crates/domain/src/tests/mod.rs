// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod types;

use crate::{Client, ClientNumber, Raffle, TicketStatus, parse_entries};

pub fn create_test_raffle(id: &str, total: u32) -> Raffle {
    Raffle::new(
        id.to_string(),
        String::from("Rifa Navideña"),
        total,
        10,
        25,
        5.0,
        String::from("2026-01-10T12:00:00Z"),
    )
    .unwrap()
}

pub fn create_test_client(id: &str, raffle_id: &str, slot: u32, numbers: &str) -> Client {
    Client {
        id: id.to_string(),
        raffle_id: raffle_id.to_string(),
        client_number: ClientNumber::new(slot),
        name: String::from("Maria"),
        phone: String::from("04141234567"),
        numbers: parse_entries(numbers).unwrap(),
        status: TicketStatus::Reserved,
        registered_at: String::from("2026-01-11T09:30:00Z"),
    }
}
