// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use tracing::{debug, info};

use rifas_domain::{
    Client, DomainError, TicketEntry, TicketStatus, allocate_client_number, check_available,
    check_capacity, claimed_numbers, parse_number_input,
};

use crate::state::{AppState, millis_id, rfc3339};

/// Registers a new client holding the numbers given as free-form input
/// (`"1, 2, 10-15"`). Operates on the active raffle and returns the new
/// client id.
///
/// The display number is allocated dataset-wide at the lowest open slot.
/// Fresh entries carry no per-number override; they inherit the client's
/// overall `Reserved` status.
///
/// # Errors
///
/// Returns `DomainError::NoActiveRaffle` when no raffle is selected,
/// `DomainError::EmptyField` for blank name/phone/numbers, a parse error for
/// bad number input, `DomainError::NumberExceedsTotal` for out-of-range
/// numbers, and `DomainError::NumbersTaken` listing every conflict.
pub fn assign_numbers(
    state: &mut AppState,
    name: &str,
    phone: &str,
    numbers_input: &str,
    now: OffsetDateTime,
) -> Result<String, DomainError> {
    let raffle = state.active().ok_or(DomainError::NoActiveRaffle)?.clone();

    if name.trim().is_empty() {
        return Err(DomainError::EmptyField("nombre"));
    }
    if phone.trim().is_empty() {
        return Err(DomainError::EmptyField("telefono"));
    }

    let numbers = parse_number_input(numbers_input)?;
    if numbers.is_empty() {
        return Err(DomainError::EmptyField("numeros"));
    }

    check_capacity(&numbers, &raffle)?;
    let claimed = claimed_numbers(&state.clients, &raffle.id, None);
    check_available(&numbers, &claimed)?;

    let client = Client {
        id: millis_id(now),
        raffle_id: raffle.id.clone(),
        client_number: allocate_client_number(&state.clients),
        name: name.trim().to_string(),
        phone: phone.trim().to_string(),
        numbers: numbers.into_iter().map(TicketEntry::new).collect(),
        status: TicketStatus::Reserved,
        registered_at: rfc3339(now),
    };
    let id = client.id.clone();
    info!(
        client_id = %id,
        raffle_id = %raffle.id,
        client_number = %client.client_number,
        count = client.numbers.len(),
        "Client registered"
    );
    state.clients.push(client);
    Ok(id)
}

/// Edits a client's name, phone, overall status, and held numbers.
///
/// Availability is checked against every other client of the same raffle;
/// the edited client's own holdings never conflict with themselves. Numbers
/// the client already held keep their per-number status override; numbers
/// new to the client start without one.
///
/// # Errors
///
/// Returns `DomainError::ClientNotFound` for an unknown id, plus the same
/// validation errors as [`assign_numbers`].
pub fn edit_client(
    state: &mut AppState,
    id: &str,
    name: &str,
    phone: &str,
    numbers_input: &str,
    status: TicketStatus,
) -> Result<(), DomainError> {
    let index = state
        .clients
        .iter()
        .position(|client| client.id == id)
        .ok_or_else(|| DomainError::ClientNotFound(id.to_string()))?;
    let raffle_id = state.clients[index].raffle_id.clone();
    let raffle = state
        .raffle(&raffle_id)
        .ok_or_else(|| DomainError::RaffleNotFound(raffle_id.clone()))?
        .clone();

    if name.trim().is_empty() {
        return Err(DomainError::EmptyField("nombre"));
    }
    if phone.trim().is_empty() {
        return Err(DomainError::EmptyField("telefono"));
    }

    let numbers = parse_number_input(numbers_input)?;
    if numbers.is_empty() {
        return Err(DomainError::EmptyField("numeros"));
    }

    check_capacity(&numbers, &raffle)?;
    let claimed = claimed_numbers(&state.clients, &raffle_id, Some(id));
    check_available(&numbers, &claimed)?;

    let entries = {
        let existing = &state.clients[index];
        numbers
            .into_iter()
            .map(|number| {
                existing
                    .numbers
                    .iter()
                    .find(|entry| entry.number == number)
                    .copied()
                    .unwrap_or_else(|| TicketEntry::new(number))
            })
            .collect()
    };

    let client = &mut state.clients[index];
    client.name = name.trim().to_string();
    client.phone = phone.trim().to_string();
    client.numbers = entries;
    client.status = status;
    debug!(client_id = %id, "Client edited");
    Ok(())
}

/// Sets a per-number status override on one of a client's held numbers.
///
/// # Errors
///
/// Returns `DomainError::ClientNotFound` for an unknown client and
/// `DomainError::InvalidNumber` when the client does not hold the number.
pub fn set_number_status(
    state: &mut AppState,
    client_id: &str,
    number: u32,
    status: TicketStatus,
) -> Result<(), DomainError> {
    let client = state
        .clients
        .iter_mut()
        .find(|client| client.id == client_id)
        .ok_or_else(|| DomainError::ClientNotFound(client_id.to_string()))?;
    client.set_number_status(number, status)
}

/// Releases one number from a client. When that was the client's last
/// number the whole record is dropped; returns `true` in that case.
///
/// # Errors
///
/// Returns `DomainError::ClientNotFound` for an unknown client and
/// `DomainError::InvalidNumber` when the client does not hold the number.
pub fn remove_number(
    state: &mut AppState,
    client_id: &str,
    number: u32,
) -> Result<bool, DomainError> {
    let index = state
        .clients
        .iter()
        .position(|client| client.id == client_id)
        .ok_or_else(|| DomainError::ClientNotFound(client_id.to_string()))?;

    if !state.clients[index].holds_number(number) {
        return Err(DomainError::InvalidNumber(format!("{number:03}")));
    }

    let emptied = state.clients[index].remove_number(number);
    if emptied {
        info!(client_id = %client_id, "Client released last number, record dropped");
        state.clients.remove(index);
    }
    Ok(emptied)
}

/// Deletes a client record outright, releasing all its numbers.
///
/// # Errors
///
/// Returns `DomainError::ClientNotFound` for an unknown id.
pub fn delete_client(state: &mut AppState, client_id: &str) -> Result<(), DomainError> {
    let index = state
        .clients
        .iter()
        .position(|client| client.id == client_id)
        .ok_or_else(|| DomainError::ClientNotFound(client_id.to_string()))?;
    let removed = state.clients.remove(index);
    info!(client_id = %removed.id, raffle_id = %removed.raffle_id, "Client deleted");
    Ok(())
}
