// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use tracing::info;

use rifas_domain::{DomainError, Raffle};

use crate::state::{AppState, millis_id, rfc3339};

/// Creates a raffle and returns its new id.
///
/// # Errors
///
/// Returns a `DomainError` when the name is blank, a dimension is zero, or
/// the price is negative; the state is untouched on error.
pub fn create_raffle(
    state: &mut AppState,
    name: &str,
    total_numbers: u32,
    grid_columns: u32,
    per_grid: u32,
    price: f64,
    now: OffsetDateTime,
) -> Result<String, DomainError> {
    let raffle = Raffle::new(
        millis_id(now),
        name.trim().to_string(),
        total_numbers,
        grid_columns,
        per_grid,
        price,
        rfc3339(now),
    )?;
    let id = raffle.id.clone();
    info!(raffle_id = %id, name = %raffle.name, "Raffle created");
    state.raffles.push(raffle);
    Ok(id)
}

/// Updates a raffle in place (rename, resize, reprice). The id and creation
/// timestamp are preserved.
///
/// # Errors
///
/// Returns `DomainError::RaffleNotFound` for an unknown id, or a validation
/// error for bad fields.
pub fn update_raffle(
    state: &mut AppState,
    id: &str,
    name: &str,
    total_numbers: u32,
    grid_columns: u32,
    per_grid: u32,
    price: f64,
) -> Result<(), DomainError> {
    let index = state
        .raffles
        .iter()
        .position(|raffle| raffle.id == id)
        .ok_or_else(|| DomainError::RaffleNotFound(id.to_string()))?;

    let updated = Raffle::new(
        id.to_string(),
        name.trim().to_string(),
        total_numbers,
        grid_columns,
        per_grid,
        price,
        state.raffles[index].created_at.clone(),
    )?;
    state.raffles[index] = updated;
    Ok(())
}

/// Deletes a raffle, cascading to every client that references it.
///
/// The client cascade happens before the raffle record goes away, and the
/// active-raffle selection is cleared when it pointed at the deleted raffle.
/// The caller must persist the resulting state as the final step.
///
/// # Errors
///
/// Returns `DomainError::RaffleNotFound` for an unknown id.
pub fn delete_raffle(state: &mut AppState, id: &str) -> Result<(), DomainError> {
    if state.raffle(id).is_none() {
        return Err(DomainError::RaffleNotFound(id.to_string()));
    }

    let before = state.clients.len();
    state.clients.retain(|client| client.raffle_id != id);
    state.raffles.retain(|raffle| raffle.id != id);
    if state.active_raffle.as_deref() == Some(id) {
        state.active_raffle = None;
    }
    info!(
        raffle_id = %id,
        cascaded_clients = before - state.clients.len(),
        "Raffle deleted"
    );
    Ok(())
}
