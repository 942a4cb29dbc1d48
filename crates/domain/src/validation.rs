// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-time checks for ticket assignment.
//!
//! Uniqueness is enforced by scanning the existing clients of the target
//! raffle at write time; there is no index to consult. Capacity bounds every
//! accepted number to `0..total_numbers` of the owning raffle.

use std::collections::HashSet;

use crate::error::DomainError;
use crate::types::{Client, ClientNumber, Raffle};

/// Rejects any number at or beyond the raffle's pool size.
///
/// # Errors
///
/// Returns `DomainError::NumberExceedsTotal` for the first offending number.
pub fn check_capacity(numbers: &[u32], raffle: &Raffle) -> Result<(), DomainError> {
    for &number in numbers {
        if number >= raffle.total_numbers {
            return Err(DomainError::NumberExceedsTotal {
                number,
                total: raffle.total_numbers,
            });
        }
    }
    Ok(())
}

/// Collects every ticket number already held within one raffle, optionally
/// ignoring one client (used when editing that client's own list).
#[must_use]
pub fn claimed_numbers(
    clients: &[Client],
    raffle_id: &str,
    exclude_client: Option<&str>,
) -> HashSet<u32> {
    clients
        .iter()
        .filter(|client| client.raffle_id == raffle_id)
        .filter(|client| exclude_client != Some(client.id.as_str()))
        .flat_map(|client| client.numbers.iter().map(|entry| entry.number))
        .collect()
}

/// Rejects numbers already claimed by another client of the same raffle.
///
/// # Errors
///
/// Returns `DomainError::NumbersTaken` listing every conflicting number in
/// zero-padded form.
pub fn check_available(numbers: &[u32], claimed: &HashSet<u32>) -> Result<(), DomainError> {
    let taken: Vec<String> = numbers
        .iter()
        .filter(|number| claimed.contains(number))
        .map(|number| format!("{number:03}"))
        .collect();
    if taken.is_empty() {
        Ok(())
    } else {
        Err(DomainError::NumbersTaken(taken))
    }
}

/// Allocates the next client display number: the lowest slot not currently in
/// use across the whole dataset, or one past the maximum when there is no
/// gap. Freed slots are deliberately reused.
#[must_use]
pub fn allocate_client_number(clients: &[Client]) -> ClientNumber {
    let in_use: HashSet<u32> = clients
        .iter()
        .map(|client| client.client_number.value())
        .collect();
    let max = in_use.iter().copied().max().unwrap_or(0);

    for slot in 1..=max {
        if !in_use.contains(&slot) {
            return ClientNumber::new(slot);
        }
    }
    ClientNumber::new(max + 1)
}
