// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types and rule validation for the Rifas Sucre raffle manager.
//!
//! A raffle is a named pool of sequentially numbered, priced tickets. Clients
//! hold one or more ticket numbers, each independently markable as reserved
//! (`apartado`) or paid (`pagado`). Access codes gate entry to the tool and
//! expire after a caller-chosen number of days.
//!
//! All serialized shapes keep the legacy wire names (`rifaId`, `totalNumeros`,
//! `numeroCliente`, ...) so that data written by earlier releases migrates
//! without translation. Rust-side names are English.

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

mod error;
mod numbers;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use numbers::{TicketEntry, format_entries, parse_entries, parse_number_input};
pub use types::{AccessCode, Client, ClientNumber, Raffle, TicketStatus};
pub use validation::{
    allocate_client_number, check_available, check_capacity, claimed_numbers,
};
