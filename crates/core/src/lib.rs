// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Working state and mutation operations for the Rifas Sucre raffle manager.
//!
//! [`AppState`] is the single in-memory mirror of the persisted store: every
//! raffle, every client, and the currently active raffle id. It is loaded
//! once at startup and owned by the top-level controller; UI layers read it
//! by reference and mutate it exclusively through the operations in this
//! crate, after which the caller persists the whole state through the
//! repository.
//!
//! Every operation validates its input first and leaves the state untouched
//! on error, so a rejected mutation never needs a rollback.

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

mod backup;
mod clients;
mod raffles;
mod session;
mod state;

#[cfg(test)]
mod tests;

pub use backup::BackupDocument;
pub use clients::{
    assign_numbers, delete_client, edit_client, remove_number, set_number_status,
};
pub use raffles::{create_raffle, delete_raffle, update_raffle};
pub use session::{ELEVATED_SESSION_LENGTH, ElevatedSession};
pub use state::{AppState, millis_id, rfc3339};
