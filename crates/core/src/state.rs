// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use rifas_domain::{Client, Raffle};

/// The process-wide working state: the in-memory mirror of everything the
/// store persists.
///
/// Owned by the top-level controller and passed by reference to whichever
/// component needs it; never ambient global state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    /// All raffles.
    pub raffles: Vec<Raffle>,
    /// All clients, across every raffle.
    pub clients: Vec<Client>,
    /// Id of the raffle currently selected for sale, if any.
    pub active_raffle: Option<String>,
}

impl AppState {
    /// Creates an empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raffles: Vec::new(),
            clients: Vec::new(),
            active_raffle: None,
        }
    }

    /// Looks up a raffle by id.
    #[must_use]
    pub fn raffle(&self, id: &str) -> Option<&Raffle> {
        self.raffles.iter().find(|raffle| raffle.id == id)
    }

    /// Looks up a client by id.
    #[must_use]
    pub fn client(&self, id: &str) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    /// The clients belonging to one raffle.
    pub fn clients_of<'a>(&'a self, raffle_id: &'a str) -> impl Iterator<Item = &'a Client> {
        self.clients
            .iter()
            .filter(move |client| client.raffle_id == raffle_id)
    }

    /// The currently active raffle, when one is set and still exists.
    #[must_use]
    pub fn active(&self) -> Option<&Raffle> {
        self.active_raffle
            .as_deref()
            .and_then(|id| self.raffle(id))
    }
}

/// Generates a time-derived opaque id: the unix epoch millisecond count as a
/// decimal string, matching the legacy id scheme.
#[must_use]
pub fn millis_id(now: OffsetDateTime) -> String {
    (now.unix_timestamp_nanos() / 1_000_000).to_string()
}

/// Renders an instant as an RFC 3339 timestamp string.
#[must_use]
pub fn rfc3339(now: OffsetDateTime) -> String {
    now.format(&Rfc3339).unwrap_or_default()
}
