// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use rifas_domain::{AccessCode, Client, Raffle};

use crate::state::{AppState, rfc3339};

/// A full portable export of the store, in the legacy backup shape.
///
/// The document carries every raffle and client, the accepted access codes,
/// the active-raffle selection, and the instant it was taken. Restoring a
/// document replaces the whole working state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    /// All raffles.
    #[serde(rename = "rifas")]
    pub raffles: Vec<Raffle>,
    /// All clients.
    #[serde(rename = "clientes")]
    pub clients: Vec<Client>,
    /// Previously accepted access codes.
    #[serde(rename = "codigosUsados", default)]
    pub accepted_codes: Vec<AccessCode>,
    /// Active raffle id at the time of the backup.
    #[serde(rename = "rifaActiva")]
    pub active_raffle: Option<String>,
    /// Instant the backup was taken, RFC 3339.
    #[serde(rename = "fechaRespaldo")]
    pub taken_at: String,
}

impl BackupDocument {
    /// Snapshots the working state (plus the accepted codes, which live
    /// outside it) into a document stamped at `now`.
    #[must_use]
    pub fn from_state(state: &AppState, accepted_codes: Vec<AccessCode>, now: OffsetDateTime) -> Self {
        Self {
            raffles: state.raffles.clone(),
            clients: state.clients.clone(),
            accepted_codes,
            active_raffle: state.active_raffle.clone(),
            taken_at: rfc3339(now),
        }
    }

    /// Consumes the document into a fresh working state, returning the
    /// accepted codes separately for the caller to reinstate.
    #[must_use]
    pub fn into_state(self) -> (AppState, Vec<AccessCode>) {
        (
            AppState {
                raffles: self.raffles,
                clients: self.clients,
                active_raffle: self.active_raffle,
            },
            self.accepted_codes,
        )
    }

    /// Renders the document as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying serialization error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses a document from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialization error.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
