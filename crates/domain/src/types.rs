// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::DomainError;
use crate::numbers::{self, TicketEntry};

/// Settlement state of a ticket number (or of a whole client).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    /// Reserved but not yet paid.
    #[default]
    #[serde(rename = "apartado")]
    Reserved,
    /// Paid in full.
    #[serde(rename = "pagado")]
    Paid,
}

impl TicketStatus {
    /// Converts this status to its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => "apartado",
            Self::Paid => "pagado",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apartado" => Ok(Self::Reserved),
            "pagado" => Ok(Self::Paid),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A client's human-facing sequential display number.
///
/// Unique across the whole dataset (not per raffle) and rendered as `#NNN`.
/// Freed numbers are reused: allocation always fills the lowest open slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClientNumber(u32);

impl ClientNumber {
    /// Creates a display number from its slot value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the slot value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ClientNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

impl TryFrom<String> for ClientNumber {
    type Error = DomainError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.strip_prefix('#')
            .and_then(|digits| digits.parse::<u32>().ok())
            .map(Self)
            .ok_or(DomainError::InvalidClientNumber(raw))
    }
}

impl From<ClientNumber> for String {
    fn from(number: ClientNumber) -> Self {
        number.to_string()
    }
}

/// A named pool of sequentially numbered, priced tickets.
///
/// Serialized field names keep the legacy wire shape. `precio` defaults to
/// zero because records written before pricing existed lack the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Raffle {
    /// Opaque unique id (unix-millisecond string).
    pub id: String,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Number of tickets in the pool; valid numbers are `0..total_numbers`.
    #[serde(rename = "totalNumeros")]
    pub total_numbers: u32,
    /// Column count of the display grid.
    #[serde(rename = "columnas")]
    pub grid_columns: u32,
    /// Numbers shown per grid page.
    #[serde(rename = "porGrilla")]
    pub per_grid: u32,
    /// Unit ticket price; zero is allowed.
    #[serde(rename = "precio", default)]
    pub price: f64,
    /// Creation timestamp, RFC 3339.
    #[serde(rename = "fechaCreacion")]
    pub created_at: String,
}

impl Raffle {
    /// Creates a raffle after validating its dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` for a blank name,
    /// `DomainError::InvalidDimension` for non-positive counts, and
    /// `DomainError::NegativePrice` for a price below zero.
    pub fn new(
        id: String,
        name: String,
        total_numbers: u32,
        grid_columns: u32,
        per_grid: u32,
        price: f64,
        created_at: String,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyField("nombre"));
        }
        if total_numbers == 0 {
            return Err(DomainError::InvalidDimension {
                field: "totalNumeros",
                value: 0,
            });
        }
        if grid_columns == 0 {
            return Err(DomainError::InvalidDimension {
                field: "columnas",
                value: 0,
            });
        }
        if per_grid == 0 {
            return Err(DomainError::InvalidDimension {
                field: "porGrilla",
                value: 0,
            });
        }
        if price < 0.0 {
            return Err(DomainError::NegativePrice(price));
        }
        Ok(Self {
            id,
            name,
            total_numbers,
            grid_columns,
            per_grid,
            price,
            created_at,
        })
    }
}

/// A participant holding ticket numbers in one raffle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Opaque unique id (unix-millisecond string).
    pub id: String,
    /// Owning raffle id.
    #[serde(rename = "rifaId")]
    pub raffle_id: String,
    /// Dataset-wide sequential display number.
    #[serde(rename = "numeroCliente")]
    pub client_number: ClientNumber,
    /// Client name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Phone number, digits as entered.
    #[serde(rename = "telefono")]
    pub phone: String,
    /// Held ticket numbers, typed in Rust but serialized as the legacy
    /// comma-joined string.
    #[serde(rename = "numeros", with = "numbers::wire")]
    pub numbers: Vec<TicketEntry>,
    /// Overall status inherited by entries without an override.
    #[serde(rename = "estado")]
    pub status: TicketStatus,
    /// Registration timestamp, RFC 3339.
    #[serde(rename = "fechaRegistro")]
    pub registered_at: String,
}

impl Client {
    /// Returns whether this client holds the given ticket number.
    #[must_use]
    pub fn holds_number(&self, number: u32) -> bool {
        self.numbers.iter().any(|entry| entry.number == number)
    }

    /// Effective status of one held number: the entry's override when set,
    /// otherwise the client's overall status. `None` when the number is not
    /// held.
    #[must_use]
    pub fn status_of(&self, number: u32) -> Option<TicketStatus> {
        self.numbers
            .iter()
            .find(|entry| entry.number == number)
            .map(|entry| entry.status.unwrap_or(self.status))
    }

    /// Sets an explicit status override on one held number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` when the client does not hold the
    /// number.
    pub fn set_number_status(
        &mut self,
        number: u32,
        status: TicketStatus,
    ) -> Result<(), DomainError> {
        let entry = self
            .numbers
            .iter_mut()
            .find(|entry| entry.number == number)
            .ok_or_else(|| DomainError::InvalidNumber(format!("{number:03}")))?;
        entry.status = Some(status);
        Ok(())
    }

    /// Removes one held number; returns `true` when the client now holds no
    /// numbers at all (the caller must then drop the client record).
    pub fn remove_number(&mut self, number: u32) -> bool {
        self.numbers.retain(|entry| entry.number != number);
        self.numbers.is_empty()
    }

    /// The held numbers without annotations, for display (`"001, 002"`).
    #[must_use]
    pub fn numbers_display(&self) -> String {
        self.numbers
            .iter()
            .map(TicketEntry::formatted_number)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An administrative access code with a natural expiry.
///
/// Codes are NOT consumed on successful validation: the `usado` flag is
/// carried for wire compatibility but validation never sets it, so a code
/// stays reusable until it expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessCode {
    /// The code string; also the record key.
    #[serde(rename = "codigo")]
    pub code: String,
    /// Expiration instant, RFC 3339.
    #[serde(rename = "expiracion")]
    pub expires_at: String,
    /// Generation instant, RFC 3339.
    #[serde(rename = "generadoEl")]
    pub generated_at: String,
    /// The principal that generated the code.
    #[serde(rename = "generadoPor")]
    pub generated_by: String,
    /// Legacy flag; never set by validation.
    #[serde(rename = "usado", default)]
    pub used: bool,
}

impl AccessCode {
    /// Returns whether the code is valid at `now`: valid iff
    /// `now <= expires_at`. An unparseable expiration is treated as expired.
    #[must_use]
    pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
        OffsetDateTime::parse(&self.expires_at, &Rfc3339)
            .map(|expires_at| now <= expires_at)
            .unwrap_or(false)
    }
}
