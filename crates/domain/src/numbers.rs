// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The ticket-number wire format.
//!
//! A client's numbers travel as a single comma-joined string. Each entry is a
//! zero-padded number (`"003"`), optionally annotated with a per-number status
//! override (`"003:pagado"`). Entries without an annotation inherit the
//! client's overall status. This module types that format as
//! [`TicketEntry`] with a parse/format pair that reproduces the legacy text
//! byte for byte.

use std::collections::HashSet;

use crate::error::DomainError;
use crate::types::TicketStatus;

/// One ticket number held by a client, with an optional status override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketEntry {
    /// The ticket number.
    pub number: u32,
    /// Per-number status override; `None` inherits the client's status.
    pub status: Option<TicketStatus>,
}

impl TicketEntry {
    /// Creates an entry without a status override.
    #[must_use]
    pub const fn new(number: u32) -> Self {
        Self {
            number,
            status: None,
        }
    }

    /// Creates an entry with an explicit status override.
    #[must_use]
    pub const fn with_status(number: u32, status: TicketStatus) -> Self {
        Self {
            number,
            status: Some(status),
        }
    }

    /// The number rendered zero-padded to three digits (`7` → `"007"`).
    ///
    /// Numbers of four or more digits keep their natural width, matching the
    /// legacy padding behavior.
    #[must_use]
    pub fn formatted_number(&self) -> String {
        format!("{:03}", self.number)
    }

    /// Renders this entry in wire form: `"003"` or `"003:pagado"`.
    #[must_use]
    pub fn to_wire(&self) -> String {
        match self.status {
            Some(status) => format!("{:03}:{}", self.number, status.as_str()),
            None => self.formatted_number(),
        }
    }

    /// Parses one wire entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNumber` when the numeric part does not
    /// parse, or `DomainError::InvalidStatus` for an unknown annotation.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        match trimmed.split_once(':') {
            Some((number_part, status_part)) => {
                let number = parse_ticket_number(number_part)?;
                let status = status_part.parse::<TicketStatus>()?;
                Ok(Self::with_status(number, status))
            }
            None => Ok(Self::new(parse_ticket_number(trimmed)?)),
        }
    }
}

fn parse_ticket_number(raw: &str) -> Result<u32, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidNumber(raw.to_string()));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| DomainError::InvalidNumber(trimmed.to_string()))
}

/// Parses a comma-joined list of wire entries. The empty string parses to an
/// empty list.
///
/// # Errors
///
/// Returns the first entry-level parse error encountered.
pub fn parse_entries(raw: &str) -> Result<Vec<TicketEntry>, DomainError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    raw.split(',').map(TicketEntry::parse).collect()
}

/// Renders a list of entries back into the comma-joined wire form.
#[must_use]
pub fn format_entries(entries: &[TicketEntry]) -> String {
    entries
        .iter()
        .map(TicketEntry::to_wire)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses free-form user input into a deduplicated list of ticket numbers.
///
/// Accepts commas, periods, and whitespace as separators, and ranges written
/// `start-end` (`"010-050"` expands to the full run). Any `:status` suffix on
/// an individual token is dropped, since input tokens carry no settlement
/// state. Duplicates are collapsed, keeping first-seen order.
///
/// # Errors
///
/// Returns `DomainError::InvalidNumber` for non-numeric tokens and
/// `DomainError::InvertedRange` when a range's first number is greater than
/// its second.
pub fn parse_number_input(input: &str) -> Result<Vec<u32>, DomainError> {
    let mut numbers: Vec<u32> = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();

    for part in input.split([',', '.', ' ', '\t', '\n']) {
        let token = part.trim();
        if token.is_empty() {
            continue;
        }

        let token = token.split_once(':').map_or(token, |(head, _)| head);

        if let Some((start_raw, end_raw)) = token.split_once('-') {
            let start = parse_ticket_number(start_raw)
                .map_err(|_| DomainError::InvalidNumber(token.to_string()))?;
            let end = parse_ticket_number(end_raw)
                .map_err(|_| DomainError::InvalidNumber(token.to_string()))?;
            if start > end {
                return Err(DomainError::InvertedRange { start, end });
            }
            for number in start..=end {
                if seen.insert(number) {
                    numbers.push(number);
                }
            }
        } else {
            let number = parse_ticket_number(token)?;
            if seen.insert(number) {
                numbers.push(number);
            }
        }
    }

    Ok(numbers)
}

/// Serde adapter keeping `Client::numbers` typed in Rust while serializing
/// as the legacy comma-joined string.
pub(crate) mod wire {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::{TicketEntry, format_entries, parse_entries};

    pub fn serialize<S>(entries: &[TicketEntry], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_entries(entries))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<TicketEntry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_entries(&raw).map_err(D::Error::custom)
    }
}
