// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
///
/// These are user-input errors: they are surfaced immediately and abort the
/// operation before any write happens.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A ticket number is not numeric.
    InvalidNumber(String),
    /// A range was given with the first number greater than the second.
    InvertedRange {
        /// First number of the range.
        start: u32,
        /// Last number of the range.
        end: u32,
    },
    /// A ticket number is outside the raffle's pool.
    NumberExceedsTotal {
        /// The offending number.
        number: u32,
        /// The raffle's total number count.
        total: u32,
    },
    /// Ticket numbers already claimed by another client of the same raffle.
    NumbersTaken(Vec<String>),
    /// A required text field is empty.
    EmptyField(&'static str),
    /// A raffle dimension (total, columns, per-grid) is not positive.
    InvalidDimension {
        /// The field name.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// The ticket price is negative.
    NegativePrice(f64),
    /// A ticket status string is neither `apartado` nor `pagado`.
    InvalidStatus(String),
    /// A client display number string is malformed.
    InvalidClientNumber(String),
    /// The referenced raffle does not exist.
    RaffleNotFound(String),
    /// The referenced client does not exist.
    ClientNotFound(String),
    /// No raffle is currently active, but the operation requires one.
    NoActiveRaffle,
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber(value) => write!(f, "Number '{value}' is not valid"),
            Self::InvertedRange { start, end } => {
                write!(f, "Range {start}-{end} is inverted: the first number must be lower")
            }
            Self::NumberExceedsTotal { number, total } => {
                write!(f, "Number {number:03} exceeds the raffle's total of {total} numbers")
            }
            Self::NumbersTaken(numbers) => {
                write!(f, "The following numbers are already taken: {}", numbers.join(", "))
            }
            Self::EmptyField(field) => write!(f, "Field '{field}' must not be empty"),
            Self::InvalidDimension { field, value } => {
                write!(f, "Invalid {field}: {value}. Must be greater than 0")
            }
            Self::NegativePrice(price) => {
                write!(f, "Invalid price: {price}. Must be zero or greater")
            }
            Self::InvalidStatus(value) => {
                write!(f, "Invalid ticket status '{value}': expected 'apartado' or 'pagado'")
            }
            Self::InvalidClientNumber(value) => {
                write!(f, "Invalid client number '{value}': expected the form '#NNN'")
            }
            Self::RaffleNotFound(id) => write!(f, "Raffle '{id}' not found"),
            Self::ClientNotFound(id) => write!(f, "Client '{id}' not found"),
            Self::NoActiveRaffle => write!(f, "No raffle is currently active"),
        }
    }
}

impl std::error::Error for DomainError {}
