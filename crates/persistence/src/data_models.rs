// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs bridging the database schema and the domain types.
//!
//! Rows keep the column shapes Diesel needs (`i32` counters, wire strings)
//! and convert to and from domain records at the persistence boundary.
//! Ticket numbers are stored in their legacy comma-joined wire form so a
//! database row and a flat-storage record carry identical text.

use diesel::prelude::*;

use rifas_domain::{
    AccessCode, Client, ClientNumber, Raffle, TicketStatus, format_entries, parse_entries,
};

use crate::diesel_schema::{access_codes, clients, raffles, settings};
use crate::error::PersistenceError;

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = raffles)]
pub struct RaffleRow {
    pub id: String,
    pub name: String,
    pub total_numbers: i32,
    pub grid_columns: i32,
    pub per_grid: i32,
    pub price: f64,
    pub created_at: String,
}

impl TryFrom<RaffleRow> for Raffle {
    type Error = PersistenceError;

    fn try_from(row: RaffleRow) -> Result<Self, Self::Error> {
        let total_numbers = to_count(row.total_numbers, "total_numbers")?;
        let grid_columns = to_count(row.grid_columns, "grid_columns")?;
        let per_grid = to_count(row.per_grid, "per_grid")?;
        Ok(Self::new(
            row.id,
            row.name,
            total_numbers,
            grid_columns,
            per_grid,
            row.price,
            row.created_at,
        )?)
    }
}

impl TryFrom<&Raffle> for RaffleRow {
    type Error = PersistenceError;

    fn try_from(raffle: &Raffle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raffle.id.clone(),
            name: raffle.name.clone(),
            total_numbers: to_column(raffle.total_numbers, "total_numbers")?,
            grid_columns: to_column(raffle.grid_columns, "grid_columns")?,
            per_grid: to_column(raffle.per_grid, "per_grid")?,
            price: raffle.price,
            created_at: raffle.created_at.clone(),
        })
    }
}

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = clients)]
pub struct ClientRow {
    pub id: String,
    pub raffle_id: String,
    pub client_number: i32,
    pub name: String,
    pub phone: String,
    pub numbers: String,
    pub status: String,
    pub registered_at: String,
}

impl TryFrom<ClientRow> for Client {
    type Error = PersistenceError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let client_number = ClientNumber::new(to_count(row.client_number, "client_number")?);
        let numbers = parse_entries(&row.numbers)?;
        let status = row.status.parse::<TicketStatus>()?;
        Ok(Self {
            id: row.id,
            raffle_id: row.raffle_id,
            client_number,
            name: row.name,
            phone: row.phone,
            numbers,
            status,
            registered_at: row.registered_at,
        })
    }
}

impl TryFrom<&Client> for ClientRow {
    type Error = PersistenceError;

    fn try_from(client: &Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: client.id.clone(),
            raffle_id: client.raffle_id.clone(),
            client_number: to_column(client.client_number.value(), "client_number")?,
            name: client.name.clone(),
            phone: client.phone.clone(),
            numbers: format_entries(&client.numbers),
            status: client.status.as_str().to_string(),
            registered_at: client.registered_at.clone(),
        })
    }
}

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = access_codes)]
pub struct AccessCodeRow {
    pub code: String,
    pub expires_at: String,
    pub generated_at: String,
    pub generated_by: String,
    pub used: i32,
}

impl From<AccessCodeRow> for AccessCode {
    fn from(row: AccessCodeRow) -> Self {
        Self {
            code: row.code,
            expires_at: row.expires_at,
            generated_at: row.generated_at,
            generated_by: row.generated_by,
            used: row.used != 0,
        }
    }
}

impl From<&AccessCode> for AccessCodeRow {
    fn from(code: &AccessCode) -> Self {
        Self {
            code: code.code.clone(),
            expires_at: code.expires_at.clone(),
            generated_at: code.generated_at.clone(),
            generated_by: code.generated_by.clone(),
            used: i32::from(code.used),
        }
    }
}

#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = settings)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
}

fn to_count(value: i32, column: &str) -> Result<u32, PersistenceError> {
    u32::try_from(value).map_err(|_| {
        PersistenceError::SerializationError(format!("Negative value in column {column}: {value}"))
    })
}

fn to_column(value: u32, column: &str) -> Result<i32, PersistenceError> {
    i32::try_from(value).map_err(|_| {
        PersistenceError::SerializationError(format!("Value too large for column {column}: {value}"))
    })
}
