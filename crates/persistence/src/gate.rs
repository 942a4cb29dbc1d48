// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The access gate: code verification at startup and code administration.
//!
//! Entry to the application requires an unexpired access code. A code is
//! valid while `now` is at or before its expiration and is NOT consumed by
//! verification; the same code reopens the application any number of times
//! until it expires. The last accepted code is remembered as a configuration
//! entry so a restart inside the code's lifetime skips the prompt.

use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};

use rifas_core::rfc3339;
use rifas_domain::AccessCode;

use crate::error::PersistenceError;
use crate::flat::keys;
use crate::Repository;

/// The principal recorded on every generated code.
pub const CODE_GENERATOR: &str = "superusuario";

/// The remembered gate pass: which code was accepted and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastAccess {
    /// The accepted code string.
    #[serde(rename = "codigo")]
    pub code: String,
    /// When it was accepted, RFC 3339.
    #[serde(rename = "fecha")]
    pub accepted_at: String,
}

/// Checks a candidate code against the stored codes.
///
/// Returns `true` when the code exists and has not expired at `now`. The
/// code is left untouched either way.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn verify_code(
    repo: &mut Repository,
    code: &str,
    now: OffsetDateTime,
) -> Result<bool, PersistenceError> {
    let Some(stored) = repo.find_code(code.trim())? else {
        debug!("Access code not found");
        return Ok(false);
    };
    Ok(stored.is_valid_at(now))
}

/// Remembers an accepted code so later launches inside its lifetime skip
/// the prompt.
///
/// The record is a configuration entry, written to the structured settings
/// collection with the usual flat mirror.
///
/// # Errors
///
/// Returns `PersistenceError::NothingDurable` when neither backend accepted
/// the write.
pub fn record_accepted_code(
    repo: &mut Repository,
    code: &str,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let last = LastAccess {
        code: code.trim().to_string(),
        accepted_at: rfc3339(now),
    };
    repo.set_config(keys::LAST_ACCESS, &serde_json::to_string(&last)?)
}

/// Attempts to pass the gate with the remembered code.
///
/// Returns `true` when a remembered code exists and still verifies. A
/// remembered code that expired, disappeared, or does not parse is
/// forgotten, so the next launch prompts again.
///
/// # Errors
///
/// Returns an error if a backend cannot be read or the forget-write fails.
pub fn resume_session(repo: &mut Repository, now: OffsetDateTime) -> Result<bool, PersistenceError> {
    let Some(payload) = repo.get_config(keys::LAST_ACCESS)? else {
        return Ok(false);
    };
    let Ok(last) = serde_json::from_str::<LastAccess>(&payload) else {
        repo.delete_config(keys::LAST_ACCESS)?;
        return Ok(false);
    };
    if verify_code(repo, &last.code, now)? {
        debug!("Previous access code still valid, session resumed");
        return Ok(true);
    }
    repo.delete_config(keys::LAST_ACCESS)?;
    Ok(false)
}

/// Generates and stores a fresh access code valid for `days` days from
/// `now`. Returns the stored code.
///
/// Codes are eight random digits, zero-padded. The code lands in the
/// structured store and in the flat backup list, so it remains verifiable
/// when the database later cannot be opened.
///
/// # Errors
///
/// Returns `PersistenceError::NothingDurable` when neither backend accepted
/// the write.
pub fn generate_code(
    repo: &mut Repository,
    days: u32,
    now: OffsetDateTime,
) -> Result<AccessCode, PersistenceError> {
    let digits = rand::random::<u64>() % 100_000_000;
    let code = AccessCode {
        code: format!("{digits:08}"),
        expires_at: rfc3339(now + Duration::days(i64::from(days))),
        generated_at: rfc3339(now),
        generated_by: CODE_GENERATOR.to_string(),
        used: false,
    };
    repo.put_code(&code)?;
    info!(code = %code.code, expires_at = %code.expires_at, "Access code generated");
    Ok(code)
}

/// Deletes every code that expired before `now`. Returns the count removed.
///
/// # Errors
///
/// Returns an error if the store rejects the delete.
pub fn prune_expired_codes(
    repo: &mut Repository,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    let removed = repo.delete_codes_expired_before(now)?;
    if removed > 0 {
        info!(removed, "Expired access codes pruned");
    }
    Ok(removed)
}
