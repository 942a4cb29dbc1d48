// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Duration, OffsetDateTime};
use tracing::info;

/// How long an elevated session stays active after the secret is entered.
pub const ELEVATED_SESSION_LENGTH: Duration = Duration::HOUR;

/// The fixed maintenance secret. Matching it grants code-generation rights
/// for [`ELEVATED_SESSION_LENGTH`].
const MAINTENANCE_SECRET: &str = "Mkgothicp.01";

/// An in-memory elevated (superuser) session.
///
/// Granted only by the fixed maintenance secret and never persisted: a
/// restart always drops elevation. The session expires on its own after
/// [`ELEVATED_SESSION_LENGTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElevatedSession {
    started_at: OffsetDateTime,
}

impl ElevatedSession {
    /// Attempts to start an elevated session. Returns `None` when the
    /// secret does not match; the comparison is exact and case-sensitive.
    #[must_use]
    pub fn grant(secret: &str, now: OffsetDateTime) -> Option<Self> {
        if secret == MAINTENANCE_SECRET {
            info!("Elevated session granted");
            Some(Self { started_at: now })
        } else {
            None
        }
    }

    /// Whether the session is still inside its window at `now`.
    #[must_use]
    pub fn is_active(&self, now: OffsetDateTime) -> bool {
        now - self.started_at <= ELEVATED_SESSION_LENGTH
    }

    /// The instant elevation was granted.
    #[must_use]
    pub const fn started_at(&self) -> OffsetDateTime {
        self.started_at
    }
}
