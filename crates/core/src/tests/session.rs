// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use super::test_instant;
use crate::{ELEVATED_SESSION_LENGTH, ElevatedSession};

#[test]
fn test_grant_rejects_a_wrong_secret() {
    assert!(ElevatedSession::grant("wrong", test_instant(0)).is_none());
    assert!(ElevatedSession::grant("mkgothicp.01", test_instant(0)).is_none());
    assert!(ElevatedSession::grant("", test_instant(0)).is_none());
}

#[test]
fn test_session_is_active_through_the_full_window() {
    let now = test_instant(0);
    let session = ElevatedSession::grant("Mkgothicp.01", now).unwrap();
    assert!(session.is_active(now));
    assert!(session.is_active(now + ELEVATED_SESSION_LENGTH));
}

#[test]
fn test_session_expires_after_the_window() {
    let now = test_instant(0);
    let session = ElevatedSession::grant("Mkgothicp.01", now).unwrap();
    assert!(!session.is_active(now + ELEVATED_SESSION_LENGTH + Duration::SECOND));
}
