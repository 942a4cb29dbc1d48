// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod raffles;
mod session;

use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{AppState, create_raffle};

/// A fixed base instant, offset by `seconds` so successive ids differ.
pub fn test_instant(seconds: i64) -> OffsetDateTime {
    datetime!(2026-01-10 12:00:00 UTC) + Duration::seconds(seconds)
}

/// A state holding one hundred-ticket raffle, already selected as active.
pub fn state_with_active_raffle() -> (AppState, String) {
    let mut state = AppState::new();
    let id = create_raffle(&mut state, "Rifa Navideña", 100, 10, 25, 5.0, test_instant(0))
        .unwrap();
    state.active_raffle = Some(id.clone());
    (state, id)
}
