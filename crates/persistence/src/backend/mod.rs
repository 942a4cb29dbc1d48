// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend utilities.
//!
//! The structured store runs on `SQLite` only; flat storage (the JSON
//! key-value file) is handled separately in the `flat` module.

pub mod sqlite;
