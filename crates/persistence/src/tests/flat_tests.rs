// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use crate::flat::{FlatStore, keys};

#[test]
fn test_missing_key_reads_back_as_none() {
    let flat = FlatStore::in_memory();
    assert!(!flat.contains(keys::APP_NAME));
    assert_eq!(flat.get::<String>(keys::APP_NAME).unwrap(), None);
}

#[test]
fn test_set_then_get_round_trips_typed_values() {
    let mut flat = FlatStore::in_memory();
    flat.set(keys::APP_NAME, &"Rifas Sucre").unwrap();
    flat.set(keys::ACTIVE_RAFFLE, &"1736510400000").unwrap();

    assert_eq!(
        flat.get::<String>(keys::APP_NAME).unwrap(),
        Some(String::from("Rifas Sucre"))
    );
    assert!(flat.contains(keys::ACTIVE_RAFFLE));
}

#[test]
fn test_remove_reports_presence() {
    let mut flat = FlatStore::in_memory();
    flat.set("clave", &1).unwrap();
    assert!(flat.remove("clave").unwrap());
    assert!(!flat.remove("clave").unwrap());
}

#[test]
fn test_wrong_type_is_a_serialization_error() {
    let mut flat = FlatStore::in_memory();
    flat.set("clave", &"texto").unwrap();
    let result = flat.get::<u32>("clave");
    assert!(matches!(
        result,
        Err(PersistenceError::SerializationError(_))
    ));
}

#[test]
fn test_file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("almacen.json");

    let mut flat = FlatStore::open(&path).unwrap();
    flat.set(keys::APP_NAME, &"Rifas Sucre").unwrap();
    drop(flat);

    let reopened = FlatStore::open(&path).unwrap();
    assert_eq!(
        reopened.get::<String>(keys::APP_NAME).unwrap(),
        Some(String::from("Rifas Sucre"))
    );
}

#[test]
fn test_missing_file_starts_empty_without_creating_it() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nuevo.json");
    let flat = FlatStore::open(&path).unwrap();
    assert!(!flat.contains(keys::APP_NAME));
    assert!(!path.exists());
}

#[test]
fn test_corrupt_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roto.json");
    std::fs::write(&path, "{not json").unwrap();

    let result = FlatStore::open(&path);
    assert!(matches!(result, Err(PersistenceError::FlatReadFailed(_))));
}
