// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::connection::SimpleConnection;
use time::Duration;

use rifas_core::{AppState, assign_numbers, create_raffle, set_number_status};
use rifas_domain::{Client, Raffle, TicketStatus};

use super::{repo_with_flat, sample_client, sample_code, sample_raffle, test_instant};
use crate::flat::{FlatStore, keys};
use crate::gate::verify_code;
use crate::Repository;

fn empty_repo() -> Repository {
    repo_with_flat(FlatStore::in_memory())
}

#[test]
fn test_save_and_reload_a_full_working_state() {
    let mut repo = empty_repo();

    let mut state = AppState::new();
    let raffle_id =
        create_raffle(&mut state, "Test", 100, 10, 25, 5.0, test_instant(0)).unwrap();
    state.active_raffle = Some(raffle_id.clone());
    let client_id =
        assign_numbers(&mut state, "Ana", "0414", "001-005", test_instant(1)).unwrap();

    let outcome = repo.save_all(&state).unwrap();
    assert!(outcome.structured);
    assert!(outcome.flat);

    let reloaded = repo.load_all().unwrap();
    assert_eq!(reloaded, state);
    let client = reloaded.client(&client_id).unwrap();
    assert_eq!(client.numbers_display(), "001, 002, 003, 004, 005");
    assert_eq!(client.status, TicketStatus::Reserved);
    assert_eq!(reloaded.active_raffle, Some(raffle_id));
}

#[test]
fn test_status_toggle_survives_a_reload() {
    let mut repo = empty_repo();

    let mut state = AppState::new();
    let raffle_id =
        create_raffle(&mut state, "Test", 100, 10, 25, 5.0, test_instant(0)).unwrap();
    state.active_raffle = Some(raffle_id);
    let client_id =
        assign_numbers(&mut state, "Ana", "0414", "001-005", test_instant(1)).unwrap();
    set_number_status(&mut state, &client_id, 3, TicketStatus::Paid).unwrap();
    repo.save_all(&state).unwrap();

    let reloaded = repo.load_all().unwrap();
    let client = reloaded.client(&client_id).unwrap();
    assert_eq!(client.status_of(3), Some(TicketStatus::Paid));
    assert_eq!(client.status_of(1), Some(TicketStatus::Reserved));
}

#[test]
fn test_saves_mirror_into_flat_storage() {
    let mut repo = empty_repo();
    let raffles = vec![sample_raffle("100", 50)];
    repo.save_raffles(&raffles).unwrap();

    let mirrored: Vec<Raffle> = repo.flat.get(keys::RAFFLES).unwrap().unwrap();
    assert_eq!(mirrored, raffles);
}

#[test]
fn test_stale_active_raffle_is_dropped_on_load() {
    let mut repo = empty_repo();
    let state = AppState {
        raffles: vec![sample_raffle("100", 50)],
        clients: Vec::new(),
        active_raffle: Some(String::from("100")),
    };
    repo.save_all(&state).unwrap();
    repo.set_config(keys::ACTIVE_RAFFLE, "desaparecida").unwrap();

    let reloaded = repo.load_all().unwrap();
    assert_eq!(reloaded.active_raffle, None);
}

#[test]
fn test_delete_raffle_cascade_clears_clients_and_selection() {
    let mut repo = empty_repo();
    let state = AppState {
        raffles: vec![sample_raffle("100", 50), sample_raffle("200", 50)],
        clients: vec![
            sample_client("500", "100", 1, "001"),
            sample_client("501", "200", 2, "001"),
        ],
        active_raffle: Some(String::from("100")),
    };
    repo.save_all(&state).unwrap();

    repo.delete_raffle_cascade("100").unwrap();

    let reloaded = repo.load_all().unwrap();
    assert_eq!(reloaded.raffles.len(), 1);
    assert_eq!(reloaded.raffles[0].id, "200");
    assert_eq!(reloaded.clients.len(), 1);
    assert_eq!(reloaded.clients[0].raffle_id, "200");
    assert_eq!(reloaded.active_raffle, None);

    // The flat mirrors dropped the same records.
    let mirrored: Vec<Client> = repo.flat.get(keys::CLIENTS).unwrap().unwrap();
    assert_eq!(mirrored.len(), 1);
}

#[test]
fn test_flat_only_mode_round_trips_state() {
    let mut repo = Repository::flat_only(FlatStore::in_memory());
    assert!(!repo.has_structured_store());

    let state = AppState {
        raffles: vec![sample_raffle("100", 50)],
        clients: vec![sample_client("500", "100", 1, "001,002:pagado")],
        active_raffle: Some(String::from("100")),
    };
    let outcome = repo.save_all(&state).unwrap();
    assert!(!outcome.structured);
    assert!(outcome.flat);

    assert_eq!(repo.load_all().unwrap(), state);
}

#[test]
fn test_load_prefers_the_structured_store_over_a_stale_mirror() {
    let mut repo = empty_repo();
    repo.save_raffles(&[sample_raffle("100", 50)]).unwrap();

    // A stale mirror from an interrupted earlier run.
    repo.flat
        .set(keys::RAFFLES, &vec![sample_raffle("999", 10)])
        .unwrap();

    let state = repo.load_all().unwrap();
    assert_eq!(state.raffles.len(), 1);
    assert_eq!(state.raffles[0].id, "100");
}

#[test]
fn test_config_round_trips_and_mirrors() {
    let mut repo = empty_repo();
    repo.set_config(keys::APP_NAME, "Rifas Sucre").unwrap();

    assert_eq!(
        repo.get_config(keys::APP_NAME).unwrap(),
        Some(String::from("Rifas Sucre"))
    );
    assert_eq!(
        repo.flat.get::<String>(keys::APP_NAME).unwrap(),
        Some(String::from("Rifas Sucre"))
    );

    repo.delete_config(keys::APP_NAME).unwrap();
    assert_eq!(repo.get_config(keys::APP_NAME).unwrap(), None);
}

#[test]
fn test_structured_save_failure_leaves_a_complete_flat_mirror() {
    let mut repo = empty_repo();
    let conn = repo.conn.as_mut().unwrap();
    conn.batch_execute("DROP TABLE raffles").unwrap();

    let records = vec![sample_raffle("100", 50), sample_raffle("200", 80)];
    let outcome = repo.save_raffles(&records).unwrap();
    assert!(!outcome.structured);
    assert!(outcome.flat);
    assert!(outcome.durable());

    let mirrored: Vec<Raffle> = repo.flat.get(keys::RAFFLES).unwrap().unwrap();
    assert_eq!(mirrored, records);
}

#[test]
fn test_open_recovers_when_the_database_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("rifas.db");
    let flat_path = dir.path().join("almacen.json");
    std::fs::write(&db_path, b"no es una base de datos").unwrap();

    let mut flat = FlatStore::open(&flat_path).unwrap();
    flat.set(
        keys::VALID_CODES,
        &vec![sample_code("55555555", test_instant(0) + Duration::days(1))],
    )
    .unwrap();
    drop(flat);

    // Startup degrades instead of aborting, and the legacy payload stays in
    // place for the next healthy startup to migrate.
    let mut repo = Repository::open(&db_path, &flat_path).unwrap();
    assert!(!repo.has_structured_store());
    assert!(repo.flat.contains(keys::VALID_CODES));
    assert!(verify_code(&mut repo, "55555555", test_instant(60)).unwrap());
}

#[test]
fn test_file_backed_repository_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("rifas.db");
    let flat_path = dir.path().join("almacen.json");

    let mut repo = Repository::open(&db_path, &flat_path).unwrap();
    assert!(repo.has_structured_store());
    let state = AppState {
        raffles: vec![sample_raffle("100", 50)],
        clients: Vec::new(),
        active_raffle: None,
    };
    repo.save_all(&state).unwrap();
    drop(repo);

    let mut reopened = Repository::open(&db_path, &flat_path).unwrap();
    assert_eq!(reopened.load_all().unwrap(), state);
}
