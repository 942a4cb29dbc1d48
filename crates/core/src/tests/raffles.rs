// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{state_with_active_raffle, test_instant};
use crate::{AppState, assign_numbers, create_raffle, delete_raffle, update_raffle};
use rifas_domain::DomainError;

#[test]
fn test_create_raffle_uses_millisecond_id_and_rfc3339_timestamp() {
    let mut state = AppState::new();
    let id = create_raffle(&mut state, "Test", 100, 10, 25, 5.0, test_instant(0)).unwrap();
    let raffle = state.raffle(&id).unwrap();
    assert!(id.parse::<i64>().is_ok());
    assert_eq!(raffle.created_at, "2026-01-10T12:00:00Z");
    assert_eq!(raffle.total_numbers, 100);
}

#[test]
fn test_create_raffle_trims_the_name() {
    let mut state = AppState::new();
    let id = create_raffle(&mut state, "  Test  ", 100, 10, 25, 5.0, test_instant(0)).unwrap();
    assert_eq!(state.raffle(&id).unwrap().name, "Test");
}

#[test]
fn test_create_raffle_rejects_blank_name() {
    let mut state = AppState::new();
    let result = create_raffle(&mut state, "   ", 100, 10, 25, 5.0, test_instant(0));
    assert_eq!(result, Err(DomainError::EmptyField("nombre")));
    assert!(state.raffles.is_empty());
}

#[test]
fn test_update_raffle_preserves_id_and_creation_date() {
    let (mut state, id) = state_with_active_raffle();
    let original_created = state.raffle(&id).unwrap().created_at.clone();
    update_raffle(&mut state, &id, "Renamed", 200, 20, 50, 2.5).unwrap();
    let raffle = state.raffle(&id).unwrap();
    assert_eq!(raffle.name, "Renamed");
    assert_eq!(raffle.total_numbers, 200);
    assert_eq!(raffle.created_at, original_created);
}

#[test]
fn test_update_raffle_unknown_id() {
    let mut state = AppState::new();
    let result = update_raffle(&mut state, "missing", "X", 10, 5, 5, 0.0);
    assert_eq!(
        result,
        Err(DomainError::RaffleNotFound(String::from("missing")))
    );
}

#[test]
fn test_delete_raffle_cascades_to_its_clients_only() {
    let (mut state, first) = state_with_active_raffle();
    let second =
        create_raffle(&mut state, "Second", 50, 10, 25, 1.0, test_instant(1)).unwrap();
    assign_numbers(&mut state, "Ana", "0414", "001", test_instant(2)).unwrap();
    state.active_raffle = Some(second.clone());
    assign_numbers(&mut state, "Luis", "0424", "001", test_instant(3)).unwrap();

    delete_raffle(&mut state, &first).unwrap();

    assert!(state.raffle(&first).is_none());
    assert_eq!(state.clients.len(), 1);
    assert_eq!(state.clients[0].raffle_id, second);
}

#[test]
fn test_delete_active_raffle_clears_the_selection() {
    let (mut state, id) = state_with_active_raffle();
    delete_raffle(&mut state, &id).unwrap();
    assert_eq!(state.active_raffle, None);
}

#[test]
fn test_delete_raffle_unknown_id() {
    let mut state = AppState::new();
    assert_eq!(
        delete_raffle(&mut state, "missing"),
        Err(DomainError::RaffleNotFound(String::from("missing")))
    );
}
