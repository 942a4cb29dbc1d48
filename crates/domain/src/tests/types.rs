// Copyright (C) 2026 Rifas Sucre
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::{create_test_client, create_test_raffle};
use crate::{AccessCode, ClientNumber, DomainError, Raffle, TicketStatus};

#[test]
fn test_raffle_rejects_zero_total() {
    let result = Raffle::new(
        String::from("1"),
        String::from("Test"),
        0,
        10,
        25,
        5.0,
        String::from("2026-01-10T12:00:00Z"),
    );
    assert!(matches!(
        result,
        Err(DomainError::InvalidDimension {
            field: "totalNumeros",
            ..
        })
    ));
}

#[test]
fn test_raffle_rejects_negative_price() {
    let result = Raffle::new(
        String::from("1"),
        String::from("Test"),
        100,
        10,
        25,
        -1.0,
        String::from("2026-01-10T12:00:00Z"),
    );
    assert_eq!(result, Err(DomainError::NegativePrice(-1.0)));
}

#[test]
fn test_raffle_zero_price_is_allowed() {
    let result = Raffle::new(
        String::from("1"),
        String::from("Test"),
        100,
        10,
        25,
        0.0,
        String::from("2026-01-10T12:00:00Z"),
    );
    assert!(result.is_ok());
}

#[test]
fn test_raffle_wire_shape_uses_legacy_names() {
    let raffle = create_test_raffle("1736510400000", 100);
    let json = serde_json::to_value(&raffle).unwrap();
    assert_eq!(json["totalNumeros"], 100);
    assert_eq!(json["porGrilla"], 25);
    assert_eq!(json["nombre"], "Rifa Navideña");
}

#[test]
fn test_raffle_deserializes_without_price() {
    // Records written before pricing existed have no `precio` field.
    let json = r#"{"id":"1","nombre":"Vieja","totalNumeros":50,"columnas":5,
        "porGrilla":10,"fechaCreacion":"2024-05-01T00:00:00Z"}"#;
    let raffle: Raffle = serde_json::from_str(json).unwrap();
    assert_eq!(raffle.price, 0.0);
}

#[test]
fn test_client_number_wire_form() {
    let number = ClientNumber::new(7);
    assert_eq!(number.to_string(), "#007");
    let parsed: ClientNumber = serde_json::from_str("\"#007\"").unwrap();
    assert_eq!(parsed, number);
}

#[test]
fn test_client_number_rejects_missing_hash() {
    let result: Result<ClientNumber, _> = serde_json::from_str("\"007\"");
    assert!(result.is_err());
}

#[test]
fn test_client_status_of_honors_override() {
    let client = create_test_client("c1", "r1", 1, "001,002:pagado");
    assert_eq!(client.status_of(1), Some(TicketStatus::Reserved));
    assert_eq!(client.status_of(2), Some(TicketStatus::Paid));
    assert_eq!(client.status_of(3), None);
}

#[test]
fn test_client_set_number_status() {
    let mut client = create_test_client("c1", "r1", 1, "001,002");
    client.set_number_status(2, TicketStatus::Paid).unwrap();
    assert_eq!(client.status_of(2), Some(TicketStatus::Paid));
    // The sibling number keeps inheriting the overall status.
    assert_eq!(client.status_of(1), Some(TicketStatus::Reserved));
}

#[test]
fn test_client_remove_last_number_reports_empty() {
    let mut client = create_test_client("c1", "r1", 1, "001");
    assert!(client.remove_number(1));
    assert!(client.numbers.is_empty());
}

#[test]
fn test_client_wire_round_trip() {
    let client = create_test_client("c1", "r1", 3, "001,002:pagado");
    let json = serde_json::to_string(&client).unwrap();
    assert!(json.contains("\"numeros\":\"001,002:pagado\""));
    assert!(json.contains("\"numeroCliente\":\"#003\""));
    let back: crate::Client = serde_json::from_str(&json).unwrap();
    assert_eq!(back, client);
}

#[test]
fn test_access_code_validity_window() {
    let now = OffsetDateTime::parse("2026-03-01T12:00:00Z", &Rfc3339).unwrap();
    let code = AccessCode {
        code: String::from("12345678"),
        expires_at: String::from("2026-03-08T12:00:00Z"),
        generated_at: String::from("2026-03-01T12:00:00Z"),
        generated_by: String::from("superusuario"),
        used: false,
    };
    assert!(code.is_valid_at(now));
    // Exactly at expiration still counts as valid.
    let at_expiry = OffsetDateTime::parse("2026-03-08T12:00:00Z", &Rfc3339).unwrap();
    assert!(code.is_valid_at(at_expiry));
    let after = at_expiry + time::Duration::milliseconds(2);
    assert!(!code.is_valid_at(after));
}

#[test]
fn test_access_code_with_garbage_expiry_is_invalid() {
    let code = AccessCode {
        code: String::from("12345678"),
        expires_at: String::from("not-a-date"),
        generated_at: String::from("2026-03-01T12:00:00Z"),
        generated_by: String::from("superusuario"),
        used: false,
    };
    assert!(!code.is_valid_at(OffsetDateTime::now_utc()));
}
