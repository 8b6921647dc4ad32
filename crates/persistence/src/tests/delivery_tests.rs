// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for delivery registration and ticket completion.

use tinturaria_domain::{DomainError, LotLine, Quantity, TicketState};

use crate::tests::{
    allocation, create_test_lot_line, create_test_persistence, create_test_ticket,
    seed_reference_data, test_section,
};
use crate::{DeliveryOutcome, Persistence, PersistenceError, TicketDetail};

#[test]
fn test_register_delivery_accumulates() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 15, 150.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 15, 150.0)]);

    let first: DeliveryOutcome = persistence
        .register_delivery(test_section(), ticket_no, Quantity::new(5, 50.0), 1, "")
        .unwrap();
    assert_eq!(first.line_no, 1);
    assert_eq!(first.cumulative, Quantity::new(5, 50.0));
    assert_eq!(first.state, TicketState::Open);

    let second: DeliveryOutcome = persistence
        .register_delivery(test_section(), ticket_no, Quantity::new(4, 40.0), 1, "")
        .unwrap();
    assert_eq!(second.line_no, 2);
    assert_eq!(second.cumulative, Quantity::new(9, 90.0));
    assert_eq!(second.state, TicketState::Open);

    let detail: TicketDetail = persistence.get_ticket(test_section(), ticket_no).unwrap();
    assert_eq!(detail.cumulative_delivered, Quantity::new(9, 90.0));
    assert_eq!(detail.deliveries.len(), 2);
}

#[test]
fn test_register_delivery_completes_ticket() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    let outcome: DeliveryOutcome = persistence
        .register_delivery(test_section(), ticket_no, Quantity::new(10, 100.0), 1, "")
        .unwrap();
    assert_eq!(outcome.state, TicketState::Completed);

    let detail: TicketDetail = persistence.get_ticket(test_section(), ticket_no).unwrap();
    assert_eq!(detail.ticket.state, TicketState::Completed);
}

#[test]
fn test_register_delivery_rejects_over_delivery() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    persistence
        .register_delivery(test_section(), ticket_no, Quantity::new(6, 60.0), 1, "")
        .unwrap();
    let result =
        persistence.register_delivery(test_section(), ticket_no, Quantity::new(5, 30.0), 1, "");
    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::OverDelivery { .. }
        ))
    ));

    // The rejected event left the log untouched.
    let detail: TicketDetail = persistence.get_ticket(test_section(), ticket_no).unwrap();
    assert_eq!(detail.cumulative_delivered, Quantity::new(6, 60.0));
    assert_eq!(detail.deliveries.len(), 1);
}

#[test]
fn test_register_delivery_rejects_completed_ticket() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 5, 50.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 5, 50.0)]);

    persistence
        .register_delivery(test_section(), ticket_no, Quantity::new(5, 50.0), 1, "")
        .unwrap();
    let result =
        persistence.register_delivery(test_section(), ticket_no, Quantity::new(0, 1.0), 1, "");
    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::TicketCompleted { .. }
        ))
    ));
}

#[test]
fn test_register_delivery_rejects_unknown_state() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    let result =
        persistence.register_delivery(test_section(), ticket_no, Quantity::new(1, 10.0), 99, "");
    assert!(matches!(
        result,
        Err(PersistenceError::DeliveryStateNotFound(99))
    ));
}

#[test]
fn test_register_delivery_rejects_zero_weight() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    let result =
        persistence.register_delivery(test_section(), ticket_no, Quantity::new(5, 0.0), 1, "");
    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidQuantity { .. }
        ))
    ));
}

#[test]
fn test_register_delivery_requires_ticket() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let result = persistence.register_delivery(test_section(), 9, Quantity::new(1, 10.0), 1, "");
    assert!(matches!(
        result,
        Err(PersistenceError::TicketNotFound { ticket_no: 9, .. })
    ));
}

#[test]
fn test_two_lot_flow_through_completion() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);

    // Two lots of the same client, aggregated into one ticket.
    let first: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let second: LotLine = create_test_lot_line(&mut persistence, 42, 5, 50.0);
    let ticket_no: u32 = create_test_ticket(
        &mut persistence,
        &[allocation(&first, 10, 100.0), allocation(&second, 5, 50.0)],
    );

    let detail: TicketDetail = persistence.get_ticket(test_section(), ticket_no).unwrap();
    assert_eq!(detail.ticket.totals, Quantity::new(15, 150.0));
    assert!(persistence
        .get_lot_line(&first.key)
        .unwrap()
        .is_fully_allocated());
    assert!(persistence
        .get_lot_line(&second.key)
        .unwrap()
        .is_fully_allocated());

    // Delivered in two partials, completing on the second.
    let partial: DeliveryOutcome = persistence
        .register_delivery(test_section(), ticket_no, Quantity::new(8, 80.0), 1, "")
        .unwrap();
    assert_eq!(partial.state, TicketState::Open);

    let last: DeliveryOutcome = persistence
        .register_delivery(test_section(), ticket_no, Quantity::new(7, 70.0), 1, "")
        .unwrap();
    assert_eq!(last.cumulative, Quantity::new(15, 150.0));
    assert_eq!(last.state, TicketState::Completed);

    let result =
        persistence.register_delivery(test_section(), ticket_no, Quantity::new(0, 1.0), 1, "");
    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::TicketCompleted { .. }
        ))
    ));
}
