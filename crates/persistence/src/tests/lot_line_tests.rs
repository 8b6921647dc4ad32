// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for lot reception line persistence.

use time::macros::date;
use tinturaria_domain::{DomainError, LotLine, LotLineKey, Quantity};

use crate::tests::{allocation, create_test_lot_line, create_test_persistence, test_section};
use crate::{NewLotLine, PendingFilter, PendingPage, Persistence, PersistenceError};

#[test]
fn test_create_lot_line_numbers_per_section_and_date() {
    let mut persistence: Persistence = create_test_persistence();
    let first: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let second: LotLine = create_test_lot_line(&mut persistence, 42, 5, 50.0);

    assert_eq!(first.key.line_no, 1);
    assert_eq!(second.key.line_no, 2);
    assert_eq!(first.delivered, Quantity::default());
}

#[test]
fn test_create_lot_line_rejects_zero_rolls() {
    let mut persistence: Persistence = create_test_persistence();
    let result = persistence.create_lot_line(&NewLotLine {
        section: test_section(),
        received_on: date!(2026 - 02 - 03),
        client_id: 42,
        client_name: String::from("Cliente 42"),
        article_code: 7,
        article_description: String::from("Jersey 30/1"),
        composition_code: 3,
        composition_description: String::from("100% CO"),
        requested: Quantity::new(0, 50.0),
        requisition: String::new(),
        recorded_by: String::new(),
    });

    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::InvalidQuantity { .. }
        ))
    ));
}

#[test]
fn test_get_lot_line_round_trip() {
    let mut persistence: Persistence = create_test_persistence();
    let created: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);

    let fetched: LotLine = persistence.get_lot_line(&created.key).unwrap();
    assert_eq!(fetched, created);
}

#[test]
fn test_get_lot_line_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let key = LotLineKey {
        section: test_section(),
        received_on: date!(2026 - 02 - 03),
        line_no: 99,
    };

    let result = persistence.get_lot_line(&key);
    assert!(matches!(
        result,
        Err(PersistenceError::LotLineNotFound { line_no: 99, .. })
    ));
}

#[test]
fn test_list_pending_excludes_fully_allocated() {
    let mut persistence: Persistence = create_test_persistence();
    let full: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let open: LotLine = create_test_lot_line(&mut persistence, 42, 5, 50.0);

    persistence
        .create_ticket(
            test_section(),
            date!(2026 - 02 - 04),
            "",
            &[allocation(&full, 10, 100.0)],
        )
        .unwrap();

    let page: PendingPage = persistence
        .list_pending_lot_lines(&PendingFilter::default())
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.lines.len(), 1);
    assert_eq!(page.lines[0].key, open.key);
}

#[test]
fn test_list_pending_filters_by_client_name() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_lot_line(&mut persistence, 42, 10, 100.0);
    create_test_lot_line(&mut persistence, 77, 5, 50.0);

    let page: PendingPage = persistence
        .list_pending_lot_lines(&PendingFilter {
            client_name: Some(String::from("cliente 77")),
            ..PendingFilter::default()
        })
        .unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.lines[0].client_id, 77);
}

#[test]
fn test_list_pending_pagination() {
    let mut persistence: Persistence = create_test_persistence();
    for _ in 0..3 {
        create_test_lot_line(&mut persistence, 42, 10, 100.0);
    }

    let page: PendingPage = persistence
        .list_pending_lot_lines(&PendingFilter {
            page: 1,
            per_page: 2,
            ..PendingFilter::default()
        })
        .unwrap();
    assert_eq!(page.lines.len(), 2);
    assert_eq!(page.total, 3);
    assert_eq!(page.total_pages, 2);

    let last: PendingPage = persistence
        .list_pending_lot_lines(&PendingFilter {
            page: 2,
            per_page: 2,
            ..PendingFilter::default()
        })
        .unwrap();
    assert_eq!(last.lines.len(), 1);
    // Most recent first: page 2 carries the earliest line.
    assert_eq!(last.lines[0].key.line_no, 1);
}

#[test]
fn test_delete_lot_line_without_allocations() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);

    persistence.delete_lot_line(&line.key).unwrap();
    assert!(matches!(
        persistence.get_lot_line(&line.key),
        Err(PersistenceError::LotLineNotFound { .. })
    ));
}

#[test]
fn test_delete_lot_line_rejected_after_allocation() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    persistence
        .create_ticket(
            test_section(),
            date!(2026 - 02 - 04),
            "",
            &[allocation(&line, 4, 40.0)],
        )
        .unwrap();

    let result = persistence.delete_lot_line(&line.key);
    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::DeleteAfterAllocation { .. }
        ))
    ));
    assert!(persistence.get_lot_line(&line.key).is_ok());
}

#[test]
fn test_failed_allocation_preserves_line_state() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);

    let result = persistence.create_ticket(
        test_section(),
        date!(2026 - 02 - 04),
        "",
        &[allocation(&line, 11, 50.0)],
    );
    assert!(matches!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::OverAllocation { .. }
        ))
    ));

    let after: LotLine = persistence.get_lot_line(&line.key).unwrap();
    assert_eq!(after.delivered, Quantity::default());
}
