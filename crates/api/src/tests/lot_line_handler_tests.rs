// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the reception lot line handlers.

use tinturaria_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    CreateLotLineRequest, DeleteLotLineResponse, ListPendingResponse, LotLineInfo, PendingQuery,
};
use crate::tests::helpers::{
    create_test_lot_line, create_test_persistence, item, lot_line_request, ticket_request,
};

#[test]
fn test_create_lot_line_assigns_line_number() {
    let mut persistence: Persistence = create_test_persistence();

    let first: LotLineInfo =
        handlers::create_lot_line(&mut persistence, lot_line_request(42, 10, 100.0)).unwrap();
    let second: LotLineInfo =
        handlers::create_lot_line(&mut persistence, lot_line_request(42, 5, 50.0)).unwrap();

    assert_eq!(first.line_no, 1);
    assert_eq!(second.line_no, 2);
    assert_eq!(first.date, "2026-02-03");
    assert_eq!(first.delivered_rolls, 0);
    assert_eq!(first.requisition, "REQ-1");
}

#[test]
fn test_create_lot_line_rejects_bad_date() {
    let mut persistence: Persistence = create_test_persistence();
    let mut request: CreateLotLineRequest = lot_line_request(42, 10, 100.0);
    request.date = String::from("03/02/2026");

    let result = handlers::create_lot_line(&mut persistence, request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "data"
    ));
}

#[test]
fn test_create_lot_line_rejects_zero_section() {
    let mut persistence: Persistence = create_test_persistence();
    let mut request: CreateLotLineRequest = lot_line_request(42, 10, 100.0);
    request.section = 0;

    let result = handlers::create_lot_line(&mut persistence, request);
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "seccao"
    ));
}

#[test]
fn test_create_lot_line_rejects_zero_rolls() {
    let mut persistence: Persistence = create_test_persistence();
    let result = handlers::create_lot_line(&mut persistence, lot_line_request(42, 0, 100.0));
    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "rolos"
    ));
}

#[test]
fn test_get_lot_line_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let result = handlers::get_lot_line(&mut persistence, 1, "2026-02-03", 9);
    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Lot line"
    ));
}

#[test]
fn test_list_pending_filters_by_client_name() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_lot_line(&mut persistence, 42, 10, 100.0);
    create_test_lot_line(&mut persistence, 77, 5, 50.0);

    let query: PendingQuery = PendingQuery {
        client_name: Some(String::from("cliente 77")),
        ..PendingQuery::default()
    };
    let response: ListPendingResponse = handlers::list_pending(&mut persistence, &query).unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(response.data.len(), 1);
    assert_eq!(response.data[0].client_id, 77);
}

#[test]
fn test_list_pending_excludes_fully_allocated() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLineInfo = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    create_test_lot_line(&mut persistence, 42, 5, 50.0);

    handlers::create_ticket(
        &mut persistence,
        ticket_request(vec![item(&line, 10, 100.0)]),
    )
    .unwrap();

    let response: ListPendingResponse =
        handlers::list_pending(&mut persistence, &PendingQuery::default()).unwrap();
    assert_eq!(response.total, 1);
    assert_eq!(response.data[0].line_no, 2);
}

#[test]
fn test_list_pending_paginates() {
    let mut persistence: Persistence = create_test_persistence();
    for _ in 0..3 {
        create_test_lot_line(&mut persistence, 42, 10, 100.0);
    }

    let query: PendingQuery = PendingQuery {
        page: Some(2),
        limit: Some(2),
        ..PendingQuery::default()
    };
    let response: ListPendingResponse = handlers::list_pending(&mut persistence, &query).unwrap();

    assert_eq!(response.total, 3);
    assert_eq!(response.page, 2);
    assert_eq!(response.total_pages, 2);
    assert_eq!(response.data.len(), 1);
}

#[test]
fn test_delete_lot_line_before_allocation() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLineInfo = create_test_lot_line(&mut persistence, 42, 10, 100.0);

    let response: DeleteLotLineResponse =
        handlers::delete_lot_line(&mut persistence, line.section, &line.date, line.line_no)
            .unwrap();
    assert!(response.message.contains("deleted"));

    let result = handlers::get_lot_line(&mut persistence, line.section, &line.date, line.line_no);
    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_delete_lot_line_rejected_after_allocation() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLineInfo = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    handlers::create_ticket(&mut persistence, ticket_request(vec![item(&line, 2, 20.0)])).unwrap();

    let result = handlers::delete_lot_line(&mut persistence, line.section, &line.date, line.line_no);
    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "delete_before_allocation"
    ));
}
