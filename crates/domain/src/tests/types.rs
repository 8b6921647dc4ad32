// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, LotLine, LotLineKey, MachineActivity, OperationFlow, Quantity, Section,
    TicketState, classify_activity,
};
use std::str::FromStr;
use time::macros::date;

fn create_test_line(requested: Quantity, delivered: Quantity) -> LotLine {
    LotLine {
        key: LotLineKey {
            section: Section::new(1).unwrap(),
            received_on: date!(2026 - 01 - 10),
            line_no: 1,
        },
        client_id: 42,
        client_name: String::from("Malhas do Norte"),
        article_code: 7,
        article_description: String::from("Jersey 30/1"),
        composition_code: 3,
        composition_description: String::from("100% CO"),
        requested,
        delivered,
        requisition: String::from("REQ-19"),
    }
}

#[test]
fn test_section_rejects_zero() {
    let result = Section::new(0);
    assert!(matches!(result, Err(DomainError::InvalidSection(_))));
}

#[test]
fn test_section_value_round_trip() {
    let section: Section = Section::new(3).unwrap();
    assert_eq!(section.value(), 3);
}

#[test]
fn test_quantity_exceeds_on_either_axis() {
    let limit: Quantity = Quantity::new(10, 100.0);
    assert!(Quantity::new(11, 50.0).exceeds(&limit));
    assert!(Quantity::new(5, 100.5).exceeds(&limit));
    assert!(!Quantity::new(10, 100.0).exceeds(&limit));
}

#[test]
fn test_pending_is_requested_minus_delivered() {
    let line: LotLine = create_test_line(Quantity::new(10, 100.0), Quantity::new(4, 40.0));
    assert_eq!(line.pending(), Quantity::new(6, 60.0));
    assert!(!line.is_fully_allocated());
}

#[test]
fn test_fully_allocated_line() {
    let line: LotLine = create_test_line(Quantity::new(10, 100.0), Quantity::new(10, 100.0));
    assert!(line.pending().is_zero());
    assert!(line.is_fully_allocated());
}

#[test]
fn test_ticket_state_round_trip() {
    assert_eq!(TicketState::from_str("open").unwrap(), TicketState::Open);
    assert_eq!(
        TicketState::from_str("completed").unwrap(),
        TicketState::Completed
    );
    assert!(matches!(
        TicketState::from_str("closed"),
        Err(DomainError::InvalidTicketState(_))
    ));
}

#[test]
fn test_operation_flow_round_trip() {
    for flow in [
        OperationFlow::Entry,
        OperationFlow::Exit,
        OperationFlow::Neutral,
    ] {
        assert_eq!(OperationFlow::from_str(flow.as_str()).unwrap(), flow);
    }
    assert!(matches!(
        OperationFlow::from_str("sideways"),
        Err(DomainError::InvalidOperationFlow(_))
    ));
}

#[test]
fn test_classify_no_reading_is_free() {
    assert_eq!(classify_activity(None), MachineActivity::Free);
}

#[test]
fn test_classify_reading_without_ticket_is_free() {
    // Machine selection scans carry no ticket; the machine is idle.
    assert_eq!(
        classify_activity(Some((0, OperationFlow::Entry))),
        MachineActivity::Free
    );
}

#[test]
fn test_classify_entry_exit_neutral() {
    assert_eq!(
        classify_activity(Some((25352, OperationFlow::Entry))),
        MachineActivity::In
    );
    assert_eq!(
        classify_activity(Some((25352, OperationFlow::Exit))),
        MachineActivity::Out
    );
    assert_eq!(
        classify_activity(Some((25352, OperationFlow::Neutral))),
        MachineActivity::Neutral
    );
}
