// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for process step persistence.

use tinturaria_domain::{LotLine, ProcessStep, Quantity};

use crate::tests::{
    allocation, create_test_lot_line, create_test_persistence, create_test_ticket, test_section,
};
use crate::{NewProcessStep, Persistence, PersistenceError};

fn create_test_step(process_def_id: i32) -> NewProcessStep {
    NewProcessStep {
        process_def_id,
        color_id: None,
        amount: Quantity::new(10, 100.0),
        note: String::new(),
    }
}

#[test]
fn test_add_step_numbers_sequentially() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    let first: i32 = persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(11))
        .unwrap();
    let second: i32 = persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(12))
        .unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
}

#[test]
fn test_add_step_requires_ticket() {
    let mut persistence: Persistence = create_test_persistence();
    let result = persistence.add_process_step(test_section(), 9, &create_test_step(11));
    assert!(matches!(
        result,
        Err(PersistenceError::TicketNotFound { ticket_no: 9, .. })
    ));
}

#[test]
fn test_list_steps_ordered_by_line() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    persistence
        .add_process_step(
            test_section(),
            ticket_no,
            &NewProcessStep {
                process_def_id: 11,
                color_id: Some(5),
                amount: Quantity::new(10, 100.0),
                note: String::from("tingir azul"),
            },
        )
        .unwrap();
    persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(12))
        .unwrap();

    let steps: Vec<ProcessStep> = persistence
        .list_process_steps(test_section(), ticket_no)
        .unwrap();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].line_no, 1);
    assert_eq!(steps[0].process_def_id, 11);
    assert_eq!(steps[0].color_id, Some(5));
    assert_eq!(steps[0].note, "tingir azul");
    assert_eq!(steps[1].line_no, 2);
}

#[test]
fn test_remove_step_deletes_single_line() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(11))
        .unwrap();
    persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(12))
        .unwrap();

    persistence
        .remove_process_step(test_section(), ticket_no, 1)
        .unwrap();

    let steps: Vec<ProcessStep> = persistence
        .list_process_steps(test_section(), ticket_no)
        .unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].line_no, 2);
}

#[test]
fn test_remove_step_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    let result = persistence.remove_process_step(test_section(), ticket_no, 7);
    assert!(matches!(
        result,
        Err(PersistenceError::StepNotFound { line_no: 7, .. })
    ));
}

#[test]
fn test_removed_line_number_is_not_reused() {
    let mut persistence: Persistence = create_test_persistence();
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(11))
        .unwrap();
    persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(12))
        .unwrap();
    persistence
        .remove_process_step(test_section(), ticket_no, 1)
        .unwrap();

    // Numbering continues after the highest surviving line.
    let next: i32 = persistence
        .add_process_step(test_section(), ticket_no, &create_test_step(13))
        .unwrap();
    assert_eq!(next, 3);
}
