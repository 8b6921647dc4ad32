// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the append-only machine scan log.

use tinturaria_domain::{LotLine, MachineActivity};

use crate::tests::{
    allocation, create_test_lot_line, create_test_persistence, create_test_ticket,
    seed_reference_data, test_section,
};
use crate::{MachineStatusRow, Persistence, PersistenceError};

#[test]
fn test_machine_selection_requires_known_machine() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);

    let result = persistence.record_machine_selection("WEB-LEITOR", 99);
    assert!(matches!(result, Err(PersistenceError::MachineNotFound(99))));
}

#[test]
fn test_machine_selection_returns_sequence() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);

    let first: i64 = persistence
        .record_machine_selection("WEB-LEITOR", 7)
        .unwrap();
    let second: i64 = persistence
        .record_machine_selection("WEB-LEITOR", 9)
        .unwrap();

    assert!(first > 0);
    assert!(second > first);
}

#[test]
fn test_identical_scans_are_separate_events() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);

    // No deduplication: every physical scan is one log row.
    let first: i64 = persistence
        .record_machine_selection("WEB-LEITOR", 7)
        .unwrap();
    let second: i64 = persistence
        .record_machine_selection("WEB-LEITOR", 7)
        .unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_process_reading_inherits_terminal_machine() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    persistence
        .record_machine_selection("WEB-LEITOR", 7)
        .unwrap();
    persistence
        .record_process_reading("WEB-LEITOR", 3, ticket_no, 1)
        .unwrap();

    let status: Vec<MachineStatusRow> = persistence.machine_status(test_section()).unwrap();
    let jet: &MachineStatusRow = status.iter().find(|m| m.machine_id == 7).unwrap();
    assert_eq!(jet.activity, MachineActivity::In);
    assert_eq!(jet.ticket_no, Some(ticket_no));
}

#[test]
fn test_process_reading_without_selection_hits_no_machine() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    persistence
        .record_process_reading("TERMINAL-NOVO", 3, ticket_no, 1)
        .unwrap();

    // The reading carries machine 0; every registered machine stays free.
    let status: Vec<MachineStatusRow> = persistence.machine_status(test_section()).unwrap();
    assert!(status.iter().all(|m| m.activity == MachineActivity::Free));
}

#[test]
fn test_terminals_track_machines_independently() {
    let mut persistence: Persistence = create_test_persistence();
    seed_reference_data(&mut persistence);
    let line: LotLine = create_test_lot_line(&mut persistence, 42, 10, 100.0);
    let ticket_no: u32 = create_test_ticket(&mut persistence, &[allocation(&line, 10, 100.0)]);

    persistence
        .record_machine_selection("LEITOR-A", 7)
        .unwrap();
    persistence
        .record_machine_selection("LEITOR-B", 9)
        .unwrap();
    persistence
        .record_process_reading("LEITOR-A", 3, ticket_no, 1)
        .unwrap();

    let status: Vec<MachineStatusRow> = persistence.machine_status(test_section()).unwrap();
    let jet: &MachineStatusRow = status.iter().find(|m| m.machine_id == 7).unwrap();
    let ramola: &MachineStatusRow = status.iter().find(|m| m.machine_id == 9).unwrap();
    assert_eq!(jet.activity, MachineActivity::In);
    assert_eq!(ramola.activity, MachineActivity::Free);
}
