// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod delivery_tests;
mod lot_line_tests;
mod process_step_tests;
mod reading_tests;

use time::macros::date;
use tinturaria_domain::{LotLine, OperationFlow, Quantity, Section};

use crate::{NewLotLine, Persistence, TicketItem};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn test_section() -> Section {
    Section::new(1).unwrap()
}

pub fn create_test_lot_line(
    persistence: &mut Persistence,
    client_id: i32,
    rolls: i32,
    weight: f64,
) -> LotLine {
    persistence
        .create_lot_line(&NewLotLine {
            section: test_section(),
            received_on: date!(2026 - 02 - 03),
            client_id,
            client_name: format!("Cliente {client_id}"),
            article_code: 7,
            article_description: String::from("Jersey 30/1"),
            composition_code: 3,
            composition_description: String::from("100% CO"),
            requested: Quantity::new(rolls, weight),
            requisition: String::from("REQ-1"),
            recorded_by: String::from("tester"),
        })
        .unwrap()
}

pub fn allocation(line: &LotLine, rolls: i32, weight: f64) -> TicketItem {
    TicketItem {
        lot_line: line.key,
        amount: Quantity::new(rolls, weight),
    }
}

pub fn create_test_ticket(persistence: &mut Persistence, items: &[TicketItem]) -> u32 {
    persistence
        .create_ticket(test_section(), date!(2026 - 02 - 04), "", items)
        .unwrap()
        .ticket_no
}

pub fn seed_reference_data(persistence: &mut Persistence) {
    persistence
        .define_machine(7, test_section(), "Jet 7")
        .unwrap();
    persistence
        .define_machine(9, test_section(), "Ramola 9")
        .unwrap();
    persistence
        .define_operation_class(1, "Seleccao de maquina", OperationFlow::Neutral)
        .unwrap();
    persistence
        .define_operation_class(3, "Entrada em maquina", OperationFlow::Entry)
        .unwrap();
    persistence
        .define_operation_class(4, "Saida de maquina", OperationFlow::Exit)
        .unwrap();
    persistence
        .define_operation_class(6, "Inspeccao", OperationFlow::Neutral)
        .unwrap();
    persistence.define_delivery_state(1, "Acabado").unwrap();
    persistence.define_delivery_state(2, "Meio-branco").unwrap();
}
