// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use tinturaria_domain::{OperationFlow, Section};
use tinturaria_persistence::Persistence;

use crate::handlers;
use crate::request_response::{
    CreateLotLineRequest, CreateTicketRequest, LotLineInfo, TicketItemRequest,
};

pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    seed_reference_data(&mut persistence);
    persistence
}

pub fn seed_reference_data(persistence: &mut Persistence) {
    let section: Section = Section::new(1).unwrap();
    persistence.define_machine(7, section, "Jet 7").unwrap();
    persistence.define_machine(9, section, "Ramola 9").unwrap();
    persistence
        .define_operation_class(1, "Seleccao de maquina", OperationFlow::Neutral)
        .unwrap();
    persistence
        .define_operation_class(3, "Entrada em maquina", OperationFlow::Entry)
        .unwrap();
    persistence
        .define_operation_class(4, "Saida de maquina", OperationFlow::Exit)
        .unwrap();
    persistence.define_delivery_state(1, "Acabado").unwrap();
}

pub fn lot_line_request(client_id: i32, rolls: i32, weight: f64) -> CreateLotLineRequest {
    CreateLotLineRequest {
        section: 1,
        date: String::from("2026-02-03"),
        client_id,
        client_name: format!("Cliente {client_id}"),
        article_code: 7,
        article_description: String::from("Jersey 30/1"),
        composition_code: 3,
        composition_description: String::from("100% CO"),
        rolls,
        weight,
        requisition: Some(String::from("REQ-1")),
        recorded_by: None,
    }
}

pub fn create_test_lot_line(
    persistence: &mut Persistence,
    client_id: i32,
    rolls: i32,
    weight: f64,
) -> LotLineInfo {
    handlers::create_lot_line(persistence, lot_line_request(client_id, rolls, weight)).unwrap()
}

pub fn item(line: &LotLineInfo, rolls: i32, weight: f64) -> TicketItemRequest {
    TicketItemRequest {
        section: line.section,
        date: line.date.clone(),
        line_no: line.line_no,
        rolls,
        weight,
    }
}

pub fn ticket_request(items: Vec<TicketItemRequest>) -> CreateTicketRequest {
    CreateTicketRequest {
        section: 1,
        date: String::from("2026-02-04"),
        note: None,
        items,
    }
}
