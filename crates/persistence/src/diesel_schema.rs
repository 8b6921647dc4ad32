// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel schema definitions for the production-flow tables.
//!
//! Dates are stored as ISO 8601 `TEXT`; conversion to and from
//! `time::Date` happens in `data_models`.

diesel::table! {
    lot_lines (lot_line_id) {
        lot_line_id -> BigInt,
        section -> Integer,
        received_on -> Text,
        line_no -> Integer,
        client_id -> Integer,
        client_name -> Text,
        article_code -> Integer,
        article_description -> Text,
        composition_code -> Integer,
        composition_description -> Text,
        requested_rolls -> Integer,
        requested_weight -> Double,
        delivered_rolls -> Integer,
        delivered_weight -> Double,
        requisition -> Text,
        recorded_by -> Text,
        recorded_at -> Text,
    }
}

diesel::table! {
    tickets (ticket_id) {
        ticket_id -> BigInt,
        section -> Integer,
        ticket_no -> Integer,
        created_on -> Text,
        total_rolls -> Integer,
        total_weight -> Double,
        state -> Text,
        note -> Text,
    }
}

diesel::table! {
    ticket_allocations (allocation_id) {
        allocation_id -> BigInt,
        ticket_id -> BigInt,
        lot_line_id -> BigInt,
        rolls -> Integer,
        weight -> Double,
    }
}

diesel::table! {
    process_steps (step_id) {
        step_id -> BigInt,
        ticket_id -> BigInt,
        line_no -> Integer,
        recorded_on -> Text,
        process_def_id -> Integer,
        color_id -> Nullable<Integer>,
        rolls -> Integer,
        weight -> Double,
        note -> Text,
    }
}

diesel::table! {
    delivery_states (state_id) {
        state_id -> Integer,
        description -> Text,
    }
}

diesel::table! {
    delivery_events (event_id) {
        event_id -> BigInt,
        ticket_id -> BigInt,
        line_no -> Integer,
        delivered_on -> Text,
        rolls -> Integer,
        weight -> Double,
        state_id -> Integer,
        note -> Text,
    }
}

diesel::table! {
    machines (machine_id) {
        machine_id -> Integer,
        section -> Integer,
        description -> Text,
    }
}

diesel::table! {
    operation_classes (class) {
        class -> Integer,
        description -> Text,
        flow -> Text,
    }
}

diesel::table! {
    machine_readings (reading_id) {
        reading_id -> BigInt,
        recorded_at -> Text,
        terminal -> Text,
        machine_id -> Integer,
        operation_class -> Integer,
        ticket_no -> Integer,
        process_step -> Integer,
    }
}

diesel::joinable!(ticket_allocations -> tickets (ticket_id));
diesel::joinable!(ticket_allocations -> lot_lines (lot_line_id));
diesel::joinable!(process_steps -> tickets (ticket_id));
diesel::joinable!(delivery_events -> tickets (ticket_id));
diesel::joinable!(delivery_events -> delivery_states (state_id));

diesel::allow_tables_to_appear_in_same_query!(
    lot_lines,
    tickets,
    ticket_allocations,
    process_steps,
    delivery_states,
    delivery_events,
    machines,
    operation_classes,
    machine_readings,
);
