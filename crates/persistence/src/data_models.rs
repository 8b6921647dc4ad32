// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed row structs and public data carriers.
//!
//! Every table read goes through a `Queryable` struct so a schema/row shape
//! mismatch fails loudly at the decode site instead of producing shifted
//! columns downstream.

use std::str::FromStr;

use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tinturaria_domain::{
    Allocation, DeliveryEvent, DomainError, LotLine, LotLineKey, MachineActivity, ProcessStep,
    Quantity, Section, Ticket, TicketState,
};

use crate::error::PersistenceError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Formats a date the way the `TEXT` date columns store it.
pub(crate) fn format_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::Other(format!("Failed to format date: {e}")))
}

/// Parses a stored `TEXT` date column back into a `time::Date`.
pub(crate) fn parse_date(raw: &str) -> Result<Date, PersistenceError> {
    Date::parse(raw, &DATE_FORMAT).map_err(|e| {
        PersistenceError::DomainViolation(DomainError::DateParseError {
            date_string: raw.to_string(),
            error: e.to_string(),
        })
    })
}

/// Current UTC timestamp in RFC 3339 format, as stored in `recorded_at`.
pub(crate) fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Current UTC date.
pub(crate) fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

pub(crate) fn section_from_row(raw: i32) -> Result<Section, PersistenceError> {
    let value: u16 = raw
        .to_u16()
        .ok_or_else(|| PersistenceError::Other(format!("Invalid stored section: {raw}")))?;
    Ok(Section::new(value)?)
}

pub(crate) fn ticket_no_from_row(raw: i32) -> Result<u32, PersistenceError> {
    raw.to_u32()
        .ok_or_else(|| PersistenceError::Other(format!("Invalid stored ticket number: {raw}")))
}

/// Converts a decoded barcode value into a storable column value.
pub(crate) fn column_from_u32(value: u32) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or_else(|| PersistenceError::Other(format!("Value out of column range: {value}")))
}

// ============================================================================
// Row structs (decode side)
// ============================================================================

#[derive(Debug, Clone, Queryable)]
pub(crate) struct LotLineRow {
    pub lot_line_id: i64,
    pub section: i32,
    pub received_on: String,
    pub line_no: i32,
    pub client_id: i32,
    pub client_name: String,
    pub article_code: i32,
    pub article_description: String,
    pub composition_code: i32,
    pub composition_description: String,
    pub requested_rolls: i32,
    pub requested_weight: f64,
    pub delivered_rolls: i32,
    pub delivered_weight: f64,
    pub requisition: String,
    #[allow(dead_code)]
    pub recorded_by: String,
    #[allow(dead_code)]
    pub recorded_at: String,
}

impl LotLineRow {
    pub(crate) fn into_domain(self) -> Result<LotLine, PersistenceError> {
        let section: Section = section_from_row(self.section)?;
        let received_on: Date = parse_date(&self.received_on)?;
        Ok(LotLine {
            key: LotLineKey {
                section,
                received_on,
                line_no: self.line_no,
            },
            client_id: self.client_id,
            client_name: self.client_name,
            article_code: self.article_code,
            article_description: self.article_description,
            composition_code: self.composition_code,
            composition_description: self.composition_description,
            requested: Quantity::new(self.requested_rolls, self.requested_weight),
            delivered: Quantity::new(self.delivered_rolls, self.delivered_weight),
            requisition: self.requisition,
        })
    }
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct TicketRow {
    pub ticket_id: i64,
    pub section: i32,
    pub ticket_no: i32,
    pub created_on: String,
    pub total_rolls: i32,
    pub total_weight: f64,
    pub state: String,
    pub note: String,
}

impl TicketRow {
    pub(crate) fn into_domain(self) -> Result<(i64, Ticket), PersistenceError> {
        let section: Section = section_from_row(self.section)?;
        let ticket_no: u32 = ticket_no_from_row(self.ticket_no)?;
        let created_on: Date = parse_date(&self.created_on)?;
        let state: TicketState = TicketState::from_str(&self.state)?;
        Ok((
            self.ticket_id,
            Ticket {
                section,
                ticket_no,
                created_on,
                totals: Quantity::new(self.total_rolls, self.total_weight),
                state,
                note: self.note,
            },
        ))
    }
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct ProcessStepRow {
    #[allow(dead_code)]
    pub step_id: i64,
    #[allow(dead_code)]
    pub ticket_id: i64,
    pub line_no: i32,
    pub recorded_on: String,
    pub process_def_id: i32,
    pub color_id: Option<i32>,
    pub rolls: i32,
    pub weight: f64,
    pub note: String,
}

impl ProcessStepRow {
    pub(crate) fn into_domain(self) -> Result<ProcessStep, PersistenceError> {
        Ok(ProcessStep {
            line_no: self.line_no,
            recorded_on: parse_date(&self.recorded_on)?,
            process_def_id: self.process_def_id,
            color_id: self.color_id,
            amount: Quantity::new(self.rolls, self.weight),
            note: self.note,
        })
    }
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct DeliveryEventRow {
    #[allow(dead_code)]
    pub event_id: i64,
    #[allow(dead_code)]
    pub ticket_id: i64,
    pub line_no: i32,
    pub delivered_on: String,
    pub rolls: i32,
    pub weight: f64,
    pub state_id: i32,
    pub note: String,
}

impl DeliveryEventRow {
    pub(crate) fn into_domain(self) -> Result<DeliveryEvent, PersistenceError> {
        Ok(DeliveryEvent {
            line_no: self.line_no,
            delivered_on: parse_date(&self.delivered_on)?,
            amount: Quantity::new(self.rolls, self.weight),
            state_id: self.state_id,
            note: self.note,
        })
    }
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct MachineReadingRow {
    #[allow(dead_code)]
    pub reading_id: i64,
    pub recorded_at: String,
    #[allow(dead_code)]
    pub terminal: String,
    #[allow(dead_code)]
    pub machine_id: i32,
    pub operation_class: i32,
    pub ticket_no: i32,
    pub process_step: i32,
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct MachineRow {
    pub machine_id: i32,
    #[allow(dead_code)]
    pub section: i32,
    pub description: String,
}

// ============================================================================
// Public data carriers (API side)
// ============================================================================

/// Input for creating a lot reception line.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLotLine {
    pub section: Section,
    pub received_on: Date,
    pub client_id: i32,
    pub client_name: String,
    pub article_code: i32,
    pub article_description: String,
    pub composition_code: i32,
    pub composition_description: String,
    pub requested: Quantity,
    pub requisition: String,
    pub recorded_by: String,
}

/// Filters and pagination for the pending lot line listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingFilter {
    pub section: Option<Section>,
    /// Case-insensitive client name substring.
    pub client_name: Option<String>,
    /// Requisition reference substring.
    pub requisition: Option<String>,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
}

/// One page of pending lot lines, with the total match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingPage {
    pub lines: Vec<LotLine>,
    pub total: i64,
    pub page: u32,
    pub total_pages: u32,
}

/// One allocation request inside a ticket creation.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketItem {
    pub lot_line: LotLineKey,
    pub amount: Quantity,
}

/// The outcome of a successful ticket creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedTicket {
    pub ticket_no: u32,
    pub created_on: Date,
    pub totals: Quantity,
    pub allocations: usize,
}

/// A ticket header joined with delivery progress and client context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub client_id: i32,
    pub client_name: String,
    pub article_description: String,
    pub cumulative_delivered: Quantity,
    pub allocations: Vec<Allocation>,
    pub deliveries: Vec<DeliveryEvent>,
}

/// Input for appending a process step to a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProcessStep {
    pub process_def_id: i32,
    pub color_id: Option<i32>,
    pub amount: Quantity,
    pub note: String,
}

/// The outcome of a registered delivery event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryOutcome {
    pub line_no: i32,
    pub cumulative: Quantity,
    pub state: TicketState,
}

/// One machine in the status view, joined with its latest reading context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineStatusRow {
    pub machine_id: i32,
    pub description: String,
    pub activity: MachineActivity,
    pub recorded_at: Option<String>,
    pub operation_class: Option<i32>,
    pub operation_description: Option<String>,
    pub ticket_no: Option<u32>,
    pub process_step: Option<i32>,
    pub totals: Option<Quantity>,
    pub client_name: Option<String>,
    pub article_description: Option<String>,
}
