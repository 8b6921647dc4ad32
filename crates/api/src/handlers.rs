// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler translates a wire request into domain types, delegates to
//! the persistence adapter and translates the outcome back into a wire
//! response. No handler leaks a domain or persistence error directly.

use num_traits::cast::ToPrimitive;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use tinturaria_domain::{
    LotLine, LotLineKey, MACHINE_SELECTION_CLASS, MachineActivity, Operation, ProcessStep,
    Quantity, Section, decode,
};
use tinturaria_persistence::{
    CreatedTicket, DeliveryOutcome, MachineStatusRow, NewLotLine, NewProcessStep, PendingFilter,
    PendingPage, Persistence, TicketDetail, TicketItem,
};

use crate::error::{
    ApiError, translate_barcode_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AddProcessStepRequest, AddProcessStepResponse, AllocationInfo, CreateLotLineRequest,
    CreateTicketRequest, CreateTicketResponse, DeleteLotLineResponse, DeliveryInfo,
    LastTicketResponse, ListPendingResponse, ListProcessStepsResponse, LotLineInfo,
    MachineStatusInfo, MachineStatusResponse, PendingQuery, ProcessStepInfo,
    RegisterDeliveryRequest, RegisterDeliveryResponse, RemoveProcessStepResponse, ScanData,
    ScanDetails, ScanRequest, ScanResponse, StatusQuery, TicketDetailResponse,
};
use crate::scan::resolve_terminal;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Section assumed when a request does not carry one.
const DEFAULT_SECTION: u16 = 1;

fn parse_section(raw: u16) -> Result<Section, ApiError> {
    Section::new(raw).map_err(translate_domain_error)
}

fn parse_wire_date(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw, DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from("data"),
        message: format!("Failed to parse date '{raw}': {e}"),
    })
}

fn format_wire_date(date: Date) -> Result<String, ApiError> {
    date.format(DATE_FORMAT).map_err(|e| ApiError::Internal {
        message: format!("Failed to format date: {e}"),
    })
}

const fn activity_label(activity: MachineActivity) -> &'static str {
    match activity {
        MachineActivity::Free => "free",
        MachineActivity::In => "in",
        MachineActivity::Out => "out",
        MachineActivity::Neutral => "neutral",
    }
}

fn lot_line_info(line: &LotLine) -> Result<LotLineInfo, ApiError> {
    Ok(LotLineInfo {
        section: line.key.section.value(),
        date: format_wire_date(line.key.received_on)?,
        line_no: line.key.line_no,
        client_id: line.client_id,
        client_name: line.client_name.clone(),
        article_code: line.article_code,
        article_description: line.article_description.clone(),
        composition_code: line.composition_code,
        composition_description: line.composition_description.clone(),
        rolls: line.requested.rolls,
        weight: line.requested.weight,
        delivered_rolls: line.delivered.rolls,
        delivered_weight: line.delivered.weight,
        requisition: line.requisition.clone(),
    })
}

/// Records a reception lot line.
///
/// The line number is assigned by persistence, scoped to (section, date).
///
/// # Errors
///
/// Returns an error if the section or date is invalid, the requested
/// quantities are non-positive, or persistence fails.
pub fn create_lot_line(
    persistence: &mut Persistence,
    request: CreateLotLineRequest,
) -> Result<LotLineInfo, ApiError> {
    let section: Section = parse_section(request.section)?;
    let received_on: Date = parse_wire_date(&request.date)?;

    let new_line: NewLotLine = NewLotLine {
        section,
        received_on,
        client_id: request.client_id,
        client_name: request.client_name,
        article_code: request.article_code,
        article_description: request.article_description,
        composition_code: request.composition_code,
        composition_description: request.composition_description,
        requested: Quantity::new(request.rolls, request.weight),
        requisition: request.requisition.unwrap_or_default(),
        recorded_by: request.recorded_by.unwrap_or_default(),
    };

    let line: LotLine = persistence
        .create_lot_line(&new_line)
        .map_err(translate_persistence_error)?;
    tracing::debug!(
        section = line.key.section.value(),
        line_no = line.key.line_no,
        "recorded reception lot line"
    );
    lot_line_info(&line)
}

/// Lists pending lot lines, filtered and paginated.
///
/// # Errors
///
/// Returns an error if the section filter is invalid or the query fails.
pub fn list_pending(
    persistence: &mut Persistence,
    query: &PendingQuery,
) -> Result<ListPendingResponse, ApiError> {
    let section: Option<Section> = match query.section {
        Some(raw) => Some(parse_section(raw)?),
        None => None,
    };
    let filter: PendingFilter = PendingFilter {
        section,
        client_name: query.client_name.clone(),
        requisition: query.requisition.clone(),
        page: query.page.unwrap_or(1),
        per_page: query.limit.unwrap_or(50),
    };

    let page: PendingPage = persistence
        .list_pending_lot_lines(&filter)
        .map_err(translate_persistence_error)?;
    let data: Vec<LotLineInfo> = page
        .lines
        .iter()
        .map(lot_line_info)
        .collect::<Result<Vec<LotLineInfo>, ApiError>>()?;

    Ok(ListPendingResponse {
        data,
        total: page.total,
        page: page.page,
        total_pages: page.total_pages,
    })
}

/// Fetches a single lot line by its composite key.
///
/// # Errors
///
/// Returns an error if the key is invalid or the line does not exist.
pub fn get_lot_line(
    persistence: &mut Persistence,
    section: u16,
    date: &str,
    line_no: i32,
) -> Result<LotLineInfo, ApiError> {
    let key: LotLineKey = LotLineKey {
        section: parse_section(section)?,
        received_on: parse_wire_date(date)?,
        line_no,
    };
    let line: LotLine = persistence
        .get_lot_line(&key)
        .map_err(translate_persistence_error)?;
    lot_line_info(&line)
}

/// Deletes a lot line that has no allocated quantity.
///
/// # Errors
///
/// Returns an error if the key is invalid, the line does not exist, or any
/// quantity has already been allocated into a ticket.
pub fn delete_lot_line(
    persistence: &mut Persistence,
    section: u16,
    date: &str,
    line_no: i32,
) -> Result<DeleteLotLineResponse, ApiError> {
    let key: LotLineKey = LotLineKey {
        section: parse_section(section)?,
        received_on: parse_wire_date(date)?,
        line_no,
    };
    persistence
        .delete_lot_line(&key)
        .map_err(translate_persistence_error)?;
    Ok(DeleteLotLineResponse {
        message: format!("Lot line {key} deleted"),
    })
}

/// Creates a finishing ticket aggregating one or more lot lines.
///
/// The whole batch is validated and written inside one transaction: mixed
/// clients or an over-allocation on any item leave no observable write.
///
/// # Errors
///
/// Returns an error if:
/// - any section or date fails to parse
/// - the item list is empty
/// - the items reference lot lines of different clients
/// - any item exceeds the pending balance of its lot line
/// - persistence fails
pub fn create_ticket(
    persistence: &mut Persistence,
    request: CreateTicketRequest,
) -> Result<CreateTicketResponse, ApiError> {
    let section: Section = parse_section(request.section)?;
    let created_on: Date = parse_wire_date(&request.date)?;
    let note: String = request.note.unwrap_or_default();

    let mut items: Vec<TicketItem> = Vec::with_capacity(request.items.len());
    for item in &request.items {
        items.push(TicketItem {
            lot_line: LotLineKey {
                section: parse_section(item.section)?,
                received_on: parse_wire_date(&item.date)?,
                line_no: item.line_no,
            },
            amount: Quantity::new(item.rolls, item.weight),
        });
    }

    let created: CreatedTicket = persistence
        .create_ticket(section, created_on, &note, &items)
        .map_err(translate_persistence_error)?;
    tracing::info!(
        section = section.value(),
        ticket_no = created.ticket_no,
        lines = created.allocations,
        "created finishing ticket"
    );

    Ok(CreateTicketResponse {
        ticket_no: created.ticket_no,
        lines: created.allocations,
    })
}

/// Fetches the full detail of one ticket.
///
/// # Errors
///
/// Returns an error if the section is invalid or the ticket does not exist.
pub fn get_ticket(
    persistence: &mut Persistence,
    section: u16,
    ticket_no: u32,
) -> Result<TicketDetailResponse, ApiError> {
    let section: Section = parse_section(section)?;
    let detail: TicketDetail = persistence
        .get_ticket(section, ticket_no)
        .map_err(translate_persistence_error)?;

    let mut items: Vec<AllocationInfo> = Vec::with_capacity(detail.allocations.len());
    for allocation in &detail.allocations {
        items.push(AllocationInfo {
            section: allocation.lot_line.section.value(),
            date: format_wire_date(allocation.lot_line.received_on)?,
            line_no: allocation.lot_line.line_no,
            rolls: allocation.amount.rolls,
            weight: allocation.amount.weight,
        });
    }
    let mut deliveries: Vec<DeliveryInfo> = Vec::with_capacity(detail.deliveries.len());
    for event in &detail.deliveries {
        deliveries.push(DeliveryInfo {
            line_no: event.line_no,
            date: format_wire_date(event.delivered_on)?,
            rolls: event.amount.rolls,
            weight: event.amount.weight,
            state_id: event.state_id,
            note: event.note.clone(),
        });
    }

    Ok(TicketDetailResponse {
        ticket_no: detail.ticket.ticket_no,
        section: detail.ticket.section.value(),
        date: format_wire_date(detail.ticket.created_on)?,
        state: detail.ticket.state.to_string(),
        note: detail.ticket.note,
        client_id: detail.client_id,
        client_name: detail.client_name,
        article_description: detail.article_description,
        total_rolls: detail.ticket.totals.rolls,
        total_weight: detail.ticket.totals.weight,
        delivered_rolls: detail.cumulative_delivered.rolls,
        delivered_weight: detail.cumulative_delivered.weight,
        items,
        deliveries,
    })
}

/// Fetches the most recent ticket number and date of a section.
///
/// # Errors
///
/// Returns an error if the section is invalid or has no tickets yet.
pub fn last_ticket(
    persistence: &mut Persistence,
    section: u16,
) -> Result<LastTicketResponse, ApiError> {
    let section: Section = parse_section(section)?;
    let last: Option<(u32, Date)> = persistence
        .last_ticket(section)
        .map_err(translate_persistence_error)?;
    let Some((ticket_no, created_on)) = last else {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Ticket"),
            message: format!("Section {} has no tickets", section.value()),
        });
    };
    Ok(LastTicketResponse {
        ticket_no,
        date: format_wire_date(created_on)?,
    })
}

/// Appends a process step to a ticket.
///
/// # Errors
///
/// Returns an error if the section is invalid, the ticket does not exist,
/// or persistence fails.
pub fn add_process_step(
    persistence: &mut Persistence,
    section: u16,
    ticket_no: u32,
    request: AddProcessStepRequest,
) -> Result<AddProcessStepResponse, ApiError> {
    let section: Section = parse_section(section)?;
    let step: NewProcessStep = NewProcessStep {
        process_def_id: request.process_id,
        color_id: request.color_id,
        amount: Quantity::new(request.rolls.unwrap_or(0), request.weight.unwrap_or(0.0)),
        note: request.note.unwrap_or_default(),
    };
    let line_no: i32 = persistence
        .add_process_step(section, ticket_no, &step)
        .map_err(translate_persistence_error)?;
    Ok(AddProcessStepResponse {
        line_no,
        message: format!("Process step {line_no} added to ticket {ticket_no}"),
    })
}

/// Removes exactly one process step from a ticket.
///
/// # Errors
///
/// Returns an error if the section is invalid, or the ticket or step does
/// not exist.
pub fn remove_process_step(
    persistence: &mut Persistence,
    section: u16,
    ticket_no: u32,
    line_no: i32,
) -> Result<RemoveProcessStepResponse, ApiError> {
    let section: Section = parse_section(section)?;
    persistence
        .remove_process_step(section, ticket_no, line_no)
        .map_err(translate_persistence_error)?;
    Ok(RemoveProcessStepResponse {
        message: format!("Process step {line_no} removed from ticket {ticket_no}"),
    })
}

/// Lists the process steps of a ticket, ordered by line number.
///
/// # Errors
///
/// Returns an error if the section is invalid or the ticket does not exist.
pub fn list_process_steps(
    persistence: &mut Persistence,
    section: u16,
    ticket_no: u32,
) -> Result<ListProcessStepsResponse, ApiError> {
    let section: Section = parse_section(section)?;
    let steps: Vec<ProcessStep> = persistence
        .list_process_steps(section, ticket_no)
        .map_err(translate_persistence_error)?;

    let mut infos: Vec<ProcessStepInfo> = Vec::with_capacity(steps.len());
    for step in &steps {
        infos.push(ProcessStepInfo {
            line_no: step.line_no,
            date: format_wire_date(step.recorded_on)?,
            process_id: step.process_def_id,
            color_id: step.color_id,
            rolls: step.amount.rolls,
            weight: step.amount.weight,
            note: step.note.clone(),
        });
    }
    Ok(ListProcessStepsResponse {
        ticket_no,
        steps: infos,
    })
}

/// Registers a partial or final delivery against a ticket.
///
/// # Errors
///
/// Returns an error if:
/// - the section is invalid or the ticket does not exist
/// - the ticket is already completed
/// - the delivery state is not registered
/// - the quantities are invalid or exceed the ticket totals
pub fn register_delivery(
    persistence: &mut Persistence,
    section: u16,
    ticket_no: u32,
    request: RegisterDeliveryRequest,
) -> Result<RegisterDeliveryResponse, ApiError> {
    let section: Section = parse_section(section)?;
    let amount: Quantity = Quantity::new(request.rolls, request.weight);
    let note: String = request.note.unwrap_or_default();

    let outcome: DeliveryOutcome = persistence
        .register_delivery(section, ticket_no, amount, request.state_id, &note)
        .map_err(translate_persistence_error)?;
    tracing::info!(
        section = section.value(),
        ticket_no,
        line_no = outcome.line_no,
        state = %outcome.state,
        "registered delivery"
    );

    Ok(RegisterDeliveryResponse {
        line_no: outcome.line_no,
        delivered_rolls: outcome.cumulative.rolls,
        delivered_weight: outcome.cumulative.weight,
        state: outcome.state.to_string(),
    })
}

/// Records a barcode scan and routes it by operation class.
///
/// Machine selections (class 1) verify the machine exists and log a
/// selection reading. Any other class logs a process reading that inherits
/// the machine most recently selected on the same terminal (0 when none).
/// Every physical scan is one log row; there is no deduplication.
///
/// # Errors
///
/// Returns an error if:
/// - the code does not decode (empty, wrong token count, non-numeric or
///   non-positive tokens)
/// - the terminal identifier is blank or too long
/// - a machine selection names an unregistered machine
/// - persistence fails
pub fn register_scan(
    persistence: &mut Persistence,
    request: ScanRequest,
) -> Result<ScanResponse, ApiError> {
    let terminal: String = resolve_terminal(request.terminal.as_deref())?;
    let operation: Operation = decode(&request.code).map_err(translate_barcode_error)?;

    match operation {
        Operation::MachineSelection { machine_id } => {
            let sequence: i64 = persistence
                .record_machine_selection(&terminal, machine_id)
                .map_err(translate_persistence_error)?;
            let machine_column: i32 = machine_id.to_i32().ok_or_else(|| ApiError::InvalidInput {
                field: String::from("codigoCompleto"),
                message: format!("Machine identifier {machine_id} is out of range"),
            })?;
            let machine_description: String = persistence
                .machine_description(machine_column)
                .map_err(translate_persistence_error)?
                .unwrap_or_else(|| format!("Máquina {machine_id}"));
            let operation_description: String =
                class_description(persistence, MACHINE_SELECTION_CLASS)?;
            tracing::info!(terminal, machine_id, sequence, "recorded machine selection");

            Ok(ScanResponse {
                success: true,
                message: format!("Gravação OK: {sequence}"),
                operation: operation_description,
                details: ScanDetails::MachineSelection {
                    machine: machine_id,
                    machine_description,
                },
                data: ScanData {
                    sequence_number: sequence,
                },
            })
        }
        Operation::ProcessOperation {
            operation_class,
            ticket_number,
            process_step,
        } => {
            let sequence: i64 = persistence
                .record_process_reading(&terminal, operation_class, ticket_number, process_step)
                .map_err(translate_persistence_error)?;
            let operation_description: String = class_description(persistence, operation_class)?;
            tracing::info!(
                terminal,
                operation_class,
                ticket_number,
                sequence,
                "recorded process reading"
            );

            Ok(ScanResponse {
                success: true,
                message: format!("Gravação OK: {sequence}"),
                operation: operation_description,
                details: ScanDetails::ProcessOperation {
                    ticket_no: ticket_number,
                    process_step,
                },
                data: ScanData {
                    sequence_number: sequence,
                },
            })
        }
    }
}

fn class_description(
    persistence: &mut Persistence,
    operation_class: u32,
) -> Result<String, ApiError> {
    let Some(class_column) = operation_class.to_i32() else {
        return Ok(format!("Operação {operation_class}"));
    };
    let description: Option<String> = persistence
        .operation_description(class_column)
        .map_err(translate_persistence_error)?;
    Ok(description.unwrap_or_else(|| format!("Operação {operation_class}")))
}

/// Projects the current status of every machine in a section.
///
/// # Errors
///
/// Returns an error if the section is invalid or the query fails.
pub fn machine_status(
    persistence: &mut Persistence,
    query: &StatusQuery,
) -> Result<MachineStatusResponse, ApiError> {
    let section: Section = parse_section(query.section.unwrap_or(DEFAULT_SECTION))?;
    let rows: Vec<MachineStatusRow> = persistence
        .machine_status(section)
        .map_err(translate_persistence_error)?;

    let data: Vec<MachineStatusInfo> = rows
        .into_iter()
        .map(|row| MachineStatusInfo {
            machine: row.machine_id,
            machine_description: row.description,
            activity: String::from(activity_label(row.activity)),
            recorded_at: row.recorded_at,
            operation_class: row.operation_class,
            operation_description: row.operation_description,
            ticket_no: row.ticket_no,
            process_step: row.process_step,
            rolls: row.totals.map(|t| t.rolls),
            weight: row.totals.map(|t| t.weight),
            client_name: row.client_name,
            article_description: row.article_description,
        })
        .collect();

    Ok(MachineStatusResponse { data })
}
