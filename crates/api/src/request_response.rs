// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Wire field names keep the Portuguese contract of the legacy clients
//! (serde renames); the Rust field names are English. Dates travel as
//! `YYYY-MM-DD` strings.

/// API request to record a reception lot line.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateLotLineRequest {
    /// The factory section receiving the lot.
    #[serde(rename = "seccao")]
    pub section: u16,
    /// The reception date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// The client identifier.
    #[serde(rename = "cliente")]
    pub client_id: i32,
    /// The client display name.
    #[serde(rename = "nome")]
    pub client_name: String,
    /// The article code.
    #[serde(rename = "codigo")]
    pub article_code: i32,
    /// The article description.
    #[serde(rename = "descricao")]
    pub article_description: String,
    /// The fabric composition code.
    #[serde(rename = "composicao")]
    pub composition_code: i32,
    /// The fabric composition description.
    #[serde(rename = "composicao_descricao")]
    pub composition_description: String,
    /// Requested rolls.
    #[serde(rename = "rolos")]
    pub rolls: i32,
    /// Requested weight in kilograms.
    #[serde(rename = "pesos")]
    pub weight: f64,
    /// Free-text requisition reference.
    #[serde(rename = "requisicao")]
    pub requisition: Option<String>,
    /// The operator who recorded the entry.
    #[serde(rename = "utilizador")]
    pub recorded_by: Option<String>,
}

/// A reception lot line as presented on the wire.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LotLineInfo {
    /// The factory section.
    #[serde(rename = "seccao")]
    pub section: u16,
    /// The reception date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// The line number within (section, date).
    #[serde(rename = "linha")]
    pub line_no: i32,
    /// The client identifier.
    #[serde(rename = "cliente")]
    pub client_id: i32,
    /// The client display name.
    #[serde(rename = "nome")]
    pub client_name: String,
    /// The article code.
    #[serde(rename = "codigo")]
    pub article_code: i32,
    /// The article description.
    #[serde(rename = "descricao")]
    pub article_description: String,
    /// The fabric composition code.
    #[serde(rename = "composicao")]
    pub composition_code: i32,
    /// The fabric composition description.
    #[serde(rename = "composicao_descricao")]
    pub composition_description: String,
    /// Requested rolls.
    #[serde(rename = "rolos")]
    pub rolls: i32,
    /// Requested weight in kilograms.
    #[serde(rename = "pesos")]
    pub weight: f64,
    /// Rolls already allocated into tickets.
    #[serde(rename = "rolos_entregues")]
    pub delivered_rolls: i32,
    /// Weight already allocated into tickets.
    #[serde(rename = "pesos_entregues")]
    pub delivered_weight: f64,
    /// Free-text requisition reference.
    #[serde(rename = "requisicao")]
    pub requisition: String,
}

/// Query-string filters for listing pending lot lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct PendingQuery {
    /// Restrict to one section.
    #[serde(rename = "seccao")]
    pub section: Option<u16>,
    /// Case-insensitive substring match on the client name.
    #[serde(rename = "nome")]
    pub client_name: Option<String>,
    /// Substring match on the requisition reference.
    #[serde(rename = "requisicao")]
    pub requisition: Option<String>,
    /// One-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

/// API response for listing pending lot lines.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListPendingResponse {
    /// The page of lot lines, most recent first.
    pub data: Vec<LotLineInfo>,
    /// Total number of pending lines matching the filters.
    pub total: i64,
    /// The page returned.
    pub page: u32,
    /// Total number of pages.
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// API response for deleting a lot line.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteLotLineResponse {
    /// A success message.
    pub message: String,
}

/// One allocation item on a ticket creation request.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TicketItemRequest {
    /// The lot line's section.
    #[serde(rename = "seccao")]
    pub section: u16,
    /// The lot line's reception date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// The lot line's line number.
    #[serde(rename = "linha")]
    pub line_no: i32,
    /// Rolls taken from the line.
    #[serde(rename = "rolos")]
    pub rolls: i32,
    /// Weight taken from the line.
    #[serde(rename = "pesos")]
    pub weight: f64,
}

/// API request to create a finishing ticket.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CreateTicketRequest {
    /// The section the ticket belongs to.
    #[serde(rename = "seccao")]
    pub section: u16,
    /// The ticket date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// Free-text note.
    #[serde(rename = "obs")]
    pub note: Option<String>,
    /// The lot lines aggregated into the ticket.
    #[serde(rename = "itens")]
    pub items: Vec<TicketItemRequest>,
}

/// API response for a successful ticket creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTicketResponse {
    /// The per-section ticket number.
    #[serde(rename = "faNumero")]
    pub ticket_no: u32,
    /// Number of allocation lines written.
    #[serde(rename = "linhas")]
    pub lines: usize,
}

/// One allocation line on a ticket detail.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AllocationInfo {
    /// The lot line's section.
    #[serde(rename = "seccao")]
    pub section: u16,
    /// The lot line's reception date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// The lot line's line number.
    #[serde(rename = "linha")]
    pub line_no: i32,
    /// Rolls allocated.
    #[serde(rename = "rolos")]
    pub rolls: i32,
    /// Weight allocated.
    #[serde(rename = "pesos")]
    pub weight: f64,
}

/// One delivery event on a ticket detail.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeliveryInfo {
    /// The per-ticket event line number.
    #[serde(rename = "linha")]
    pub line_no: i32,
    /// The delivery date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// Rolls delivered by this event.
    #[serde(rename = "rolos")]
    pub rolls: i32,
    /// Weight delivered by this event.
    #[serde(rename = "pesos")]
    pub weight: f64,
    /// The finishing state of the delivered goods.
    #[serde(rename = "estadoId")]
    pub state_id: i32,
    /// Free-text note.
    #[serde(rename = "observacoes")]
    pub note: String,
}

/// API response with the full detail of one ticket.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TicketDetailResponse {
    /// The per-section ticket number.
    #[serde(rename = "faNumero")]
    pub ticket_no: u32,
    /// The section the ticket belongs to.
    #[serde(rename = "seccao")]
    pub section: u16,
    /// The ticket date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// The ticket state (`open` or `completed`).
    #[serde(rename = "estado")]
    pub state: String,
    /// Free-text note.
    #[serde(rename = "obs")]
    pub note: String,
    /// The client identifier shared by all allocated lines.
    #[serde(rename = "cliente")]
    pub client_id: i32,
    /// The client display name.
    #[serde(rename = "nome")]
    pub client_name: String,
    /// The article description of the first allocated line.
    #[serde(rename = "descricao")]
    pub article_description: String,
    /// Total rolls across all allocations.
    #[serde(rename = "rolos")]
    pub total_rolls: i32,
    /// Total weight across all allocations.
    #[serde(rename = "pesos")]
    pub total_weight: f64,
    /// Cumulative rolls delivered so far.
    #[serde(rename = "rolos_entregues")]
    pub delivered_rolls: i32,
    /// Cumulative weight delivered so far.
    #[serde(rename = "pesos_entregues")]
    pub delivered_weight: f64,
    /// The allocated lot lines.
    #[serde(rename = "itens")]
    pub items: Vec<AllocationInfo>,
    /// The delivery events, in order.
    #[serde(rename = "entregas")]
    pub deliveries: Vec<DeliveryInfo>,
}

/// API response with the most recent ticket of a section.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LastTicketResponse {
    /// The per-section ticket number.
    #[serde(rename = "faNumero")]
    pub ticket_no: u32,
    /// The ticket date (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
}

/// API request to append a process step to a ticket.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AddProcessStepRequest {
    /// The process definition identifier.
    #[serde(rename = "processoId")]
    pub process_id: i32,
    /// Optional colour identifier.
    #[serde(rename = "corId")]
    pub color_id: Option<i32>,
    /// Rolls covered by the step.
    #[serde(rename = "rolos")]
    pub rolls: Option<i32>,
    /// Weight covered by the step.
    #[serde(rename = "pesos")]
    pub weight: Option<f64>,
    /// Free-text note.
    #[serde(rename = "observacoes")]
    pub note: Option<String>,
}

/// API response for a successful process step append.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddProcessStepResponse {
    /// The per-ticket step line number.
    #[serde(rename = "linha")]
    pub line_no: i32,
    /// A success message.
    pub message: String,
}

/// API response for a successful process step removal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoveProcessStepResponse {
    /// A success message.
    pub message: String,
}

/// One process step as presented on the wire.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessStepInfo {
    /// The per-ticket step line number.
    #[serde(rename = "linha")]
    pub line_no: i32,
    /// The date the step was recorded (`YYYY-MM-DD`).
    #[serde(rename = "data")]
    pub date: String,
    /// The process definition identifier.
    #[serde(rename = "processoId")]
    pub process_id: i32,
    /// Optional colour identifier.
    #[serde(rename = "corId")]
    pub color_id: Option<i32>,
    /// Rolls covered by the step.
    #[serde(rename = "rolos")]
    pub rolls: i32,
    /// Weight covered by the step.
    #[serde(rename = "pesos")]
    pub weight: f64,
    /// Free-text note.
    #[serde(rename = "observacoes")]
    pub note: String,
}

/// API response for listing the process steps of a ticket.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ListProcessStepsResponse {
    /// The per-section ticket number.
    #[serde(rename = "faNumero")]
    pub ticket_no: u32,
    /// The steps, ordered by line number.
    #[serde(rename = "processos")]
    pub steps: Vec<ProcessStepInfo>,
}

/// API request to register a partial or final delivery.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegisterDeliveryRequest {
    /// Rolls delivered.
    #[serde(rename = "rolos")]
    pub rolls: i32,
    /// Weight delivered.
    #[serde(rename = "pesos")]
    pub weight: f64,
    /// The finishing state of the delivered goods.
    #[serde(rename = "estadoId")]
    pub state_id: i32,
    /// Free-text note.
    #[serde(rename = "observacoes")]
    pub note: Option<String>,
}

/// API response for a successful delivery registration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegisterDeliveryResponse {
    /// The per-ticket event line number.
    #[serde(rename = "linha")]
    pub line_no: i32,
    /// Cumulative rolls delivered after this event.
    #[serde(rename = "rolos_entregues")]
    pub delivered_rolls: i32,
    /// Cumulative weight delivered after this event.
    #[serde(rename = "pesos_entregues")]
    pub delivered_weight: f64,
    /// The ticket state after this event (`open` or `completed`).
    #[serde(rename = "estado")]
    pub state: String,
}

/// API request to record a barcode scan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanRequest {
    /// The raw scanned code, dot-separated.
    #[serde(rename = "codigoCompleto")]
    pub code: String,
    /// The terminal that produced the scan.
    #[serde(rename = "terminal")]
    pub terminal: Option<String>,
}

/// Operation-specific detail of a scan response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ScanDetails {
    /// A machine selection scan.
    MachineSelection {
        /// The selected machine.
        #[serde(rename = "maquina")]
        machine: u32,
        /// The machine description.
        #[serde(rename = "maquina_descricao")]
        machine_description: String,
    },
    /// A process operation scan.
    ProcessOperation {
        /// The ticket the operation refers to.
        #[serde(rename = "fa_numero")]
        ticket_no: u32,
        /// The process step line number.
        #[serde(rename = "processo")]
        process_step: u32,
    },
}

/// Sequence payload of a scan response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanData {
    /// The sequence number assigned to the reading.
    #[serde(rename = "sequenceNumber")]
    pub sequence_number: i64,
}

/// API response for a recorded barcode scan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanResponse {
    /// Whether the reading was recorded.
    pub success: bool,
    /// A human-readable outcome message.
    pub message: String,
    /// The description of the operation class.
    #[serde(rename = "operacao")]
    pub operation: String,
    /// Operation-specific details.
    #[serde(rename = "detalhes")]
    pub details: ScanDetails,
    /// The sequence payload.
    pub data: ScanData,
}

/// Query-string parameters for the machine status view.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Deserialize)]
pub struct StatusQuery {
    /// The section to project; defaults to section 1.
    #[serde(rename = "seccao")]
    pub section: Option<u16>,
}

/// One machine row of the status view.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MachineStatusInfo {
    /// The machine identifier.
    #[serde(rename = "maquina")]
    pub machine: i32,
    /// The machine description.
    #[serde(rename = "maquina_descricao")]
    pub machine_description: String,
    /// The activity classification (`free`, `in`, `out` or `neutral`).
    #[serde(rename = "estado")]
    pub activity: String,
    /// Timestamp of the latest reading, if any.
    #[serde(rename = "data")]
    pub recorded_at: Option<String>,
    /// The operation class of the latest reading.
    #[serde(rename = "operacao")]
    pub operation_class: Option<i32>,
    /// The description of that operation class, when registered.
    #[serde(rename = "operacao_descricao")]
    pub operation_description: Option<String>,
    /// The ticket the machine is working on.
    #[serde(rename = "fa_numero")]
    pub ticket_no: Option<u32>,
    /// The process step line number of the reading.
    #[serde(rename = "processo")]
    pub process_step: Option<i32>,
    /// The ticket's total rolls.
    #[serde(rename = "rolos")]
    pub rolls: Option<i32>,
    /// The ticket's total weight.
    #[serde(rename = "pesos")]
    pub weight: Option<f64>,
    /// The client name behind the ticket.
    #[serde(rename = "cliente_nome")]
    pub client_name: Option<String>,
    /// The article description behind the ticket.
    #[serde(rename = "artigo_descricao")]
    pub article_description: Option<String>,
}

/// API response for the machine status view.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MachineStatusResponse {
    /// One row per machine in the section.
    pub data: Vec<MachineStatusInfo>,
}
