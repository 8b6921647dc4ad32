// Copyright (C) 2026 The Tinturaria Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tinturaria_api::{ApiError, handlers};
use tinturaria_api::request_response::{
    AddProcessStepRequest, AddProcessStepResponse, CreateLotLineRequest, CreateTicketRequest,
    CreateTicketResponse, DeleteLotLineResponse, LastTicketResponse, ListPendingResponse,
    ListProcessStepsResponse, LotLineInfo, MachineStatusResponse, PendingQuery,
    RegisterDeliveryRequest, RegisterDeliveryResponse, RemoveProcessStepResponse, ScanRequest,
    ScanResponse, StatusQuery, TicketDetailResponse,
};
use tinturaria_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::info;

/// Tinturaria Server - HTTP backend for the dyeing and finishing floor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence adapter holds one connection and is wrapped in a Mutex
/// for safe concurrent access.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameter carrying the section scope of ticket routes.
///
/// The legacy clients derive the section from the operator session; here it
/// travels as a query parameter and defaults to section 1.
#[derive(Debug, Deserialize)]
struct SectionQuery {
    #[serde(rename = "seccao")]
    section: Option<u16>,
}

impl SectionQuery {
    const fn section(&self) -> u16 {
        match self.section {
            Some(section) => section,
            None => 1,
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "Internal error");
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Handler for POST `/recepcao`.
///
/// Records a reception lot line.
async fn handle_create_lot_line(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateLotLineRequest>,
) -> Result<Json<LotLineInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LotLineInfo = handlers::create_lot_line(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/recepcao`.
///
/// Lists pending lot lines with filters and pagination.
async fn handle_list_pending(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<PendingQuery>,
) -> Result<Json<ListPendingResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListPendingResponse = handlers::list_pending(&mut persistence, &query)?;
    Ok(Json(response))
}

/// Handler for GET `/recepcao/{seccao}/{data}/{linha}`.
async fn handle_get_lot_line(
    AxumState(app_state): AxumState<AppState>,
    Path((section, date, line_no)): Path<(u16, String, i32)>,
) -> Result<Json<LotLineInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LotLineInfo = handlers::get_lot_line(&mut persistence, section, &date, line_no)?;
    Ok(Json(response))
}

/// Handler for DELETE `/recepcao/{seccao}/{data}/{linha}`.
///
/// Deletes a lot line that has no allocated quantity.
async fn handle_delete_lot_line(
    AxumState(app_state): AxumState<AppState>,
    Path((section, date, line_no)): Path<(u16, String, i32)>,
) -> Result<Json<DeleteLotLineResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteLotLineResponse =
        handlers::delete_lot_line(&mut persistence, section, &date, line_no)?;
    Ok(Json(response))
}

/// Handler for POST `/fa`.
///
/// Creates a finishing ticket aggregating one or more lot lines.
async fn handle_create_ticket(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<Json<CreateTicketResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CreateTicketResponse = handlers::create_ticket(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/fa/ultima`.
///
/// Returns the most recent ticket of the section.
async fn handle_last_ticket(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SectionQuery>,
) -> Result<Json<LastTicketResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LastTicketResponse = handlers::last_ticket(&mut persistence, query.section())?;
    Ok(Json(response))
}

/// Handler for GET `/fa/{faNumero}`.
async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_no): Path<u32>,
    Query(query): Query<SectionQuery>,
) -> Result<Json<TicketDetailResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: TicketDetailResponse =
        handlers::get_ticket(&mut persistence, query.section(), ticket_no)?;
    Ok(Json(response))
}

/// Handler for POST `/processos/add/{faNumero}`.
async fn handle_add_process_step(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_no): Path<u32>,
    Query(query): Query<SectionQuery>,
    Json(req): Json<AddProcessStepRequest>,
) -> Result<Json<AddProcessStepResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AddProcessStepResponse =
        handlers::add_process_step(&mut persistence, query.section(), ticket_no, req)?;
    Ok(Json(response))
}

/// Handler for DELETE `/processos/remove/{faNumero}/{linha}`.
async fn handle_remove_process_step(
    AxumState(app_state): AxumState<AppState>,
    Path((ticket_no, line_no)): Path<(u32, i32)>,
    Query(query): Query<SectionQuery>,
) -> Result<Json<RemoveProcessStepResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RemoveProcessStepResponse =
        handlers::remove_process_step(&mut persistence, query.section(), ticket_no, line_no)?;
    Ok(Json(response))
}

/// Handler for GET `/processos/{faNumero}`.
async fn handle_list_process_steps(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_no): Path<u32>,
    Query(query): Query<SectionQuery>,
) -> Result<Json<ListProcessStepsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListProcessStepsResponse =
        handlers::list_process_steps(&mut persistence, query.section(), ticket_no)?;
    Ok(Json(response))
}

/// Handler for POST `/entregas/registar/{faNumero}`.
///
/// Registers a partial or final delivery against a ticket.
async fn handle_register_delivery(
    AxumState(app_state): AxumState<AppState>,
    Path(ticket_no): Path<u32>,
    Query(query): Query<SectionQuery>,
    Json(req): Json<RegisterDeliveryRequest>,
) -> Result<Json<RegisterDeliveryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterDeliveryResponse =
        handlers::register_delivery(&mut persistence, query.section(), ticket_no, req)?;
    Ok(Json(response))
}

/// Handler for POST `/operacoes/registar-leitura`.
///
/// Decodes a barcode scan and records the reading.
async fn handle_register_scan(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ScanResponse = handlers::register_scan(&mut persistence, req)?;
    Ok(Json(response))
}

/// Handler for GET `/operacoes/maquinas-status`.
async fn handle_machine_status(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<MachineStatusResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: MachineStatusResponse = handlers::machine_status(&mut persistence, &query)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/recepcao", post(handle_create_lot_line))
        .route("/recepcao", get(handle_list_pending))
        .route("/recepcao/{seccao}/{data}/{linha}", get(handle_get_lot_line))
        .route(
            "/recepcao/{seccao}/{data}/{linha}",
            delete(handle_delete_lot_line),
        )
        .route("/fa", post(handle_create_ticket))
        .route("/fa/ultima", get(handle_last_ticket))
        .route("/fa/{faNumero}", get(handle_get_ticket))
        .route("/processos/add/{faNumero}", post(handle_add_process_step))
        .route(
            "/processos/remove/{faNumero}/{linha}",
            delete(handle_remove_process_step),
        )
        .route("/processos/{faNumero}", get(handle_list_process_steps))
        .route(
            "/entregas/registar/{faNumero}",
            post(handle_register_delivery),
        )
        .route("/operacoes/registar-leitura", post(handle_register_scan))
        .route("/operacoes/maquinas-status", get(handle_machine_status))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tinturaria Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
