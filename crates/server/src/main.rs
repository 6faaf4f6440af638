// Copyright (C) 2026 Rostra Contributors
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
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use time::Date;
use time::format_description::well_known::Rfc3339;
use tokio::sync::Mutex;
use tracing::{error, info};

use rostra_api::{
    ApiConfig, ApiError, ArchiveRosterRequest, ArchiveRosterResponse, ChainHistoryResponse,
    CopyDifferentWeekRequest, CopyRosterResponse, CopySameWeekRequest, CreateRosterRequest,
    CreateRosterResponse, DeleteRosterRequest, DeleteRosterResponse, GetRosterResponse,
    ListChainVersionsResponse, ListShiftsResponse, ListUnmatchedResponse, NotificationKind,
    NotificationSink, PermissionGate, PublishRosterRequest, PublishRosterResponse,
    ReconcileExtractionRequest, ReconcileExtractionResponse, ResolveUnmatchedRequest,
    ResolveUnmatchedResponse, RosterAction, UpdateRosterRequest, UpdateRosterResponse,
    VenueDirectory, archive_roster, chain_history, copy_different_week, copy_same_week,
    create_roster, delete_roster, get_roster, list_chain_versions, list_shifts, list_unmatched,
    publish_roster, reconcile_extraction, resolve_unmatched, update_roster,
};
use rostra_domain::{Person, PersonId, RawShift, VenueId};
use rostra_ledger::Actor;
use rostra_persistence::Store;

/// Rostra Server - HTTP server for the Rostra roster platform
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Path to a JSON file mapping venue ids to their personnel.
    #[arg(long)]
    personnel: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Permission gate that allows every action.
///
/// Permission management is owned by the deployment environment; this
/// binary runs open and logs every mutation instead.
#[derive(Clone)]
struct OpenGate;

impl PermissionGate for OpenGate {
    fn can_perform(&self, _actor: &Actor, _action: RosterAction) -> bool {
        true
    }
}

/// Notification sink that logs instead of delivering.
///
/// Delivery mechanics (push, mail, in-app) are external systems; the log
/// line is the integration point for them.
#[derive(Clone)]
struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, user_id: &PersonId, kind: NotificationKind, roster_id: i64) {
        let kind_name: &str = match kind {
            NotificationKind::RosterPublished => "roster_published",
            NotificationKind::RosterUpdated => "roster_updated",
        };
        info!(
            user_id = %user_id,
            kind = kind_name,
            roster_id = roster_id,
            "Staff notification"
        );
    }
}

/// Directory backed by a JSON file loaded at startup.
struct JsonDirectory {
    /// Personnel per venue id.
    venues: HashMap<String, Vec<Person>>,
}

impl JsonDirectory {
    /// An empty directory; reconciliation will queue every name.
    fn empty() -> Self {
        Self {
            venues: HashMap::new(),
        }
    }

    /// Loads a directory from a JSON file mapping venue ids to people.
    fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let raw: String = std::fs::read_to_string(path)?;
        let venues: HashMap<String, Vec<Person>> = serde_json::from_str(&raw)?;
        Ok(Self { venues })
    }
}

impl VenueDirectory for JsonDirectory {
    fn active_personnel(&self, venue_id: &VenueId) -> Vec<Person> {
        self.venues
            .get(venue_id.value())
            .map(|people| {
                people
                    .iter()
                    .filter(|person| person.active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The store wrapped in a Mutex for safe concurrent access.
    store: Arc<Mutex<Store>>,
    /// The venue personnel directory.
    directory: Arc<JsonDirectory>,
    /// Handler tunables.
    config: ApiConfig,
}

/// Actor fields carried by every mutating request.
fn default_actor_type() -> String {
    String::from("user")
}

/// API request for creating a roster.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateRosterApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor.
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The venue to schedule.
    venue_id: String,
    /// Human-readable roster name.
    name: String,
    /// Optional description.
    description: Option<String>,
    /// Any date inside the week to cover.
    week_date: Date,
}

/// API request for editing a roster.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdateRosterApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor.
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The roster to edit.
    roster_id: i64,
    /// New name, if changing.
    name: Option<String>,
    /// New description, if changing.
    description: Option<String>,
    /// Clears the description. Ignored when `description` is set.
    #[serde(default)]
    clear_description: bool,
}

/// API request addressing a single roster.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RosterActionApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor.
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The roster to act on.
    roster_id: i64,
}

/// API request for a same-week copy.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CopySameWeekApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor.
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The published roster to copy.
    source_roster_id: i64,
}

/// API request for a different-week copy.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CopyDifferentWeekApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor.
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The roster to copy.
    source_roster_id: i64,
    /// Any date inside the target week.
    target_week_date: Date,
}

/// API request for reconciling an extraction batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReconcileApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor.
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The venue the batch belongs to.
    venue_id: String,
    /// Name for the resulting draft.
    name: String,
    /// Optional description for the resulting draft.
    description: Option<String>,
    /// Any date inside the week the batch covers.
    week_date: Date,
    /// Provenance reference of the extracted document.
    source_file: Option<String>,
    /// The raw extracted shift records.
    shifts: Vec<RawShift>,
}

/// API request for resolving an unmatched entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ResolveUnmatchedApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor.
    #[serde(default = "default_actor_type")]
    actor_type: String,
    /// The entry to resolve.
    entry_id: i64,
    /// The staff member to assign.
    user_id: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Service status.
    status: String,
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
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
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
        let status: StatusCode = match &err {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidState { .. } | ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Permission { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => {
                error!(error = %err, "Storage error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Current UTC timestamp, ISO 8601.
fn now_timestamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// Handler for GET `/health`.
#[allow(clippy::unused_async)] // axum handlers must be async
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Handler for POST `/rosters`.
async fn handle_create_roster(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateRosterApiRequest>,
) -> Result<Json<CreateRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        venue_id = %req.venue_id,
        "Handling create_roster request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: CreateRosterResponse = create_roster(
        &mut store,
        &state.config,
        CreateRosterRequest {
            venue_id: req.venue_id,
            name: req.name,
            description: req.description,
            week_date: req.week_date,
        },
        &OpenGate,
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/rosters/{roster_id}`.
async fn handle_get_roster(
    AxumState(state): AxumState<AppState>,
    Path(roster_id): Path<i64>,
) -> Result<Json<GetRosterResponse>, HttpError> {
    let mut store = state.store.lock().await;
    Ok(Json(get_roster(&mut store, roster_id)?))
}

/// Handler for GET `/rosters/{roster_id}/shifts`.
async fn handle_list_shifts(
    AxumState(state): AxumState<AppState>,
    Path(roster_id): Path<i64>,
) -> Result<Json<ListShiftsResponse>, HttpError> {
    let mut store = state.store.lock().await;
    Ok(Json(list_shifts(&mut store, roster_id)?))
}

/// Handler for GET `/rosters/{roster_id}/unmatched`.
async fn handle_list_unmatched(
    AxumState(state): AxumState<AppState>,
    Path(roster_id): Path<i64>,
) -> Result<Json<ListUnmatchedResponse>, HttpError> {
    let mut store = state.store.lock().await;
    Ok(Json(list_unmatched(&mut store, roster_id)?))
}

/// Handler for POST `/rosters/update`.
async fn handle_update_roster(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<UpdateRosterApiRequest>,
) -> Result<Json<UpdateRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        roster_id = req.roster_id,
        "Handling update_roster request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: UpdateRosterResponse = update_roster(
        &mut store,
        UpdateRosterRequest {
            roster_id: req.roster_id,
            name: req.name,
            description: req.description,
            clear_description: req.clear_description,
        },
        &OpenGate,
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/rosters/publish`.
async fn handle_publish_roster(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<RosterActionApiRequest>,
) -> Result<Json<PublishRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        roster_id = req.roster_id,
        "Handling publish_roster request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: PublishRosterResponse = publish_roster(
        &mut store,
        PublishRosterRequest {
            roster_id: req.roster_id,
        },
        &OpenGate,
        &LogSink,
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/rosters/archive`.
async fn handle_archive_roster(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<RosterActionApiRequest>,
) -> Result<Json<ArchiveRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        roster_id = req.roster_id,
        "Handling archive_roster request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: ArchiveRosterResponse = archive_roster(
        &mut store,
        ArchiveRosterRequest {
            roster_id: req.roster_id,
        },
        &OpenGate,
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/rosters/delete`.
async fn handle_delete_roster(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<RosterActionApiRequest>,
) -> Result<Json<DeleteRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        roster_id = req.roster_id,
        "Handling delete_roster request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: DeleteRosterResponse = delete_roster(
        &mut store,
        DeleteRosterRequest {
            roster_id: req.roster_id,
        },
        &OpenGate,
        &actor,
    )?;
    Ok(Json(response))
}

/// Handler for POST `/rosters/copy_same_week`.
async fn handle_copy_same_week(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CopySameWeekApiRequest>,
) -> Result<Json<CopyRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        source_roster_id = req.source_roster_id,
        "Handling copy_same_week request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: CopyRosterResponse = copy_same_week(
        &mut store,
        CopySameWeekRequest {
            source_roster_id: req.source_roster_id,
        },
        &OpenGate,
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/rosters/copy_different_week`.
async fn handle_copy_different_week(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CopyDifferentWeekApiRequest>,
) -> Result<Json<CopyRosterResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        source_roster_id = req.source_roster_id,
        "Handling copy_different_week request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: CopyRosterResponse = copy_different_week(
        &mut store,
        &state.config,
        CopyDifferentWeekRequest {
            source_roster_id: req.source_roster_id,
            target_week_date: req.target_week_date,
        },
        &OpenGate,
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/extractions/reconcile`.
async fn handle_reconcile(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ReconcileApiRequest>,
) -> Result<Json<ReconcileExtractionResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        venue_id = %req.venue_id,
        shift_count = req.shifts.len(),
        "Handling reconcile request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: ReconcileExtractionResponse = reconcile_extraction(
        &mut store,
        &state.config,
        ReconcileExtractionRequest {
            venue_id: req.venue_id,
            name: req.name,
            description: req.description,
            week_date: req.week_date,
            source_file: req.source_file,
            shifts: req.shifts,
        },
        &OpenGate,
        state.directory.as_ref(),
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for POST `/unmatched/resolve`.
async fn handle_resolve_unmatched(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ResolveUnmatchedApiRequest>,
) -> Result<Json<ResolveUnmatchedResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        entry_id = req.entry_id,
        "Handling resolve_unmatched request"
    );
    let actor: Actor = Actor::new(req.actor_id, req.actor_type);
    let mut store = state.store.lock().await;
    let response: ResolveUnmatchedResponse = resolve_unmatched(
        &mut store,
        ResolveUnmatchedRequest {
            entry_id: req.entry_id,
            user_id: req.user_id,
        },
        &OpenGate,
        &actor,
        &now_timestamp(),
    )?;
    Ok(Json(response))
}

/// Handler for GET `/chains/{chain_id}/versions`.
async fn handle_list_chain_versions(
    AxumState(state): AxumState<AppState>,
    Path(chain_id): Path<String>,
) -> Result<Json<ListChainVersionsResponse>, HttpError> {
    let mut store = state.store.lock().await;
    Ok(Json(list_chain_versions(&mut store, &chain_id)?))
}

/// Handler for GET `/chains/{chain_id}/history`.
async fn handle_chain_history(
    AxumState(state): AxumState<AppState>,
    Path(chain_id): Path<String>,
) -> Result<Json<ChainHistoryResponse>, HttpError> {
    let mut store = state.store.lock().await;
    Ok(Json(chain_history(&mut store, &chain_id)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/rosters", post(handle_create_roster))
        .route("/rosters/{roster_id}", get(handle_get_roster))
        .route("/rosters/{roster_id}/shifts", get(handle_list_shifts))
        .route("/rosters/{roster_id}/unmatched", get(handle_list_unmatched))
        .route("/rosters/update", post(handle_update_roster))
        .route("/rosters/publish", post(handle_publish_roster))
        .route("/rosters/archive", post(handle_archive_roster))
        .route("/rosters/delete", post(handle_delete_roster))
        .route("/rosters/copy_same_week", post(handle_copy_same_week))
        .route(
            "/rosters/copy_different_week",
            post(handle_copy_different_week),
        )
        .route("/extractions/reconcile", post(handle_reconcile))
        .route("/unmatched/resolve", post(handle_resolve_unmatched))
        .route("/chains/{chain_id}/versions", get(handle_list_chain_versions))
        .route("/chains/{chain_id}/history", get(handle_chain_history))
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

    info!("Initializing Rostra Server");

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: Store = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Store::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Store::new_in_memory()?
    };

    // Load the venue personnel directory
    let directory: JsonDirectory = if let Some(path) = &args.personnel {
        info!("Loading personnel directory from: {}", path);
        JsonDirectory::from_file(path)?
    } else {
        info!("No personnel directory given; reconciliation will queue every name");
        JsonDirectory::empty()
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
        directory: Arc::new(directory),
        config: ApiConfig::default(),
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
