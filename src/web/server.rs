use axum::{
    extract::{Path, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::index::TrackIndexStore;
use crate::catalog::store::TrackCatalog;
use crate::cli::ServeArgs;
use crate::core::error::TrackError;
use crate::core::location::GenomicLocation;
use crate::core::types::BinCounts;
use crate::reader::aggregator::TrackReader;
use crate::utils::validation::check_bin_limit;

/// Bin width used when a query does not name one
pub const DEFAULT_BIN_WIDTH: u32 = 100;

/// Maximum number of requests processed at once
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state. Both members are built once at startup; the
/// catalog is never mutated and the index serialises its own connection.
pub struct AppState {
    pub catalog: TrackCatalog,
    pub index: TrackIndexStore,
}

/// Error response body
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
}

#[derive(Deserialize)]
struct BinsParams {
    /// Public track id; only used by `/api/bins`
    id: Option<String>,
    location: String,
    bin_width: Option<u32>,
}

/// Map a track error to a status code and a body that does not leak storage
/// paths. Server-side failures are logged in full.
fn error_response(err: &TrackError) -> Response {
    let (status, error_type) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not_found")
    } else if err.is_invalid_input() {
        (StatusCode::BAD_REQUEST, "invalid_input")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Internal error ({}): {}", error_type, err);
        "Failed to read track data".to_string()
    } else {
        err.to_string()
    };

    (
        status,
        Json(ErrorResponse {
            error: message,
            error_type: error_type.to_string(),
        }),
    )
        .into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
            error_type: "invalid_input".to_string(),
        }),
    )
        .into_response()
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the catalog or index cannot be loaded, or the server
/// fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = TrackCatalog::build(&args.root)?;
    let index = TrackIndexStore::open(&args.root)?;
    let state = Arc::new(AppState { catalog, index });

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(state, &args.address, args.port).await })
}

/// Create the application router with all routes and middleware configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/platforms", get(platforms_handler))
        .route("/api/platforms/{platform}/genomes", get(genomes_handler))
        .route(
            "/api/platforms/{platform}/genomes/{genome}/tracks",
            get(tracks_handler),
        )
        .route("/api/tracks", get(all_tracks_handler))
        .route("/api/bins", get(bins_by_id_handler))
        .route(
            "/api/bins/{platform}/{genome}/{name}",
            get(bins_by_name_handler),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        )
}

async fn run_server(state: Arc<AppState>, address: &str, port: u16) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("{address}:{port}");
    tracing::info!("Starting track-server at http://{addr}");
    println!("Starting track-server at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn platforms_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .catalog
            .platforms()
            .into_iter()
            .map(String::from)
            .collect(),
    )
}

async fn genomes_handler(
    State(state): State<Arc<AppState>>,
    Path(platform): Path<String>,
) -> Response {
    match state.catalog.genomes(&platform) {
        Ok(genomes) => Json(genomes).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn tracks_handler(
    State(state): State<Arc<AppState>>,
    Path((platform, genome)): Path<(String, String)>,
) -> Response {
    match state.catalog.tracks(&platform, &genome) {
        Ok(tracks) => Json(tracks).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn all_tracks_handler(State(state): State<Arc<AppState>>) -> Response {
    Json(state.catalog.all_tracks()).into_response()
}

async fn bins_by_id_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BinsParams>,
) -> Response {
    let Some(id) = params.id.clone() else {
        return bad_request("Missing 'id' query parameter");
    };

    query_bins(params, state, move |st, bin_width| {
        st.index.reader_from_track_id(&id, bin_width)
    })
    .await
}

async fn bins_by_name_handler(
    State(state): State<Arc<AppState>>,
    Path((platform, genome, name)): Path<(String, String, String)>,
    Query(params): Query<BinsParams>,
) -> Response {
    query_bins(params, state, move |st, bin_width| {
        st.catalog.reader(&platform, &genome, &name, bin_width)
    })
    .await
}

/// Parse the shared query parameters, then open the reader and decode the
/// bins on the blocking pool since both touch SQLite.
async fn query_bins<F>(params: BinsParams, state: Arc<AppState>, open: F) -> Response
where
    F: FnOnce(&AppState, u32) -> Result<TrackReader, TrackError> + Send + 'static,
{
    let location: GenomicLocation = match params.location.parse() {
        Ok(location) => location,
        Err(e) => return error_response(&e),
    };
    let bin_width = params.bin_width.unwrap_or(DEFAULT_BIN_WIDTH);

    if let Err(e) = check_bin_limit(&location, bin_width) {
        return bad_request(e.to_string());
    }

    let result = tokio::task::spawn_blocking(move || -> Result<BinCounts, TrackError> {
        let reader = open(state.as_ref(), bin_width)?;
        reader.bin_counts(&location)
    })
    .await;

    match result {
        Ok(Ok(counts)) => Json(counts).into_response(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => {
            tracing::error!("Bin query task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to read track data".to_string(),
                    error_type: "storage_error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
