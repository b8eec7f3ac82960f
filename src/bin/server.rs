use std::{fs::OpenOptions, net::SocketAddr, path::Path, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use kasbot::{AppState, JsonSheetStore, build_router, graceful_shutdown};

/// The Telegram webhook server for kasbot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the workbook snapshot. A missing file starts an empty
    /// workbook.
    #[arg(long)]
    data_path: String,

    /// The port to serve the webhook from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The secret token the webhook was registered with. When set, updates
    /// must carry the matching X-Telegram-Bot-Api-Secret-Token header.
    #[arg(long)]
    secret_token: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let store = JsonSheetStore::open(Path::new(&args.data_path))
        .expect("Could not open the workbook snapshot.");
    let state = AppState::new(store, args.secret_token);

    let migrated = state
        .ledger
        .migrate_legacy()
        .await
        .expect("Could not migrate the legacy sheet.");

    if migrated {
        tracing::info!("Migrated the legacy Sheet1 into monthly sheets.");
    }

    state
        .ledger
        .ensure_current_sheet()
        .await
        .expect("Could not create the current month's sheet.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
