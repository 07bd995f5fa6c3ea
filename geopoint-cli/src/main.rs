//! geopoint CLI - command-line lookup against a row source.
//!
//! One-shot mode loads the row source, publishes a dataset, answers a
//! single query, and prints the JSON response. Watch mode keeps the
//! process alive with the periodic refresh daemon and answers
//! `<lat> <lon>` query lines from stdin.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use geopoint::logging::{default_log_dir, default_log_file, init_logging};
use geopoint::query::QueryService;
use geopoint::reload::{RefreshConfig, RefreshDaemon, ReloadController};
use geopoint::source::{FileRowSource, HttpRowSource, RowSource, SourceError};
use geopoint::store::DatasetStore;

#[derive(Parser)]
#[command(name = "geopoint", version = geopoint::VERSION)]
#[command(about = "Point lookup with nearest-neighbor fallback over a coordinate-keyed dataset", long_about = None)]
struct Args {
    /// Row source: an http(s) URL returning a JSON row array, or a path
    /// to a local JSON file with the same shape
    #[arg(long)]
    source: String,

    /// Query latitude in decimal degrees
    #[arg(long, required_unless_present = "watch")]
    lat: Option<String>,

    /// Query longitude in decimal degrees
    #[arg(long, required_unless_present = "watch")]
    lon: Option<String>,

    /// Keep running: refresh the dataset periodically and answer
    /// "<lat> <lon>" query lines from stdin
    #[arg(long)]
    watch: bool,

    /// Refresh interval in seconds for watch mode
    #[arg(long, default_value = "300")]
    refresh_secs: u64,

    /// Pretty-print JSON responses
    #[arg(long)]
    pretty: bool,
}

/// Row source picked from the `--source` argument.
enum CliSource {
    Http(HttpRowSource),
    File(FileRowSource),
}

impl CliSource {
    /// URLs become HTTP sources; anything else is treated as a path.
    fn from_arg(source: &str) -> Result<Self, SourceError> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Ok(Self::Http(HttpRowSource::new(source)?))
        } else {
            Ok(Self::File(FileRowSource::new(source)))
        }
    }
}

impl RowSource for CliSource {
    async fn fetch_rows(&self) -> Result<Vec<geopoint::dataset::Row>, SourceError> {
        match self {
            Self::Http(s) => s.fetch_rows().await,
            Self::File(s) => s.fetch_rows().await,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let source = match CliSource::from_arg(&args.source) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: invalid source '{}': {}", args.source, e);
            process::exit(1);
        }
    };

    let store = Arc::new(DatasetStore::new());
    let controller = ReloadController::new(source, Arc::clone(&store));

    if args.watch {
        run_watch(args, controller).await;
    } else {
        run_once(args, controller, store).await;
    }
}

/// One-shot: load, query, print, exit.
async fn run_once(args: Args, controller: ReloadController<CliSource>, store: Arc<DatasetStore>) {
    if let Err(e) = controller.reload().await {
        eprintln!("Error: failed to load dataset: {}", e);
        process::exit(1);
    }

    let service = QueryService::new(store);
    match service.handle(args.lat.as_deref(), args.lon.as_deref()) {
        Ok(response) => print_response(&response, args.pretty),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Watch mode: initial load, refresh daemon, query loop over stdin.
async fn run_watch(args: Args, controller: ReloadController<CliSource>) {
    let _logging_guard = match init_logging(default_log_dir(), default_log_file()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    let store = Arc::clone(controller.store());
    if let Err(e) = controller.reload().await {
        eprintln!("Error: initial load failed: {}", e);
        process::exit(1);
    }

    let shutdown = CancellationToken::new();
    let config = RefreshConfig::with_interval(Duration::from_secs(args.refresh_secs));
    let daemon = RefreshDaemon::new(controller, config, shutdown.clone()).start();

    let service = QueryService::new(store);
    eprintln!("Enter '<lat> <lon>' per line (Ctrl-D to exit):");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => answer_line(&service, &line, args.pretty),
                    Ok(None) => break, // EOF
                    Err(e) => {
                        eprintln!("Error: failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        }
    }

    shutdown.cancel();
    if let Err(e) = daemon.await {
        tracing::warn!(error = %e, "Refresh daemon did not shut down cleanly");
    }
}

/// Answer one "<lat> <lon>" query line.
fn answer_line(service: &QueryService, line: &str, pretty: bool) {
    let mut parts = line.split_whitespace();
    let lat = parts.next();
    let lon = parts.next();

    match service.handle(lat, lon) {
        Ok(response) => print_response(&response, pretty),
        Err(e) => eprintln!("Error: {}", e),
    }
}

/// Print a query response as JSON on stdout.
fn print_response(response: &geopoint::query::QueryResponse, pretty: bool) {
    let serialized = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };

    match serialized {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: failed to serialize response: {}", e),
    }
}
