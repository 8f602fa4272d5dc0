use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use wayfinder::cache::{CachedRouteClient, RouteCacheConfig};
use wayfinder::client::{NeshanClient, NeshanConfig};
use wayfinder::connectivity::AlwaysOnline;
use wayfinder::domain::Coordinate;
use wayfinder::session::{RouteSession, SaveOutcome, SearchSession, SessionState};
use wayfinder::store::JsonFileStore;

/// Default favorites file, relative to the working directory.
const DEFAULT_FAVORITES_PATH: &str = "favorites.json";

const USAGE: &str = "usage: wayfinder <query> <latitude> <longitude>";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [query, lat, lng] = args.as_slice() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };

    let origin = match (lat.parse::<f64>(), lng.parse::<f64>()) {
        (Ok(lat), Ok(lng)) => match Coordinate::new(lat, lng) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    // Get credentials from environment
    let api_key = std::env::var("NESHAN_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: NESHAN_API_KEY not set. API calls will fail.");
        String::new()
    });
    let mut config = NeshanConfig::new(api_key);
    if let Ok(base_url) = std::env::var("NESHAN_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    let client = match NeshanClient::new(config) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!(error = %e, "failed to create client");
            return ExitCode::FAILURE;
        }
    };

    let favorites_path = std::env::var("WAYFINDER_FAVORITES")
        .unwrap_or_else(|_| DEFAULT_FAVORITES_PATH.to_string());
    let store = match JsonFileStore::open(&favorites_path) {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "failed to open favorites");
            return ExitCode::FAILURE;
        }
    };

    let mut search = SearchSession::new(Arc::clone(&client), store, AlwaysOnline);
    info!(favorites = search.favorites().len(), "loaded favorites");

    search.search(query, origin);
    search.settle().await;

    let results = match search.state() {
        SessionState::Loaded(results) if !results.is_empty() => results.clone(),
        SessionState::Loaded(_) => {
            println!("No places found for {query:?}");
            return ExitCode::SUCCESS;
        }
        SessionState::Failed(e) => {
            error!(error = %e, "search failed");
            return ExitCode::FAILURE;
        }
        SessionState::Idle | SessionState::Loading => return ExitCode::FAILURE,
    };

    for (i, result) in results.iter().enumerate() {
        println!("{:>2}. {} ({})", i + 1, result.title, result.address);
    }

    let chosen = &results[0];
    match search.select_result(chosen) {
        Ok(SaveOutcome::Saved(saved)) => info!(id = %saved.id, "saved to favorites"),
        Ok(SaveOutcome::AlreadySaved(id)) => info!(%id, "already in favorites"),
        Err(e) => error!(error = %e, "could not save favorite"),
    }

    let routes_client = Arc::new(CachedRouteClient::new(
        NeshanClient::clone(&client),
        &RouteCacheConfig::default(),
    ));
    let mut routes = RouteSession::new(routes_client);
    routes.get_route(origin, chosen.coordinate);
    routes.settle().await;

    match routes.state() {
        SessionState::Loaded(route) => {
            println!();
            println!("Route to {}: {} points", chosen.title, route.len());
            for point in route.coordinates() {
                println!("  {point}");
            }
            ExitCode::SUCCESS
        }
        SessionState::Failed(e) => {
            error!(error = %e, "routing failed");
            ExitCode::FAILURE
        }
        SessionState::Idle | SessionState::Loading => ExitCode::FAILURE,
    }
}
