//! tripsmith server entrypoint

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tripsmith::agents::TripCrew;
use tripsmith::api::AppState;
use tripsmith::config::PlannerConfig;
use tripsmith::llm::GeminiClient;
use tripsmith::planner::TripPlanner;
use tripsmith::resolver::{OpenRouteApi, RouteResolver};
use tripsmith::search::SerperClient;
use tripsmith::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PlannerConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    // The planner cannot degrade without its provider credentials, so a
    // missing key stops the process before the listener binds.
    if let Err(source) = config.validate() {
        error!("{source:#}");
        std::process::exit(1);
    }
    let credentials = config.keys.resolve()?;

    let geo = OpenRouteApi::new(&config.geo, &credentials.openroute_api_key)?;
    let resolver = RouteResolver::new(Arc::new(geo));

    let llm = GeminiClient::new(&config.llm, credentials.google_api_key.clone())?;
    let search = SerperClient::new(&config.search, credentials.serper_api_key)?;
    let crew = TripCrew::new(Arc::new(llm), Arc::new(search));

    let planner = TripPlanner::new(resolver, crew, credentials.google_api_key);
    let state = Arc::new(AppState { planner });

    info!(version = tripsmith::VERSION, "Starting tripsmith");
    web::run(&config.server, state).await
}

fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("tripsmith={level},tower_http=info").into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
