use crate::aggregator::GuessAggregator;
use crate::cache::{DailyCache, MemoryDailyCache, NoCache};
use crate::cli::Args;
use crate::clock::{Clock, SystemClock};
use crate::resolver::DailyResolver;
use crate::store::{PgStore, Store};
use anyhow::Context;
use axum::Router;
use axum::routing::{get, post};
use chrono::NaiveDate;
use deadpool_diesel::Runtime;
use deadpool_diesel::postgres::{Manager, Pool};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod aggregator;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod compare;
pub mod errors;
pub mod model;
pub mod payloads;
pub mod progress;
pub mod regex_eval;
pub mod resolver;
pub mod response;
pub mod schedule;
pub mod schema;
pub mod store;

mod api;
mod extract;

/// Shared by every handler. Cloning is cheap: everything inside is behind
/// an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub resolver: DailyResolver,
    pub aggregator: GuessAggregator,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, cache: Arc<dyn DailyCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            resolver: DailyResolver::new(store.clone(), cache),
            aggregator: GuessAggregator::new(store.clone()),
            store,
            clock,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

pub async fn init_router(args: &Args) -> anyhow::Result<Router> {
    info!("Initializing database pool...");
    let pool = init_pool(&args.connection_str, args.db_pool_max_size)
        .context("Failed to initialize database pool")?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    if args.schedule_days > 0 {
        info!(
            "Scheduling daily assignments {} days ahead...",
            args.schedule_days
        );
        schedule::schedule_ahead(store.as_ref(), clock.today(), args.schedule_days)
            .await
            .context("Failed to schedule daily assignments")?;
    }

    let cache: Arc<dyn DailyCache> = if args.daily_cache {
        Arc::new(MemoryDailyCache::new())
    } else {
        Arc::new(NoCache)
    };

    info!("Initializing router...");
    Ok(init_router_internal(AppState::new(store, cache, clock)).layer(TraceLayer::new_for_http()))
}

pub fn init_test_router(state: AppState) -> Router {
    init_router_internal(state)
}

fn init_router_internal(state: AppState) -> Router {
    Router::new()
        .nest("/language", language_routes())
        .nest("/snippet", snippet_routes())
        .nest("/complexity", complexity_routes())
        .nest("/regex", regex_routes())
        .with_state(state)
}

fn init_pool(conn_str: &str, max_size: u32) -> anyhow::Result<Pool> {
    let manager = Manager::new(conn_str, Runtime::Tokio1);
    let pool = Pool::builder(manager).max_size(max_size as usize).build()?;
    Ok(pool)
}

fn language_routes() -> Router<AppState> {
    Router::new()
        .route("/list_languages", get(api::language::list_languages))
        .route("/submit_guess", post(api::language::submit_guess))
        .route("/get_hint", get(api::language::get_hint))
        .route("/get_guess_counts", get(api::language::get_guess_counts))
        .route("/reveal", get(api::language::reveal))
        .route("/yesterday", get(api::language::yesterday))
}

fn snippet_routes() -> Router<AppState> {
    Router::new()
        .route("/get_code", get(api::snippet::get_code))
        .route("/submit_guess", post(api::snippet::submit_guess))
        .route("/get_guess_counts", get(api::snippet::get_guess_counts))
        .route("/reveal", get(api::snippet::reveal))
        .route("/yesterday", get(api::snippet::yesterday))
}

fn complexity_routes() -> Router<AppState> {
    Router::new()
        .route("/get_challenge", get(api::complexity::get_challenge))
        .route("/submit_guess", post(api::complexity::submit_guess))
        .route("/reveal", get(api::complexity::reveal))
}

fn regex_routes() -> Router<AppState> {
    Router::new()
        .route("/get_challenge", get(api::regex::get_challenge))
        .route("/get_solutions", get(api::regex::get_solutions))
        .route("/submit_solution", post(api::regex::submit_solution))
}
