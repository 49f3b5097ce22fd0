use axum::routing::{get, post};
use axum::Router;
use orders_ingest::adapters::all_offers::AllOffersAdapter;
use orders_ingest::adapters::world_market::WorldMarketAdapter;
use orders_ingest::config::AppConfig;
use orders_ingest::currency::converter::CurrencyConverter;
use orders_ingest::currency::rate_source::{AwesomeApiRateSource, StaticRateTable};
use orders_ingest::domain::money::Currency;
use orders_ingest::lifecycle::transitions::TransitionPolicy;
use orders_ingest::repo::orders_repo::OrdersRepo;
use orders_ingest::service::ingestion_service::IngestionService;
use orders_ingest::AppState;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&cfg.database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let live_rates = AwesomeApiRateSource {
        base_url: cfg.rate_api_base_url.clone(),
        timeout_ms: cfg.rate_api_timeout_ms,
        client: reqwest::Client::new(),
    };
    // Operator-maintained last resort for when the quote service is down.
    let fallback_rates = StaticRateTable::new()
        .with_rate(Currency::Usd, Currency::Brl, 5.20)
        .with_rate(Currency::Eur, Currency::Brl, 6.10);

    let converter = CurrencyConverter {
        live: Arc::new(live_rates),
        fallback: Arc::new(fallback_rates),
    };

    let ingestion = IngestionService {
        adapters: vec![Arc::new(AllOffersAdapter), Arc::new(WorldMarketAdapter)],
        converter,
        orders_repo: OrdersRepo { pool: pool.clone() },
        policy: TransitionPolicy::default(),
    };

    let state = AppState { ingestion };

    let app = Router::new()
        .route("/health", get(orders_ingest::http::handlers::webhooks::health))
        .route(
            "/webhooks/all-offers",
            post(orders_ingest::http::handlers::webhooks::all_offers_webhook),
        )
        .route(
            "/webhooks/world-market",
            post(orders_ingest::http::handlers::webhooks::world_market_webhook),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
