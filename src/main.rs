use std::sync::Arc;

use learned_payroll::api::{create_router, AppState};
use learned_payroll::config::ConfigLoader;
use learned_payroll::store::{AdminDataSource, InMemorySource, RestSource};

const DEFAULT_CONFIG_DIR: &str = "./config/learned";
const DEFAULT_PORT: &str = "3000";

/// Picks the hosted BaaS when it is configured, otherwise the seed pricing.
fn data_source(config: &ConfigLoader) -> Result<Arc<dyn AdminDataSource>, Box<dyn std::error::Error>> {
    match (std::env::var("BAAS_URL"), std::env::var("BAAS_API_KEY")) {
        (Ok(url), Ok(api_key)) => {
            let token = std::env::var("BAAS_ACCESS_TOKEN").ok();
            tracing::info!(%url, with_token = token.is_some(), "Using BaaS data source");
            Ok(Arc::new(RestSource::new(&url, &api_key, token.as_deref())?))
        }
        _ => {
            tracing::warn!(
                seed_pricing = config.seed_pricing().len(),
                "BAAS_URL or BAAS_API_KEY not set; using in-memory data"
            );
            Ok(Arc::new(InMemorySource::with_pricing(
                config.seed_pricing().to_vec(),
            )))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| DEFAULT_PORT.into())
        .parse()?;

    let config = ConfigLoader::load(&config_dir)?;
    tracing::info!(%config_dir, "Configuration loaded");

    let source = data_source(&config)?;
    let state = AppState::new(config, source);
    state.store().load_all(false).await;

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, "learned-payroll listening");
    axum::serve(listener, app).await?;
    Ok(())
}
