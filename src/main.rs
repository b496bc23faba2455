use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dr_core::constants::DEFAULT_REST_ADDR;
use dr_core::{CoreConfig, DashboardContext};

/// Main entry point for the disaster response dashboard
///
/// Loads the message table and the classifier once, then serves the dashboard until the
/// process exits. A missing or malformed database or model aborts startup.
///
/// # Environment Variables
/// - `DR_REST_ADDR`: listen address (default: "0.0.0.0:3001")
/// - `DR_DATABASE_PATH`: SQLite database (default: "../data/DisasterResponse.db")
/// - `DR_TABLE_NAME`: message table (default: "DisasterResponse")
/// - `DR_MODEL_PATH`: serialized classifier (default: "../models/nbsvm.json")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If loading, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dr_run=debug".parse()?)
                .add_directive("api_rest=debug".parse()?)
                .add_directive("dr_core=debug".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("DR_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = CoreConfig::from_values(
        std::env::var("DR_DATABASE_PATH").ok(),
        std::env::var("DR_TABLE_NAME").ok(),
        std::env::var("DR_MODEL_PATH").ok(),
    )?;

    tracing::info!(
        "++ Loading table {} from {} and model from {}",
        cfg.table_name(),
        cfg.database_path().display(),
        cfg.model_path().display()
    );
    let ctx = DashboardContext::load(&cfg)?;
    tracing::info!(
        "++ Loaded {} messages across {} categories",
        ctx.dataset().len(),
        ctx.dataset().categories().len()
    );

    tracing::info!("++ Starting dashboard on {}", rest_addr);
    api_rest::serve(&rest_addr, ctx).await
}
