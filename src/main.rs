#![allow(clippy::result_large_err)]

//! Eko-Akort dashboard binary.
//!
//! Loads one user's subscriptions and reading history, evaluates the
//! dashboard snapshot, prints the summary, and persists the recomputed
//! monthly score back to the user row.

use chrono::Utc;
use dotenvy::dotenv;
use eko_akort::config::{database, scoring};
use eko_akort::core::{engine, profile, report};
use eko_akort::errors::Result;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Load scoring configuration
    let config = scoring::load_default_config();

    // 4. Initialize database and seed the bespoke companies
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;
    database::create_tables(&db).await?;
    database::seed_default_companies(&db).await?;

    // 5. Evaluate the dashboard for the selected user
    let user_id: i64 = env::var("EKO_USER_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);

    let user = profile::get_user(&db, user_id).await?;
    let subscriptions = profile::load_subscription_profiles(&db, user.id).await?;
    let records = profile::load_consumption_records(&db, &subscriptions).await?;

    let snapshot = engine::evaluate(&subscriptions, &records, &config.scoring, Utc::now());
    println!("{}", report::format_dashboard_summary(&user.name, &snapshot));

    // 6. Persist the recomputed monthly score; the lifetime total is an
    // accumulator owned by reading entry and tip application
    profile::sync_user_points(&db, user.id, snapshot.monthly_points).await?;
    info!(
        user = %user.name,
        monthly_points = snapshot.monthly_points,
        "Dashboard evaluated and monthly score synced"
    );

    Ok(())
}
