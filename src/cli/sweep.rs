//! Sweep command - one-shot removal of expired token records
//!
//! The API itself never deletes anything; expired records simply stop
//! appearing in list queries. This command is the out-of-band maintenance
//! path for reclaiming the space.

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Delete expired tokens and exit
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config).await?;

    let removed = state.token_service.sweep_expired().await?;
    info!(removed, "Expired token sweep complete");

    Ok(())
}
