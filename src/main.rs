mod config;
mod logging;

use color_eyre::Report;
use tracing::{debug, info};

use crate::config::ServiceConfig;

fn main() -> Result<(), Report> {
    color_eyre::install()?;
    logging::setup()?;

    if let Err(e) = dotenvy::dotenv() {
        debug!("no .env file loaded: {}", e);
    }

    let mut config = ServiceConfig::default();
    let result = envbind::load_with_prefix(&mut config, ServiceConfig::PREFIX);
    config.validate(result)?;

    envbind::log_with_prefix(&config, ServiceConfig::PREFIX);
    info!("Broker: {}", config.rabbitmq.redacted_url());

    Ok(())
}
