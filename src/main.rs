use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use vitibrasil::Server;
use vitibrasil::config::Config;
use vitibrasil::logging::init_logging;
use vitibrasil::portal::Portal;
use vitibrasil::routes::{self, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(e) = init_logging(config.log_format, config.profile.default_log_directive()) {
        eprintln!("error: failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    info!(
        profile = ?config.profile,
        portal = %config.portal_url,
        timeout_secs = config.portal_timeout_secs,
        "starting"
    );

    let state = AppState {
        portal: Portal::new(config.portal_url.clone(), config.portal_timeout()),
        public_url: config.public_url.clone(),
        pretty_json: config.profile.pretty_json(),
    };

    match Server::bind(config.addr).serve(routes::app(Arc::new(state))).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}
