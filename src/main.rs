use std::path::Path;
use std::process::ExitCode;

use api_client::ApiConfig;
use logger::{Color, Logger};

const LOG_DIR: &str = "logs";

fn main() -> ExitCode {
    let logger = match Logger::new(Path::new(LOG_DIR), "flight-routes") {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("could not set up logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = logger.error(&format!("configuration error: {e}"), true);
            return ExitCode::FAILURE;
        }
    };

    let _ = logger.info("starting flight routes", Color::Green, true);

    if let Err(e) = graphical_interface::run(config, logger.clone()) {
        let _ = logger.error(&format!("UI error: {e}"), true);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
