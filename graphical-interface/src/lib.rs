use api_client::{ApiConfig, FlightApiClient};
use logger::Logger;

mod app;
mod diagram;
mod fetch;
mod graph;
mod state;
mod widgets;

pub use graph::{apply_highlight, derive_airports, derive_links, AirportNode, NodeColor, RouteLink};
pub use state::{AppState, DEFAULT_COUNT, MAX_COUNT};

use app::FlightRoutesApp;

/// Opens the main window and runs the UI event loop until it closes.
pub fn run(config: ApiConfig, logger: Logger) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Flight Routes",
        Default::default(),
        Box::new(move |_cc| match FlightApiClient::new(config) {
            Ok(client) => Ok(Box::new(FlightRoutesApp::new(client, logger))),
            Err(e) => Err(Box::new(e)),
        }),
    )
}
