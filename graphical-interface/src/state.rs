use api_client::FlightRecord;

use crate::graph::{apply_highlight, derive_airports, derive_links, AirportNode, RouteLink};

/// Flights requested before the user first touches the slider.
pub const DEFAULT_COUNT: u32 = 3;
/// Upper bound of the count filter.
pub const MAX_COUNT: u32 = 50;

/// Everything the controller owns. All mutation goes through the transition
/// methods below, so each event source recomputes the derived collections in
/// a fixed order: a settled fetch rebuilds airports and links wholesale, a
/// selection toggle recolors the existing nodes only.
pub struct AppState {
    pub flights: Vec<FlightRecord>,
    pub airports: Vec<AirportNode>,
    pub links: Vec<RouteLink>,
    pub active_flight: Option<String>,
    pub count_flight: u32,
    pub is_loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            flights: Vec::new(),
            airports: Vec::new(),
            links: Vec::new(),
            active_flight: None,
            count_flight: DEFAULT_COUNT,
            is_loading: false,
        }
    }

    /// A fetch settled. `None` means the request failed and the current
    /// flight list is kept rather than clobbered; the loading flag clears
    /// either way.
    pub fn apply_fetch(&mut self, flights: Option<Vec<FlightRecord>>) {
        if let Some(flights) = flights {
            self.flights = flights;
            self.airports = derive_airports(&self.flights);
            self.links = derive_links(&self.flights);
        }
        self.is_loading = false;
    }

    /// If the given flight is already active it is deselected. Otherwise it
    /// becomes the active flight.
    pub fn toggle_active_flight(&mut self, number: &str) {
        if let Some(active) = &self.active_flight {
            if active == number {
                self.active_flight = None;
            } else {
                self.active_flight = Some(number.to_string());
            }
        } else {
            self.active_flight = Some(number.to_string());
        }

        apply_highlight(
            &mut self.airports,
            &self.flights,
            self.active_flight.as_deref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeColor;

    fn sample_flights() -> Vec<FlightRecord> {
        vec![
            FlightRecord::new("AA1", "John F Kennedy", "JFK", "Los Angeles", "LAX", "2024-01-01"),
            FlightRecord::new("BA9", "Heathrow", "LHR", "Haneda", "HND", "2024-01-02"),
        ]
    }

    #[test]
    fn initial_state_matches_the_mount_defaults() {
        let state = AppState::new();

        assert!(state.flights.is_empty());
        assert!(state.airports.is_empty());
        assert!(state.links.is_empty());
        assert_eq!(state.active_flight, None);
        assert_eq!(state.count_flight, DEFAULT_COUNT);
        assert!(!state.is_loading);
    }

    #[test]
    fn successful_fetch_replaces_flights_and_rebuilds_the_graph() {
        let mut state = AppState::new();
        state.is_loading = true;

        state.apply_fetch(Some(sample_flights()));

        assert_eq!(state.flights.len(), 2);
        assert_eq!(state.airports.len(), 4);
        assert_eq!(state.links.len(), 2);
        assert!(!state.is_loading);
    }

    #[test]
    fn failed_fetch_keeps_the_previous_flights() {
        let mut state = AppState::new();
        state.apply_fetch(Some(sample_flights()));
        state.is_loading = true;

        state.apply_fetch(None);

        assert_eq!(state.flights.len(), 2);
        assert_eq!(state.airports.len(), 4);
        assert!(!state.is_loading);
    }

    #[test]
    fn toggling_the_same_flight_twice_clears_the_selection() {
        let mut state = AppState::new();
        state.apply_fetch(Some(sample_flights()));

        state.toggle_active_flight("AA1");
        assert_eq!(state.active_flight.as_deref(), Some("AA1"));
        assert_eq!(state.airports[0].color, NodeColor::Red);
        assert_eq!(state.airports[1].color, NodeColor::Red);
        assert_eq!(state.airports[2].color, NodeColor::LightGray);

        state.toggle_active_flight("AA1");
        assert_eq!(state.active_flight, None);
        assert!(state
            .airports
            .iter()
            .all(|a| a.color == NodeColor::LightGray));
    }

    #[test]
    fn selecting_another_flight_moves_the_highlight() {
        let mut state = AppState::new();
        state.apply_fetch(Some(sample_flights()));

        state.toggle_active_flight("AA1");
        state.toggle_active_flight("BA9");

        assert_eq!(state.active_flight.as_deref(), Some("BA9"));
        assert_eq!(state.airports[0].color, NodeColor::LightGray);
        assert_eq!(state.airports[2].color, NodeColor::Red);
        assert_eq!(state.airports[3].color, NodeColor::Red);
    }

    #[test]
    fn refetch_resets_node_colors_but_keeps_the_selection() {
        let mut state = AppState::new();
        state.apply_fetch(Some(sample_flights()));
        state.toggle_active_flight("AA1");

        state.apply_fetch(Some(sample_flights()));

        // Nodes are rebuilt lightgray; only a selection change recolors them.
        assert_eq!(state.active_flight.as_deref(), Some("AA1"));
        assert!(state
            .airports
            .iter()
            .all(|a| a.color == NodeColor::LightGray));
    }
}
