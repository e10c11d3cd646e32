use api_client::decode_flights;
use graphical_interface::{AppState, NodeColor};

// The fixture mirrors a real flights-endpoint envelope: extra top-level
// fields are ignored, only `data` is consumed.
const ENVELOPE: &str = r#"{
    "pagination": { "limit": 3, "offset": 0, "count": 1, "total": 1 },
    "data": [{
        "flight_date": "2024-01-01",
        "flight_status": "scheduled",
        "arrival": { "airport": "JFK", "iata": "JFK" },
        "departure": { "airport": "LAX", "iata": "LAX" },
        "flight": { "number": "AA1" }
    }]
}"#;

#[test]
fn a_fetched_envelope_flows_into_the_diagram_model() {
    let flights = decode_flights(ENVELOPE).expect("envelope should parse");

    let mut state = AppState::new();
    state.is_loading = true;
    state.apply_fetch(Some(flights));

    assert!(!state.is_loading);

    let airports: Vec<(&str, &str, &str)> = state
        .airports
        .iter()
        .map(|a| (a.key.as_str(), a.text.as_str(), a.color.as_str()))
        .collect();
    assert_eq!(
        airports,
        vec![("JFK", "JFK", "lightgray"), ("LAX", "LAX", "lightgray")]
    );

    assert_eq!(state.links.len(), 1);
    let link = &state.links[0];
    assert_eq!(link.key, "AA1");
    assert_eq!(link.from, "JFK");
    assert_eq!(link.to, "LAX");
    assert_eq!(link.text, "plane");
}

#[test]
fn activating_a_flight_highlights_both_of_its_airports() {
    let flights = decode_flights(ENVELOPE).expect("envelope should parse");
    let mut state = AppState::new();
    state.apply_fetch(Some(flights));

    state.toggle_active_flight("AA1");

    assert!(state.airports.iter().all(|a| a.color == NodeColor::Red));

    state.toggle_active_flight("AA1");

    assert_eq!(state.active_flight, None);
    assert!(state
        .airports
        .iter()
        .all(|a| a.color == NodeColor::LightGray));
}

#[test]
fn a_failed_fetch_leaves_the_previous_display_alone() {
    let flights = decode_flights(ENVELOPE).expect("envelope should parse");
    let mut state = AppState::new();
    state.apply_fetch(Some(flights));
    let airports_before = state.airports.clone();

    state.is_loading = true;
    state.apply_fetch(None);

    assert!(!state.is_loading);
    assert_eq!(state.airports, airports_before);
    assert_eq!(state.flights.len(), 1);
}
