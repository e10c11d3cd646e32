use serde::Deserialize;

/// One endpoint of a flight (arrival or departure) as reported by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Leg {
    pub airport: String,
    pub iata: String,
}

/// The flight identification block of a record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlightNumber {
    pub number: String,
}

/// A scheduled flight as returned by the flights endpoint. Records are
/// immutable once fetched and identified by `flight.number`; uniqueness
/// within a batch is assumed but not guaranteed upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlightRecord {
    pub arrival: Leg,
    pub departure: Leg,
    pub flight: FlightNumber,
    pub flight_date: String,
}

impl FlightRecord {
    /// Convenience constructor, mainly for fixtures.
    pub fn new(
        number: &str,
        arrival_airport: &str,
        arrival_iata: &str,
        departure_airport: &str,
        departure_iata: &str,
        flight_date: &str,
    ) -> Self {
        Self {
            arrival: Leg {
                airport: arrival_airport.to_string(),
                iata: arrival_iata.to_string(),
            },
            departure: Leg {
                airport: departure_airport.to_string(),
                iata: departure_iata.to_string(),
            },
            flight: FlightNumber {
                number: number.to_string(),
            },
            flight_date: flight_date.to_string(),
        }
    }
}
