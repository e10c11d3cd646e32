use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

/// Shows one clickable row per fetched flight. Clicking a row toggles the
/// active flight through the state machine; the active row renders selected.
pub struct WidgetFlightList<'a> {
    state: &'a mut AppState,
}

impl<'a> WidgetFlightList<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let state = self.state;
        let mut clicked: Option<String> = None;

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder())
            .sense(egui::Sense::click())
            .body(|mut body| {
                for (index, flight) in state.flights.iter().enumerate() {
                    body.row(22.0, |mut row| {
                        row.set_selected(
                            state
                                .active_flight
                                .as_ref()
                                .is_some_and(|n| *n == flight.flight.number),
                        );

                        row.col(|ui| {
                            ui.label(format!(
                                "{}. Flight from {} to {}, scheduled for {}",
                                index + 1,
                                flight.arrival.airport,
                                flight.departure.airport,
                                flight.flight_date
                            ));
                        });

                        if row.response().clicked() {
                            clicked = Some(flight.flight.number.clone());
                        }
                    });
                }
            });

        if let Some(number) = clicked {
            state.toggle_active_flight(&number);
        }
    }
}
