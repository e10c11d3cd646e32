use crate::state::{AppState, MAX_COUNT};

/// Bounded slider picking how many flights to request.
pub struct WidgetCountFilter<'a> {
    state: &'a mut AppState,
}

impl<'a> WidgetCountFilter<'a> {
    pub fn new(state: &'a mut AppState) -> Self {
        Self { state }
    }

    /// Returns true when the user moved the slider this frame, so the
    /// controller can re-arm its debounce window.
    pub fn show(self, ui: &mut egui::Ui) -> bool {
        ui.add(
            egui::Slider::new(&mut self.state.count_flight, 0..=MAX_COUNT)
                .integer()
                .text("flights"),
        )
        .changed()
    }
}
