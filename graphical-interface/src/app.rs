use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use api_client::FlightApiClient;
use chrono::{DateTime, Utc};
use logger::Logger;

use crate::diagram::DiagramView;
use crate::fetch::{spawn_fetch, Debounce, FetchOutcome, RequestTracker, DEBOUNCE_WINDOW};
use crate::state::AppState;
use crate::widgets::{WidgetCountFilter, WidgetFlightList};

const ACTIVE_REPAINT_MS: u64 = 30;
const IDLE_REPAINT_MS: u64 = 120;

/// The main application: owns the state machine, the fetch plumbing, and the
/// diagram, and lays out the three panels plus the status line.
pub struct FlightRoutesApp {
    state: AppState,
    diagram: DiagramView,
    client: FlightApiClient,
    logger: Logger,
    debounce: Debounce,
    requests: RequestTracker,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    last_update: Option<DateTime<Utc>>,
}

impl FlightRoutesApp {
    pub fn new(client: FlightApiClient, logger: Logger) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut debounce = Debounce::new(DEBOUNCE_WINDOW);
        // The mount-time fetch goes through the same debounce as a slider move.
        debounce.trigger(Instant::now());

        Self {
            state: AppState::new(),
            diagram: DiagramView::new(),
            client,
            logger,
            debounce,
            requests: RequestTracker::new(),
            tx,
            rx,
            last_update: None,
        }
    }

    /// Applies settled fetches. Responses that are no longer the latest
    /// issued request are discarded instead of overwriting newer state.
    fn drain_fetches(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            if !self.requests.is_current(outcome.seq) {
                let _ = self.logger.warn(
                    &format!("discarding stale response for request #{}", outcome.seq),
                    true,
                );
                continue;
            }
            match outcome.result {
                Ok(flights) => {
                    self.state.apply_fetch(Some(flights));
                    self.last_update = Some(Utc::now());
                }
                Err(e) => {
                    let _ = self
                        .logger
                        .error(&format!("flight request #{} failed: {}", outcome.seq, e), true);
                    self.state.apply_fetch(None);
                }
            }
        }
    }

    fn fire_pending_fetch(&mut self) {
        if !self.debounce.fire(Instant::now()) {
            return;
        }

        let seq = self.requests.issue();
        self.state.is_loading = true;
        if let Err(e) = spawn_fetch(
            self.client.clone(),
            self.state.count_flight,
            seq,
            self.tx.clone(),
        ) {
            let _ = self
                .logger
                .error(&format!("could not start fetch worker: {e}"), true);
            self.state.apply_fetch(None);
        }
    }
}

impl eframe::App for FlightRoutesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_fetches();
        self.fire_pending_fetch();

        egui::TopBottomPanel::bottom("filters").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if WidgetCountFilter::new(&mut self.state).show(ui) {
                    self.debounce.trigger(Instant::now());
                }
                ui.separator();
                if self.state.is_loading {
                    ui.spinner();
                    ui.label("Loading...");
                } else if let Some(at) = self.last_update {
                    ui.label(format!("updated {}", at.format("%H:%M:%S UTC")));
                }
            });
        });

        egui::SidePanel::right("flight_list")
            .default_width(340.0)
            .show(ctx, |ui| {
                ui.heading("Flights");
                WidgetFlightList::new(&mut self.state).show(ui);
            });

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };
        egui::CentralPanel::default().frame(rimless).show(ctx, |ui| {
            self.diagram.show(ui, &self.state.airports, &self.state.links);
        });

        // Keeps the debounce window, in-flight fetches and the layout
        // animation ticking without user input.
        let interval = if self.debounce.is_armed() || self.state.is_loading {
            Duration::from_millis(ACTIVE_REPAINT_MS)
        } else {
            Duration::from_millis(IDLE_REPAINT_MS)
        };
        ctx.request_repaint_after(interval);
    }
}
