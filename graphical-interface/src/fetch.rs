use std::io;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use api_client::{ApiError, FlightApiClient, FlightRecord};

/// Quiet period the count filter must observe before a request fires.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Trailing-edge debounce: every trigger re-arms the deadline, and the
/// action runs once after a full quiet window. Triggers inside the window
/// are dropped, not queued.
#[derive(Debug)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Re-arms the window from `now`.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True once the quiet window has elapsed; disarms until the next trigger.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Monotonically increasing fetch sequence. A response is applied only while
/// its number is still the latest issued one; anything older is stale and
/// must be discarded instead of overwriting a newer request's result.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self { latest: 0 }
    }

    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

/// Outcome of one fetch, tagged with the sequence number of its request.
#[derive(Debug)]
pub struct FetchOutcome {
    pub seq: u64,
    pub result: Result<Vec<FlightRecord>, ApiError>,
}

/// Runs one request on its own worker thread, reporting back over `tx`.
/// The UI thread never blocks on the network.
pub fn spawn_fetch(
    client: FlightApiClient,
    limit: u32,
    seq: u64,
    tx: Sender<FetchOutcome>,
) -> io::Result<()> {
    thread::Builder::new()
        .name(format!("fetch-{seq}"))
        .spawn(move || {
            let result = client.get_flights(limit);
            // The receiver is gone when the window closed mid-flight.
            let _ = tx.send(FetchOutcome { seq, result });
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debounce_waits_for_a_full_quiet_window() {
        let mut debounce = Debounce::new(Duration::from_millis(200));
        let t0 = Instant::now();

        debounce.trigger(t0);
        assert!(debounce.is_armed());
        assert!(!debounce.fire(t0 + Duration::from_millis(100)));
        assert!(debounce.fire(t0 + Duration::from_millis(200)));
        assert!(!debounce.is_armed());
    }

    #[test]
    fn retrigger_inside_the_window_pushes_the_deadline() {
        let mut debounce = Debounce::new(Duration::from_millis(200));
        let t0 = Instant::now();

        debounce.trigger(t0);
        debounce.trigger(t0 + Duration::from_millis(150));

        assert!(!debounce.fire(t0 + Duration::from_millis(250)));
        assert!(debounce.fire(t0 + Duration::from_millis(350)));
    }

    #[test]
    fn fire_is_a_one_shot_until_the_next_trigger() {
        let mut debounce = Debounce::new(Duration::from_millis(200));
        let t0 = Instant::now();

        debounce.trigger(t0);
        let later = t0 + Duration::from_millis(300);
        assert!(debounce.fire(later));
        assert!(!debounce.fire(later));
    }

    #[test]
    fn only_the_latest_request_is_current() {
        let mut tracker = RequestTracker::new();

        let first = tracker.issue();
        let second = tracker.issue();

        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
        assert_eq!(second, first + 1);
    }
}
