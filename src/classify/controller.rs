//! Throttle, single-flight, and backoff control for classification calls.
//!
//! The classification trigger fires on a fixed period, but actual network
//! calls are gated here: at most one in flight, a minimum spacing between
//! attempts, and a silence window after the service rate-limits us. Rejected
//! ticks are no-ops with no network call and no user-visible error.

use std::time::{Duration, Instant};

use log::debug;

/// Baseline period for the external classification trigger.
pub const BASELINE_TICK: Duration = Duration::from_secs(2);

/// Spacing profile for classification attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrottleMode {
    /// Continuous scanning; calls may come as close as 1s apart.
    #[default]
    Realtime,
    /// User-initiated capture; calls at least 3s apart.
    Manual,
}

impl ThrottleMode {
    pub fn min_interval(self) -> Duration {
        match self {
            Self::Realtime => Duration::from_secs(1),
            Self::Manual => Duration::from_secs(3),
        }
    }
}

/// Configuration for the classification gate.
#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    /// Minimum spacing between attempted calls.
    pub min_interval: Duration,
    /// Silence window applied after a rate-limit response that carries no
    /// explicit retry delay.
    pub default_backoff: Duration,
    /// How long a "no objects" result lingers before the semantic label is
    /// cleared.
    pub empty_clear_delay: Duration,
}

impl ClassifyConfig {
    pub fn for_mode(mode: ThrottleMode) -> Self {
        Self {
            min_interval: mode.min_interval(),
            ..Self::default()
        }
    }
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            min_interval: ThrottleMode::Realtime.min_interval(),
            default_backoff: Duration::from_secs(30),
            empty_clear_delay: Duration::from_secs(1),
        }
    }
}

/// Handle for one admitted classification attempt.
///
/// Completions carry the ticket back; a ticket that no longer matches the
/// gate's in-flight record (superseded or cancelled) is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyTicket(u64);

/// Admission control for classification attempts.
pub struct ClassifyGate {
    config: ClassifyConfig,
    last_attempt: Option<Instant>,
    backoff_until: Option<Instant>,
    in_flight: Option<ClassifyTicket>,
    next_serial: u64,
}

impl ClassifyGate {
    pub fn new(config: ClassifyConfig) -> Self {
        Self {
            config,
            last_attempt: None,
            backoff_until: None,
            in_flight: None,
            next_serial: 0,
        }
    }

    /// Ask to start a classification attempt.
    ///
    /// Returns a ticket when admitted. Returns `None` while another call is
    /// in flight, while backoff is active, or when less than the minimum
    /// interval has passed since the last admitted attempt.
    pub fn try_begin(&mut self, now: Instant) -> Option<ClassifyTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        if let Some(until) = self.backoff_until {
            if now < until {
                return None;
            }
        }
        if let Some(last) = self.last_attempt {
            if now.saturating_duration_since(last) < self.config.min_interval {
                return None;
            }
        }
        let ticket = ClassifyTicket(self.next_serial);
        self.next_serial += 1;
        self.last_attempt = Some(now);
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    /// Record that the attempt behind `ticket` finished.
    ///
    /// Returns false when the ticket is stale (the camera was stopped while
    /// the call was in flight); the result must then be discarded.
    pub fn complete(&mut self, ticket: ClassifyTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Enter the rate-limit silence window.
    ///
    /// Uses the server-suggested delay when present, the configured default
    /// otherwise. Degrades silently: the tracker keeps showing the last
    /// known label while calls are suppressed.
    pub fn backoff(&mut self, now: Instant, retry_after: Option<Duration>) {
        let delay = retry_after.unwrap_or(self.config.default_backoff);
        debug!("classification rate limited; silenced for {delay:?}");
        self.backoff_until = Some(now + delay);
    }

    /// Forget the in-flight attempt, as when the camera stops.
    ///
    /// Backoff state survives: a restart must not resume hammering a
    /// rate-limited service.
    pub fn cancel_all(&mut self) {
        self.in_flight = None;
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn backoff_until(&self) -> Option<Instant> {
        self.backoff_until
    }

    pub fn config(&self) -> &ClassifyConfig {
        &self.config
    }
}

impl Default for ClassifyGate {
    fn default() -> Self {
        Self::new(ClassifyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> ClassifyGate {
        ClassifyGate::default()
    }

    #[test]
    fn test_throttle_spacing() {
        let mut gate = gate();
        let t0 = Instant::now();
        let ticket = gate.try_begin(t0).unwrap();
        assert!(gate.complete(ticket));
        // Too soon after the last attempt.
        assert!(gate.try_begin(t0 + Duration::from_millis(500)).is_none());
        assert!(gate.try_begin(t0 + Duration::from_millis(1100)).is_some());
    }

    #[test]
    fn test_single_flight() {
        let mut gate = gate();
        let t0 = Instant::now();
        let ticket = gate.try_begin(t0).unwrap();
        // However many ticks fire during a slow request, none are admitted.
        for i in 1..100 {
            assert!(gate.try_begin(t0 + Duration::from_secs(i)).is_none());
        }
        assert!(gate.complete(ticket));
        assert!(gate.try_begin(t0 + Duration::from_secs(100)).is_some());
    }

    #[test]
    fn test_backoff_with_server_delay() {
        let mut gate = gate();
        let t0 = Instant::now();
        let ticket = gate.try_begin(t0).unwrap();
        assert!(gate.complete(ticket));
        gate.backoff(t0, Some(Duration::from_secs(10)));

        assert!(gate.try_begin(t0 + Duration::from_secs(5)).is_none());
        assert!(gate.try_begin(t0 + Duration::from_millis(9_900)).is_none());
        assert!(gate.try_begin(t0 + Duration::from_millis(10_100)).is_some());
    }

    #[test]
    fn test_backoff_default_delay() {
        let mut gate = gate();
        let t0 = Instant::now();
        gate.backoff(t0, None);
        assert!(gate.try_begin(t0 + Duration::from_secs(29)).is_none());
        assert!(gate.try_begin(t0 + Duration::from_secs(31)).is_some());
    }

    #[test]
    fn test_stale_ticket_after_cancel() {
        let mut gate = gate();
        let t0 = Instant::now();
        let ticket = gate.try_begin(t0).unwrap();
        gate.cancel_all();
        assert!(!gate.complete(ticket));

        // A fresh attempt gets a new ticket; the old one stays dead.
        let fresh = gate.try_begin(t0 + Duration::from_secs(2)).unwrap();
        assert!(!gate.complete(ticket));
        assert!(gate.complete(fresh));
    }

    #[test]
    fn test_manual_mode_widens_spacing() {
        let mut gate = ClassifyGate::new(ClassifyConfig::for_mode(ThrottleMode::Manual));
        let t0 = Instant::now();
        let ticket = gate.try_begin(t0).unwrap();
        assert!(gate.complete(ticket));
        assert!(gate.try_begin(t0 + Duration::from_secs(2)).is_none());
        assert!(gate.try_begin(t0 + Duration::from_secs(4)).is_some());
    }
}
