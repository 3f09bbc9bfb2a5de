use std::time::{Duration, Instant};

/// Total elapsed workout time, excluding every paused interval.
///
/// Two independent sources can pause the clock: the user, and preview mode.
/// The clock is paused while either is set, so leaving preview never undoes
/// a pause the user asked for.
#[derive(Debug, Clone)]
pub struct TotalClock {
    started_at: Instant,
    paused_total: Duration,
    paused_since: Option<Instant>,
    user_paused: bool,
    preview_paused: bool,
    shown: Duration,
}

impl TotalClock {
    pub fn new(now: Instant) -> Self {
        Self {
            started_at: now,
            paused_total: Duration::ZERO,
            paused_since: None,
            user_paused: false,
            preview_paused: false,
            shown: Duration::ZERO,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.user_paused || self.preview_paused
    }

    pub fn is_user_paused(&self) -> bool {
        self.user_paused
    }

    pub fn toggle(&mut self, now: Instant) {
        let paused = !self.user_paused;
        self.update_pause(now, |clock| clock.user_paused = paused);
    }

    pub fn set_preview_paused(&mut self, paused: bool, now: Instant) {
        self.update_pause(now, |clock| clock.preview_paused = paused);
    }

    /// Restarts from zero and clears the user pause.
    pub fn reset(&mut self, now: Instant) {
        self.started_at = now;
        self.paused_total = Duration::ZERO;
        self.user_paused = false;
        self.paused_since = self.preview_paused.then_some(now);
        self.shown = Duration::ZERO;
    }

    /// Refreshes the displayed value. Frozen while paused.
    pub fn tick(&mut self, now: Instant) {
        if !self.is_paused() {
            self.shown = self.elapsed(now);
        }
    }

    /// Active time up to `now`; while paused this is the value at the pause instant.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let end = self.paused_since.unwrap_or(now);
        end.saturating_duration_since(self.started_at)
            .saturating_sub(self.paused_total)
    }

    /// Last value computed by `tick`.
    pub fn shown(&self) -> Duration {
        self.shown
    }

    fn update_pause(&mut self, now: Instant, change: impl FnOnce(&mut Self)) {
        let was_paused = self.is_paused();
        change(self);

        match (was_paused, self.is_paused()) {
            (false, true) => self.paused_since = Some(now),
            (true, false) => {
                if let Some(since) = self.paused_since.take() {
                    self.paused_total += now.saturating_duration_since(since);
                }
            }
            _ => {}
        }
    }
}
