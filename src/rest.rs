use std::time::Instant;

use crate::timer::{Countdown, CountdownState, TickOutcome};
use crate::util::format_mmss;

/// What happens once a rest period is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestContinuation {
    /// Move to the first exercise of the next tour
    AdvanceTour,
}

/// Rest countdown with a title and a single pending continuation.
///
/// The continuation slot is consumed exactly once, whichever of natural
/// completion or skipping gets there first.
#[derive(Debug, Clone, Default)]
pub struct RestPeriod {
    countdown: Countdown,
    title: String,
    continuation: Option<RestContinuation>,
}

impl RestPeriod {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the rest overlay and starts counting down from `secs` at `now`.
    ///
    /// A zero-length rest ends immediately and hands back its continuation.
    pub fn show(
        &mut self,
        secs: u32,
        title: impl Into<String>,
        continuation: RestContinuation,
        now: Instant,
    ) -> Option<RestContinuation> {
        self.title = title.into();
        self.continuation = Some(continuation);
        if self.countdown.start(secs, now) {
            None
        } else {
            self.countdown.cancel();
            self.continuation.take()
        }
    }

    /// Advances by the whole seconds since the rest started or resumed.
    /// Returns the continuation when the rest runs out.
    pub fn tick(&mut self, now: Instant) -> Option<RestContinuation> {
        match self.countdown.tick(now) {
            TickOutcome::Finished => {
                self.countdown.cancel();
                self.continuation.take()
            }
            TickOutcome::Counting(_) | TickOutcome::Ignored => None,
        }
    }

    /// Pauses a ticking rest or resumes a paused one from the displayed value.
    pub fn pause_resume(&mut self, now: Instant) -> Option<bool> {
        match self.countdown.state() {
            CountdownState::Running => {
                self.countdown.pause();
                Some(true)
            }
            CountdownState::Paused => {
                self.countdown.resume(now);
                Some(false)
            }
            CountdownState::Idle | CountdownState::Finished => None,
        }
    }

    /// Ends the rest early. Returns the continuation if one is still pending.
    pub fn skip(&mut self) -> Option<RestContinuation> {
        self.countdown.cancel();
        self.continuation.take()
    }

    pub fn is_visible(&self) -> bool {
        matches!(
            self.countdown.state(),
            CountdownState::Running | CountdownState::Paused
        )
    }

    pub fn is_paused(&self) -> bool {
        self.countdown.state() == CountdownState::Paused
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn display(&self) -> String {
        format_mmss(u64::from(self.remaining()))
    }
}
