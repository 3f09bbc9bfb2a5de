use std::time::{Duration, Instant};

use crate::util::format_mmss;

pub const FINISHED_LABEL: &str = "Finished!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Idle,
    Running,
    Paused,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, or no whole second has passed since the last step
    Ignored,
    Counting(u32),
    /// Reached zero on this tick; the repeating tick is now cancelled
    Finished,
}

/// Turns irregular ticks into whole clock periods counted from an anchor.
///
/// Key events interrupt the runner's wait, so runtime ticks do not arrive on
/// a fixed cadence. The metronome counts how many full periods passed since
/// the last beat and keeps the remainder for the next call, so no second is
/// lost or doubled.
#[derive(Debug, Clone)]
pub struct Metronome {
    last_beat: Instant,
    period: Duration,
}

impl Metronome {
    pub fn new(now: Instant, period: Duration) -> Self {
        Self {
            last_beat: now,
            period,
        }
    }

    pub fn every_second(now: Instant) -> Self {
        Self::new(now, Duration::from_secs(1))
    }

    /// Instants of every beat due up to `now`, oldest first.
    pub fn due(&mut self, now: Instant) -> Vec<Instant> {
        let mut beats = Vec::new();
        if self.period.is_zero() {
            return beats;
        }
        while now.saturating_duration_since(self.last_beat) >= self.period {
            self.last_beat += self.period;
            beats.push(self.last_beat);
        }
        beats
    }
}

/// Whole-second countdown with its own repeating one-second tick.
///
/// The remaining value is what the display shows. Starting shows the full
/// length immediately and each second after the start (or after a resume)
/// shows one second less, so a countdown of `n` seconds produces `n + 1`
/// displayed values and finishes on the second that shows zero.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    state: CountdownState,
    beats: Option<Metronome>,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining: 0,
            state: CountdownState::Idle,
            beats: None,
        }
    }

    /// Returns false (and changes nothing) for a zero-length countdown.
    pub fn start(&mut self, secs: u32, now: Instant) -> bool {
        if secs == 0 {
            return false;
        }
        self.remaining = secs;
        self.state = CountdownState::Running;
        self.beats = Some(Metronome::every_second(now));
        true
    }

    /// Steps once for every whole second since the start, the last resume
    /// or the last step.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Ignored;
        }
        let Some(beats) = self.beats.as_mut() else {
            return TickOutcome::Ignored;
        };

        let due = beats.due(now).len();
        if due == 0 {
            return TickOutcome::Ignored;
        }
        for _ in 0..due {
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.state = CountdownState::Finished;
                self.beats = None;
                return TickOutcome::Finished;
            }
        }
        TickOutcome::Counting(self.remaining)
    }

    /// Cancels the repeating tick; a partial second is dropped.
    pub fn pause(&mut self) -> bool {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
            self.beats = None;
            true
        } else {
            false
        }
    }

    /// Continues from the last displayed value, a full second from `now`.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.state == CountdownState::Paused && self.remaining > 0 {
            self.state = CountdownState::Running;
            self.beats = Some(Metronome::every_second(now));
            true
        } else {
            false
        }
    }

    /// Cancels any countdown. Safe to call when idle.
    pub fn cancel(&mut self) {
        self.remaining = 0;
        self.state = CountdownState::Idle;
        self.beats = None;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }
}

/// Countdown for the exercise at the current playback position.
#[derive(Debug, Clone, Default)]
pub struct ExerciseTimer {
    countdown: Countdown,
    duration: u32,
}

impl ExerciseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts the countdown from `duration`. No-op for zero.
    pub fn start(&mut self, duration: u32, now: Instant) -> bool {
        if duration == 0 {
            return false;
        }
        self.countdown.cancel();
        self.duration = duration;
        self.countdown.start(duration, now)
    }

    /// Running pauses; Paused resumes from the tracked remaining seconds.
    /// Idle and Finished timers are left alone.
    pub fn toggle(&mut self, now: Instant) -> bool {
        match self.countdown.state() {
            CountdownState::Running => self.countdown.pause(),
            CountdownState::Paused => self.countdown.resume(now),
            CountdownState::Idle | CountdownState::Finished => false,
        }
    }

    pub fn reset(&mut self) {
        self.countdown.cancel();
        self.duration = 0;
    }

    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        self.countdown.tick(now)
    }

    pub fn state(&self) -> CountdownState {
        self.countdown.state()
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// Whether the play/pause control should be offered.
    pub fn shows_control(&self) -> bool {
        self.state() != CountdownState::Idle
    }

    pub fn display(&self) -> String {
        match self.state() {
            CountdownState::Finished => FINISHED_LABEL.to_string(),
            _ => format_mmss(u64::from(self.remaining())),
        }
    }

    /// Elapsed share of the started duration, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match self.state() {
            CountdownState::Idle => 0.0,
            CountdownState::Finished => 1.0,
            CountdownState::Running | CountdownState::Paused => {
                if self.duration == 0 {
                    0.0
                } else {
                    f64::from(self.duration - self.remaining().min(self.duration))
                        / f64::from(self.duration)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_metronome_counts_whole_periods() {
        let t0 = Instant::now();
        let mut m = Metronome::every_second(t0);

        assert!(m.due(t0 + ms(900)).is_empty());
        assert_eq!(m.due(t0 + ms(1_100)), vec![t0 + ms(1_000)]);
        assert!(m.due(t0 + ms(1_900)).is_empty());
    }

    #[test]
    fn test_metronome_catches_up_after_a_stall() {
        let t0 = Instant::now();
        let mut m = Metronome::every_second(t0);

        let beats = m.due(t0 + ms(3_500));
        assert_eq!(beats.len(), 3);
        assert_eq!(beats[2], t0 + ms(3_000));
        assert_eq!(m.due(t0 + ms(4_000)).len(), 1);
    }

    #[test]
    fn test_metronome_zero_period_never_beats() {
        let t0 = Instant::now();
        let mut m = Metronome::new(t0, Duration::ZERO);
        assert!(m.due(t0 + ms(5_000)).is_empty());
    }

    #[test]
    fn test_countdown_zero_is_noop() {
        let t0 = Instant::now();
        let mut c = Countdown::new();
        assert!(!c.start(0, t0));
        assert_eq!(c.state(), CountdownState::Idle);
        assert_eq!(c.tick(t0 + ms(5_000)), TickOutcome::Ignored);
    }

    #[test]
    fn test_exercise_timer_displays_every_second_then_finishes() {
        let t0 = Instant::now();
        let mut timer = ExerciseTimer::new();
        assert!(timer.start(5, t0));

        let mut shown = vec![timer.remaining()];
        let mut finishes = 0;
        for s in 1..=8 {
            match timer.tick(t0 + ms(s * 1_000)) {
                TickOutcome::Counting(r) => shown.push(r),
                TickOutcome::Finished => {
                    shown.push(timer.remaining());
                    finishes += 1;
                }
                TickOutcome::Ignored => {}
            }
        }

        assert_eq!(shown, vec![5, 4, 3, 2, 1, 0]);
        assert_eq!(finishes, 1);
        assert_eq!(timer.state(), CountdownState::Finished);
        assert_eq!(timer.display(), FINISHED_LABEL);
        assert_eq!(timer.progress(), 1.0);
    }

    #[test]
    fn test_first_second_is_counted_from_start() {
        // started late in a runtime second
        let t0 = Instant::now() + ms(950);
        let mut timer = ExerciseTimer::new();
        timer.start(10, t0);

        assert_eq!(timer.tick(t0 + ms(50)), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), 10);
        assert_eq!(timer.tick(t0 + ms(999)), TickOutcome::Ignored);
        assert_eq!(timer.tick(t0 + ms(1_000)), TickOutcome::Counting(9));

        assert_eq!(timer.tick(t0 + ms(9_050)), TickOutcome::Counting(1));
        assert_eq!(timer.state(), CountdownState::Running);
        assert_eq!(timer.tick(t0 + ms(10_000)), TickOutcome::Finished);
    }

    #[test]
    fn test_late_tick_steps_every_missed_second() {
        let t0 = Instant::now();
        let mut timer = ExerciseTimer::new();
        timer.start(10, t0);

        assert_eq!(timer.tick(t0 + ms(3_400)), TickOutcome::Counting(7));
        assert_eq!(timer.tick(t0 + ms(60_000)), TickOutcome::Finished);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_toggle_resumes_from_tracked_remaining() {
        let t0 = Instant::now();
        let mut timer = ExerciseTimer::new();
        timer.start(10, t0);
        timer.tick(t0 + ms(2_000));
        assert_eq!(timer.remaining(), 8);

        assert!(timer.toggle(t0 + ms(2_700)));
        assert_eq!(timer.state(), CountdownState::Paused);
        assert_eq!(timer.tick(t0 + ms(5_000)), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), 8);
        assert_eq!(timer.display(), "00:08");

        // resumed between beats: a full second passes before the next step
        let resumed = t0 + ms(5_950);
        assert!(timer.toggle(resumed));
        assert_eq!(timer.state(), CountdownState::Running);
        assert_eq!(timer.tick(resumed + ms(50)), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), 8);
        assert_eq!(timer.tick(resumed + ms(1_000)), TickOutcome::Counting(7));
        // progress stays relative to the original duration
        assert!((timer.progress() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_idle_and_finished_are_noops() {
        let t0 = Instant::now();
        let mut timer = ExerciseTimer::new();
        assert!(!timer.toggle(t0));
        assert_eq!(timer.state(), CountdownState::Idle);

        timer.start(1, t0);
        assert_eq!(timer.tick(t0 + ms(1_000)), TickOutcome::Finished);
        assert!(!timer.toggle(t0 + ms(1_500)));
        assert_eq!(timer.state(), CountdownState::Finished);
    }

    #[test]
    fn test_restart_cancels_previous_countdown() {
        let t0 = Instant::now();
        let mut timer = ExerciseTimer::new();
        timer.start(30, t0);
        timer.tick(t0 + ms(1_000));
        timer.start(5, t0 + ms(1_500));
        assert_eq!(timer.remaining(), 5);
        assert_eq!(timer.duration(), 5);
        assert_eq!(timer.progress(), 0.0);
        assert_eq!(timer.tick(t0 + ms(2_000)), TickOutcome::Ignored);
        assert_eq!(timer.tick(t0 + ms(2_500)), TickOutcome::Counting(4));
    }

    #[test]
    fn test_reset_clears_everything() {
        let t0 = Instant::now();
        let mut timer = ExerciseTimer::new();
        timer.start(30, t0);
        timer.tick(t0 + ms(1_000));
        timer.reset();
        timer.reset();

        assert_eq!(timer.state(), CountdownState::Idle);
        assert_eq!(timer.display(), "00:00");
        assert_eq!(timer.progress(), 0.0);
        assert!(!timer.shows_control());
        assert_eq!(timer.tick(t0 + ms(5_000)), TickOutcome::Ignored);
    }
}
