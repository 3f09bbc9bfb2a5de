//! Session playback state machine.
//!
//! [`Player`] owns the playback position, tour count, completion keys and
//! the three clocks (exercise countdown, rest countdown, total time). Every
//! user command and every one-second tick goes through it, and each call
//! runs to completion before the next one, so a snapshot taken after any
//! call is consistent with that transition.

use itertools::iproduct;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, info};

use crate::rest::{RestContinuation, RestPeriod};
use crate::session::{Exercise, Session, SessionError};
use crate::timer::{ExerciseTimer, TickOutcome};
use crate::total_clock::TotalClock;
use crate::util::{clamp_step, fraction, percent};

pub const DEFAULT_REST_SECS: u32 = 60;

/// One checkbox of progress: exercise `index` during tour `tour` (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompletionKey {
    pub tour: u32,
    pub index: usize,
}

impl CompletionKey {
    pub fn new(tour: u32, index: usize) -> Self {
        Self { tour, index }
    }
}

/// Discrete user commands accepted by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Command {
    NavigatePrev,
    NavigateNext,
    TogglePreview,
    ToggleTotalTimer,
    ResetTotalTimer,
    ResetExerciseTimer,
    ToggleExerciseTimer,
    StartExerciseTimer,
    CompleteExercise,
    SkipRest,
    PauseResumeRest,
}

/// What a command or tick did to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Edge condition; nothing changed
    Ignored,
    Moved { index: usize },
    PreviewEntered { index: usize },
    PreviewLeft,
    TotalClockPaused,
    TotalClockResumed,
    TotalClockReset,
    ExerciseTimerStarted { secs: u32 },
    ExerciseTimerPaused { remaining: u32 },
    ExerciseTimerResumed { remaining: u32 },
    ExerciseTimerReset,
    ExerciseTimerFinished,
    ExerciseCompleted { key: CompletionKey, next_index: usize },
    RestStarted { title: String, secs: u32 },
    RestPaused { remaining: u32 },
    RestResumed { remaining: u32 },
    TourStarted { tour: u32 },
    WorkoutCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Resting,
    /// Terminal: every completion key is set
    Completed,
}

#[derive(Debug, Clone)]
pub struct Player {
    session: Session,
    rest_secs: u32,
    current_index: usize,
    current_tour: u32,
    completed: BTreeSet<CompletionKey>,
    preview_index: Option<usize>,
    exercise_timer: ExerciseTimer,
    rest: RestPeriod,
    total: TotalClock,
    workout_completed: bool,
}

impl Player {
    /// Seeds playback at the first exercise of tour 1 and starts the total clock.
    ///
    /// Fails for a session without tours or without exercises.
    pub fn new(session: Session, now: Instant) -> Result<Self, SessionError> {
        session.validate()?;
        Ok(Self {
            session,
            rest_secs: DEFAULT_REST_SECS,
            current_index: 0,
            current_tour: 1,
            completed: BTreeSet::new(),
            preview_index: None,
            exercise_timer: ExerciseTimer::new(),
            rest: RestPeriod::new(),
            total: TotalClock::new(now),
            workout_completed: false,
        })
    }

    pub fn with_rest_secs(mut self, secs: u32) -> Self {
        self.rest_secs = secs;
        self
    }

    /// Dispatches a user command.
    ///
    /// The rest overlay blocks everything except rest and total-clock commands.
    pub fn apply(&mut self, command: Command, now: Instant) -> Transition {
        let blocked = self.rest.is_visible()
            && matches!(
                command,
                Command::NavigatePrev
                    | Command::NavigateNext
                    | Command::TogglePreview
                    | Command::CompleteExercise
                    | Command::StartExerciseTimer
                    | Command::ToggleExerciseTimer
                    | Command::ResetExerciseTimer
            );

        let transition = if blocked {
            Transition::Ignored
        } else {
            match command {
                Command::NavigatePrev => self.navigate(-1),
                Command::NavigateNext => self.navigate(1),
                Command::TogglePreview => self.toggle_preview(now),
                Command::ToggleTotalTimer => self.toggle_total_time(now),
                Command::ResetTotalTimer => self.reset_total_time(now),
                Command::ResetExerciseTimer => self.reset_exercise_timer(),
                Command::ToggleExerciseTimer => self.toggle_exercise_timer(now),
                Command::StartExerciseTimer => self.start_exercise_timer(now),
                Command::CompleteExercise => self.complete_current_exercise(now),
                Command::SkipRest => self.skip_rest(),
                Command::PauseResumeRest => self.pause_resume_rest(now),
            }
        };

        debug!(%command, ?transition, "command applied");
        transition
    }

    /// Moves the preview cursor in preview mode, the playback position otherwise.
    pub fn navigate(&mut self, step: isize) -> Transition {
        let len = self.session.exercise_count();
        let cursor = match self.preview_index.as_mut() {
            Some(preview) => preview,
            None => &mut self.current_index,
        };

        let next = clamp_step(*cursor, step, len);
        if next == *cursor {
            return Transition::Ignored;
        }
        *cursor = next;
        self.exercise_timer.reset();
        Transition::Moved { index: next }
    }

    pub fn toggle_preview(&mut self, now: Instant) -> Transition {
        self.exercise_timer.reset();
        match self.preview_index.take() {
            Some(_) => {
                self.total.set_preview_paused(false, now);
                Transition::PreviewLeft
            }
            None => {
                self.preview_index = Some(self.current_index);
                self.total.set_preview_paused(true, now);
                Transition::PreviewEntered {
                    index: self.current_index,
                }
            }
        }
    }

    /// Marks the current exercise done and moves on: next exercise, rest
    /// between tours, or workout completion.
    pub fn complete_current_exercise(&mut self, now: Instant) -> Transition {
        if self.workout_completed || self.is_previewing() {
            return Transition::Ignored;
        }

        let key = CompletionKey::new(self.current_tour, self.current_index);
        self.completed.insert(key);

        if self.current_index + 1 < self.session.exercise_count() {
            self.current_index += 1;
            self.exercise_timer.reset();
            return Transition::ExerciseCompleted {
                key,
                next_index: self.current_index,
            };
        }

        if self.current_tour < self.session.tours {
            self.exercise_timer.reset();
            let title = format!("End of tour {}", self.current_tour);
            match self.rest.show(
                self.rest_secs,
                title.clone(),
                RestContinuation::AdvanceTour,
                now,
            ) {
                Some(continuation) => self.run_continuation(continuation),
                None => Transition::RestStarted {
                    title,
                    secs: self.rest_secs,
                },
            }
        } else {
            self.workout_complete()
        }
    }

    /// Normalizes the completion set to every key and enters the terminal phase.
    pub fn workout_complete(&mut self) -> Transition {
        self.completed.clear();
        self.completed.extend(
            iproduct!(1..=self.session.tours, 0..self.session.exercise_count())
                .map(|(tour, index)| CompletionKey::new(tour, index)),
        );
        self.workout_completed = true;
        info!(
            title = %self.session.title,
            elapsed_secs = self.total.shown().as_secs(),
            "workout completed"
        );
        Transition::WorkoutCompleted
    }

    pub fn start_exercise_timer(&mut self, now: Instant) -> Transition {
        if self.is_previewing() {
            return Transition::Ignored;
        }
        match self.current_exercise().timed_duration() {
            Some(secs) if self.exercise_timer.start(secs, now) => {
                Transition::ExerciseTimerStarted { secs }
            }
            _ => Transition::Ignored,
        }
    }

    pub fn toggle_exercise_timer(&mut self, now: Instant) -> Transition {
        if self.is_previewing() || !self.exercise_timer.toggle(now) {
            return Transition::Ignored;
        }
        let remaining = self.exercise_timer.remaining();
        if self.exercise_timer.is_running() {
            Transition::ExerciseTimerResumed { remaining }
        } else {
            Transition::ExerciseTimerPaused { remaining }
        }
    }

    pub fn reset_exercise_timer(&mut self) -> Transition {
        self.exercise_timer.reset();
        Transition::ExerciseTimerReset
    }

    pub fn skip_rest(&mut self) -> Transition {
        match self.rest.skip() {
            Some(continuation) => self.run_continuation(continuation),
            None => Transition::Ignored,
        }
    }

    pub fn pause_resume_rest(&mut self, now: Instant) -> Transition {
        let remaining = self.rest.remaining();
        match self.rest.pause_resume(now) {
            Some(true) => Transition::RestPaused { remaining },
            Some(false) => Transition::RestResumed { remaining },
            None => Transition::Ignored,
        }
    }

    pub fn toggle_total_time(&mut self, now: Instant) -> Transition {
        self.total.toggle(now);
        if self.total.is_user_paused() {
            Transition::TotalClockPaused
        } else {
            Transition::TotalClockResumed
        }
    }

    pub fn reset_total_time(&mut self, now: Instant) -> Transition {
        self.total.reset(now);
        Transition::TotalClockReset
    }

    /// Clock tick for all three clocks. Each countdown steps by the whole
    /// seconds since its own start or resume, so ticks may arrive at any rate.
    pub fn tick(&mut self, now: Instant) -> Vec<Transition> {
        let mut transitions = Vec::new();
        self.total.tick(now);

        if let Some(continuation) = self.rest.tick(now) {
            transitions.push(self.run_continuation(continuation));
        }
        if self.exercise_timer.tick(now) == TickOutcome::Finished {
            debug!(index = self.current_index, "exercise countdown finished");
            transitions.push(Transition::ExerciseTimerFinished);
        }

        transitions
    }

    fn run_continuation(&mut self, continuation: RestContinuation) -> Transition {
        match continuation {
            RestContinuation::AdvanceTour => {
                self.current_tour = (self.current_tour + 1).min(self.session.tours);
                self.current_index = 0;
                self.exercise_timer.reset();
                info!(tour = self.current_tour, "tour started");
                Transition::TourStarted {
                    tour: self.current_tour,
                }
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn rest_secs(&self) -> u32 {
        self.rest_secs
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_tour(&self) -> u32 {
        self.current_tour
    }

    pub fn current_exercise(&self) -> &Exercise {
        &self.session.exercises[self.current_index]
    }

    pub fn is_previewing(&self) -> bool {
        self.preview_index.is_some()
    }

    /// Preview cursor, only present in preview mode.
    pub fn preview_index(&self) -> Option<usize> {
        self.preview_index
    }

    /// Index of the exercise on screen: the preview cursor in preview mode.
    pub fn displayed_index(&self) -> usize {
        self.preview_index.unwrap_or(self.current_index)
    }

    pub fn displayed_exercise(&self) -> &Exercise {
        &self.session.exercises[self.displayed_index()]
    }

    pub fn completed(&self) -> &BTreeSet<CompletionKey> {
        &self.completed
    }

    pub fn is_completed(&self, key: CompletionKey) -> bool {
        self.completed.contains(&key)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn progress_percent(&self) -> u8 {
        percent(self.completed.len(), self.session.total_steps())
    }

    pub fn progress_fraction(&self) -> f64 {
        fraction(self.completed.len(), self.session.total_steps())
    }

    pub fn exercise_timer(&self) -> &ExerciseTimer {
        &self.exercise_timer
    }

    pub fn rest(&self) -> &RestPeriod {
        &self.rest
    }

    pub fn total_clock(&self) -> &TotalClock {
        &self.total
    }

    pub fn is_resting(&self) -> bool {
        self.rest.is_visible()
    }

    pub fn is_workout_completed(&self) -> bool {
        self.workout_completed
    }

    pub fn phase(&self) -> Phase {
        if self.workout_completed {
            Phase::Completed
        } else if self.rest.is_visible() {
            Phase::Resting
        } else {
            Phase::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ExerciseId;
    use crate::timer::CountdownState;
    use assert_matches::assert_matches;
    use std::time::Duration;

    fn exercise(id: u64, duration: Option<u32>) -> Exercise {
        Exercise {
            id: ExerciseId::Number(id),
            name: format!("Exercise {id}"),
            specs: String::new(),
            icon: String::new(),
            duration,
            video: String::new(),
        }
    }

    fn session(tours: u32, durations: &[Option<u32>]) -> Session {
        Session {
            title: "Test".into(),
            author: String::new(),
            body_areas: String::new(),
            estimated_time: String::new(),
            tours,
            exercises: durations
                .iter()
                .enumerate()
                .map(|(i, d)| exercise(i as u64 + 1, *d))
                .collect(),
        }
    }

    fn player(tours: u32, durations: &[Option<u32>]) -> (Player, Instant) {
        let now = Instant::now();
        (Player::new(session(tours, durations), now).unwrap(), now)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_rejects_unplayable_sessions() {
        let now = Instant::now();
        assert_eq!(
            Player::new(session(0, &[None]), now).unwrap_err(),
            SessionError::NoTours
        );
        assert_eq!(
            Player::new(session(2, &[]), now).unwrap_err(),
            SessionError::NoExercises
        );
    }

    #[test]
    fn test_new_player_starts_at_beginning() {
        let (p, _) = player(3, &[None, None]);

        assert_eq!(p.current_index(), 0);
        assert_eq!(p.current_tour(), 1);
        assert_eq!(p.completed_count(), 0);
        assert!(!p.is_previewing());
        assert_eq!(p.phase(), Phase::Playing);
        assert_eq!(p.rest_secs(), DEFAULT_REST_SECS);
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let (mut p, now) = player(1, &[None, None, None]);

        assert_eq!(p.apply(Command::NavigatePrev, now), Transition::Ignored);
        assert_eq!(p.current_index(), 0);

        for _ in 0..5 {
            p.apply(Command::NavigateNext, now);
        }
        assert_eq!(p.current_index(), 2);
        assert_eq!(p.navigate(1), Transition::Ignored);
    }

    #[test]
    fn test_navigation_indices_stay_in_range_for_any_sequence() {
        for n in 1..6usize {
            let durations = vec![None; n];
            let (mut p, now) = player(1, &durations);
            let steps: [isize; 12] = [1, 1, -1, 1, 1, 1, 1, 1, -1, -1, -1, -1];

            for (i, step) in steps.iter().enumerate() {
                if i == 6 {
                    p.toggle_preview(now);
                }
                p.navigate(*step);
                assert!(p.current_index() < n);
                assert!(p.displayed_index() < n);
            }
        }
    }

    #[test]
    fn test_preview_navigation_leaves_playback_alone() {
        let (mut p, now) = player(1, &[None, None, None]);
        p.apply(Command::NavigateNext, now);

        assert_eq!(
            p.apply(Command::TogglePreview, now),
            Transition::PreviewEntered { index: 1 }
        );
        p.apply(Command::NavigateNext, now);
        assert_eq!(p.preview_index(), Some(2));
        assert_eq!(p.current_index(), 1);
        assert_eq!(p.displayed_exercise().name, "Exercise 3");

        assert_eq!(p.apply(Command::CompleteExercise, now), Transition::Ignored);
        assert_eq!(p.completed_count(), 0);

        assert_eq!(p.apply(Command::TogglePreview, now), Transition::PreviewLeft);
        assert_eq!(p.preview_index(), None);
        assert_eq!(p.displayed_index(), 1);
    }

    #[test]
    fn test_completion_is_idempotent() {
        let (mut p, now) = player(1, &[None, None]);
        p.apply(Command::CompleteExercise, now);
        p.apply(Command::NavigatePrev, now);

        assert_matches!(
            p.apply(Command::CompleteExercise, now),
            Transition::ExerciseCompleted { key, next_index: 1 } if key == CompletionKey::new(1, 0)
        );
        assert_eq!(p.completed_count(), 1);
        assert_eq!(p.progress_percent(), 50);
    }

    #[test]
    fn test_last_exercise_of_tour_starts_rest() {
        let (mut p, now) = player(2, &[None]);

        assert_matches!(
            p.apply(Command::CompleteExercise, now),
            Transition::RestStarted { ref title, secs: 60 } if title == "End of tour 1"
        );
        assert_eq!(p.phase(), Phase::Resting);
        assert_eq!(p.current_tour(), 1);
    }

    #[test]
    fn test_rest_blocks_playback_commands() {
        let (mut p, now) = player(2, &[None, Some(10)]);
        p.complete_current_exercise(now);
        p.complete_current_exercise(now);
        assert!(p.is_resting());

        for command in [
            Command::NavigatePrev,
            Command::NavigateNext,
            Command::TogglePreview,
            Command::CompleteExercise,
            Command::StartExerciseTimer,
            Command::ToggleExerciseTimer,
            Command::ResetExerciseTimer,
        ] {
            assert_eq!(p.apply(command, now), Transition::Ignored, "{command}");
        }
        assert_eq!(p.completed_count(), 2);
        assert_eq!(p.apply(Command::ToggleTotalTimer, now), Transition::TotalClockPaused);
    }

    #[test]
    fn test_rest_suspends_exercise_timer() {
        let (mut p, now) = player(2, &[Some(10)]);
        p.apply(Command::StartExerciseTimer, now);
        assert!(p.exercise_timer().is_running());

        p.apply(Command::CompleteExercise, now);
        assert!(p.is_resting());
        assert!(!p.exercise_timer().is_running());
    }

    #[test]
    fn test_rest_runs_out_and_advances_tour() {
        let (mut p, now) = player(2, &[None, None]);
        let mut p_short = p.clone().with_rest_secs(2);
        p_short.complete_current_exercise(now);
        p_short.complete_current_exercise(now);

        assert!(p_short.tick(now + Duration::from_secs(1)).is_empty());
        assert_eq!(
            p_short.tick(now + Duration::from_secs(2)),
            vec![Transition::TourStarted { tour: 2 }]
        );
        assert_eq!(p_short.current_tour(), 2);
        assert_eq!(p_short.current_index(), 0);
        assert!(!p_short.is_resting());

        // skipping after natural completion does not fire again
        assert_eq!(p_short.skip_rest(), Transition::Ignored);
        assert_eq!(p_short.current_tour(), 2);

        p.complete_current_exercise(now);
        p.complete_current_exercise(now);
        assert_eq!(p.skip_rest(), Transition::TourStarted { tour: 2 });
        assert_eq!(p.skip_rest(), Transition::Ignored);
        assert_eq!(p.current_tour(), 2);
    }

    #[test]
    fn test_zero_rest_advances_immediately() {
        let (p, now) = player(2, &[None]);
        let mut p = p.with_rest_secs(0);

        assert_eq!(
            p.complete_current_exercise(now),
            Transition::TourStarted { tour: 2 }
        );
        assert!(!p.is_resting());
    }

    #[test]
    fn test_pause_resume_rest() {
        let (mut p, now) = player(2, &[None]);
        p.complete_current_exercise(now);
        for s in 1..=40 {
            p.tick(now + Duration::from_secs(s));
        }
        assert_eq!(p.rest().remaining(), 20);

        assert_eq!(
            p.apply(Command::PauseResumeRest, now + ms(40_500)),
            Transition::RestPaused { remaining: 20 }
        );
        p.tick(now + ms(45_000));
        let resumed = now + ms(70_950);
        assert_eq!(
            p.apply(Command::PauseResumeRest, resumed),
            Transition::RestResumed { remaining: 20 }
        );
        p.tick(resumed + ms(50));
        assert_eq!(p.rest().remaining(), 20);
        p.tick(resumed + ms(1_000));
        assert_eq!(p.rest().remaining(), 19);
    }

    #[test]
    fn test_pause_resume_rest_without_rest_is_ignored() {
        let (mut p, now) = player(1, &[None]);
        assert_eq!(p.apply(Command::PauseResumeRest, now), Transition::Ignored);
        assert_eq!(p.apply(Command::SkipRest, now), Transition::Ignored);
    }

    #[test]
    fn test_workout_complete_fills_every_key() {
        let (mut p, _) = player(3, &[None, None]);
        p.completed.insert(CompletionKey::new(2, 1));

        assert_eq!(p.workout_complete(), Transition::WorkoutCompleted);
        assert_eq!(p.completed_count(), 6);
        assert_eq!(p.progress_percent(), 100);
        assert_eq!(p.progress_fraction(), 1.0);
        assert_eq!(p.phase(), Phase::Completed);
        for tour in 1..=3 {
            for index in 0..2 {
                assert!(p.is_completed(CompletionKey::new(tour, index)));
            }
        }
    }

    #[test]
    fn test_completed_workout_ignores_further_completion() {
        let (mut p, now) = player(1, &[None]);
        assert_eq!(p.apply(Command::CompleteExercise, now), Transition::WorkoutCompleted);
        assert_eq!(p.apply(Command::CompleteExercise, now), Transition::Ignored);
        assert_eq!(p.completed_count(), 1);
    }

    #[test]
    fn test_start_timer_on_untimed_exercise_is_ignored() {
        let (mut p, now) = player(1, &[None]);
        assert_eq!(p.apply(Command::StartExerciseTimer, now), Transition::Ignored);
        assert_eq!(p.exercise_timer().state(), CountdownState::Idle);
    }

    #[test]
    fn test_exercise_timer_lifecycle() {
        let (mut p, now) = player(1, &[Some(3)]);

        assert_eq!(
            p.apply(Command::StartExerciseTimer, now),
            Transition::ExerciseTimerStarted { secs: 3 }
        );
        p.tick(now + ms(1_000));
        assert_eq!(
            p.apply(Command::ToggleExerciseTimer, now + ms(1_200)),
            Transition::ExerciseTimerPaused { remaining: 2 }
        );
        assert!(p.tick(now + ms(2_000)).is_empty());
        assert_eq!(
            p.apply(Command::ToggleExerciseTimer, now + ms(2_500)),
            Transition::ExerciseTimerResumed { remaining: 2 }
        );
        assert!(p.tick(now + ms(3_000)).is_empty());
        assert!(p.tick(now + ms(3_500)).is_empty());
        assert_eq!(p.exercise_timer().remaining(), 1);
        assert_eq!(
            p.tick(now + ms(4_500)),
            vec![Transition::ExerciseTimerFinished]
        );
        assert_eq!(
            p.apply(Command::ToggleExerciseTimer, now + ms(5_000)),
            Transition::Ignored
        );
    }

    #[test]
    fn test_timer_started_mid_second_runs_full_length() {
        let (mut p, t0) = player(1, &[Some(10)]);
        let started = t0 + ms(950);
        p.apply(Command::StartExerciseTimer, started);

        assert!(p.tick(t0 + ms(1_000)).is_empty());
        assert_eq!(p.exercise_timer().remaining(), 10);
        assert!(p.tick(started + ms(9_050)).is_empty());
        assert_eq!(p.exercise_timer().state(), CountdownState::Running);
        assert_eq!(
            p.tick(started + ms(10_000)),
            vec![Transition::ExerciseTimerFinished]
        );
    }

    #[test]
    fn test_changing_exercise_resets_timer() {
        let (mut p, now) = player(1, &[Some(30), Some(30)]);
        p.apply(Command::StartExerciseTimer, now);
        p.apply(Command::NavigateNext, now);
        assert_eq!(p.exercise_timer().state(), CountdownState::Idle);

        p.apply(Command::StartExerciseTimer, now);
        p.apply(Command::NavigatePrev, now);
        assert_eq!(p.exercise_timer().state(), CountdownState::Idle);

        p.apply(Command::StartExerciseTimer, now);
        p.apply(Command::CompleteExercise, now);
        assert_eq!(p.exercise_timer().state(), CountdownState::Idle);
    }

    #[test]
    fn test_boundary_navigation_keeps_timer_running() {
        let (mut p, now) = player(1, &[Some(30)]);
        p.apply(Command::StartExerciseTimer, now);
        p.apply(Command::NavigateNext, now);
        assert!(p.exercise_timer().is_running());
    }

    #[test]
    fn test_preview_pauses_total_clock_and_excludes_interval() {
        let (mut p, t0) = player(1, &[None, None]);
        let mut flips = 0;
        let mut was_paused = p.total_clock().is_paused();

        for (at, command) in [(10, Command::TogglePreview), (25, Command::TogglePreview)] {
            p.apply(command, t0 + Duration::from_secs(at));
            if p.total_clock().is_paused() != was_paused {
                flips += 1;
                was_paused = p.total_clock().is_paused();
            }
        }

        assert_eq!(flips, 2);
        assert!(!p.total_clock().is_paused());
        assert_eq!(
            p.total_clock().elapsed(t0 + Duration::from_secs(30)),
            Duration::from_secs(15)
        );
    }

    #[test]
    fn test_leaving_preview_keeps_manual_pause() {
        let (mut p, t0) = player(1, &[None]);
        assert_eq!(
            p.apply(Command::ToggleTotalTimer, t0 + Duration::from_secs(5)),
            Transition::TotalClockPaused
        );
        p.apply(Command::TogglePreview, t0 + Duration::from_secs(6));
        p.apply(Command::TogglePreview, t0 + Duration::from_secs(7));

        assert!(p.total_clock().is_paused());
        assert_eq!(
            p.apply(Command::ToggleTotalTimer, t0 + Duration::from_secs(9)),
            Transition::TotalClockResumed
        );
    }

    #[test]
    fn test_reset_total_time() {
        let (mut p, t0) = player(1, &[None]);
        p.tick(t0 + Duration::from_secs(30));
        assert_eq!(p.total_clock().shown(), Duration::from_secs(30));

        assert_eq!(
            p.apply(Command::ResetTotalTimer, t0 + Duration::from_secs(31)),
            Transition::TotalClockReset
        );
        assert_eq!(p.total_clock().shown(), Duration::ZERO);
        p.tick(t0 + Duration::from_secs(33));
        assert_eq!(p.total_clock().shown(), Duration::from_secs(2));
    }
}
