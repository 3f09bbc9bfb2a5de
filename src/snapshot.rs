//! Read-only view of a [`Player`] for the presentation layer.

use crate::player::{CompletionKey, Phase, Player};
use crate::session::Exercise;
use crate::timer::CountdownState;
use crate::util::format_duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourMark {
    Completed,
    Active,
    Future,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingItem {
    pub icon: String,
    pub name: String,
    pub specs: String,
    /// Done during the current tour
    pub completed: bool,
    /// Currently on screen
    pub displayed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerView {
    pub display: String,
    pub progress: f64,
    pub state: CountdownState,
    pub shows_control: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestView {
    pub title: String,
    pub remaining: String,
    pub paused: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub displayed_index: usize,
    pub exercise: Exercise,
    pub can_go_prev: bool,
    pub can_go_next: bool,
    pub upcoming: Vec<UpcomingItem>,
    pub completed_count: usize,
    pub total_steps: usize,
    pub progress_percent: u8,
    pub progress_fraction: f64,
    pub current_tour: u32,
    pub tours: Vec<TourMark>,
    pub timer: TimerView,
    pub rest: Option<RestView>,
    pub total_elapsed: String,
    pub total_paused: bool,
    pub previewing: bool,
}

impl Snapshot {
    pub fn of(player: &Player) -> Self {
        let session = player.session();
        let displayed_index = player.displayed_index();
        let last = session.exercise_count().saturating_sub(1);
        let current_tour = player.current_tour();

        let upcoming = session
            .exercises
            .iter()
            .enumerate()
            .map(|(index, ex)| UpcomingItem {
                icon: ex.icon.clone(),
                name: ex.name.clone(),
                specs: ex.specs.clone(),
                completed: player.is_completed(CompletionKey::new(current_tour, index)),
                displayed: index == displayed_index,
            })
            .collect();

        let tours = (1..=session.tours)
            .map(|tour| match tour.cmp(&current_tour) {
                std::cmp::Ordering::Less => TourMark::Completed,
                std::cmp::Ordering::Equal => TourMark::Active,
                std::cmp::Ordering::Greater => TourMark::Future,
            })
            .collect();

        let timer = player.exercise_timer();
        let rest = player.rest();
        let total = player.total_clock();

        Self {
            phase: player.phase(),
            displayed_index,
            exercise: player.displayed_exercise().clone(),
            can_go_prev: displayed_index > 0,
            can_go_next: displayed_index < last,
            upcoming,
            completed_count: player.completed_count(),
            total_steps: session.total_steps(),
            progress_percent: player.progress_percent(),
            progress_fraction: player.progress_fraction(),
            current_tour,
            tours,
            timer: TimerView {
                display: timer.display(),
                progress: timer.progress(),
                state: timer.state(),
                shows_control: timer.shows_control(),
            },
            rest: rest.is_visible().then(|| RestView {
                title: rest.title().to_string(),
                remaining: rest.display(),
                paused: rest.is_paused(),
            }),
            total_elapsed: format_duration(total.shown()),
            total_paused: total.is_paused(),
            previewing: player.is_previewing(),
        }
    }
}
