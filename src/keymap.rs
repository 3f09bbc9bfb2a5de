//! Keyboard shortcuts.
//!
//! | key          | action                                                   |
//! |--------------|----------------------------------------------------------|
//! | space, enter | skip rest / start or resume timer / complete exercise    |
//! | left, right  | previous / next exercise                                 |
//! | v            | toggle preview mode                                      |
//! | p            | pause or resume the exercise timer (timed exercises)     |
//! | r            | pause or resume the rest, else reset the exercise timer  |
//! | t, T         | pause or resume / reset the total timer                  |
//! | o            | open the exercise video                                  |
//! | esc, q, ^C   | quit                                                     |

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::player::{Command, Player};
use crate::timer::CountdownState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Player(Command),
    OpenVideo,
    Quit,
}

pub const HINTS: &str =
    "(space) next/timer  (←/→) navigate  (v) preview  (p) pause timer  (r) reset/rest  (t/T) total  (o) video  (q) quit";

/// Resolves a key press against the current player state.
pub fn action_for(key: KeyEvent, player: &Player) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => confirm(player).map(Action::Player),
        KeyCode::Left => Some(Action::Player(Command::NavigatePrev)),
        KeyCode::Right => Some(Action::Player(Command::NavigateNext)),
        KeyCode::Char('v') => Some(Action::Player(Command::TogglePreview)),
        KeyCode::Char('p') => player
            .current_exercise()
            .is_timed()
            .then_some(Action::Player(Command::ToggleExerciseTimer)),
        KeyCode::Char('r') if player.is_resting() => Some(Action::Player(Command::PauseResumeRest)),
        KeyCode::Char('r') => Some(Action::Player(Command::ResetExerciseTimer)),
        KeyCode::Char('t') => Some(Action::Player(Command::ToggleTotalTimer)),
        KeyCode::Char('T') => Some(Action::Player(Command::ResetTotalTimer)),
        KeyCode::Char('o') => Some(Action::OpenVideo),
        _ => None,
    }
}

/// Confirm/advance: skips a rest, does nothing in preview, drives the
/// timer of a timed exercise, and completes the exercise otherwise.
fn confirm(player: &Player) -> Option<Command> {
    if player.is_resting() {
        return Some(Command::SkipRest);
    }
    if player.is_previewing() {
        return None;
    }

    let timed = player.current_exercise().is_timed();
    match player.exercise_timer().state() {
        CountdownState::Idle if timed => Some(Command::StartExerciseTimer),
        CountdownState::Paused if timed => Some(Command::ToggleExerciseTimer),
        _ => Some(Command::CompleteExercise),
    }
}
