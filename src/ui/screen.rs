use ratatui::Frame;
use seance::{player::Phase, snapshot::Snapshot};

use crate::{
    ui::{
        overlay::{CompletionBanner, RestOverlay},
        PlayerView,
    },
    App,
};

/// A UI Screen boundary: one per playback phase
pub trait Screen {
    fn render(&self, app: &App, snapshot: &Snapshot, f: &mut Frame);
}

fn render_player(app: &App, snapshot: &Snapshot, f: &mut Frame) {
    f.render_widget(PlayerView { app, snapshot }, f.area());
}

pub struct PlayingScreen;

impl Screen for PlayingScreen {
    fn render(&self, app: &App, snapshot: &Snapshot, f: &mut Frame) {
        render_player(app, snapshot, f);
    }
}

/// Player view with the rest overlay on top; the overlay blocks interaction
pub struct RestingScreen;

impl Screen for RestingScreen {
    fn render(&self, app: &App, snapshot: &Snapshot, f: &mut Frame) {
        render_player(app, snapshot, f);
        if let Some(rest) = &snapshot.rest {
            f.render_widget(RestOverlay(rest), f.area());
        }
    }
}

pub struct CompletedScreen;

impl Screen for CompletedScreen {
    fn render(&self, app: &App, snapshot: &Snapshot, f: &mut Frame) {
        render_player(app, snapshot, f);
        f.render_widget(CompletionBanner(snapshot), f.area());
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Playing => Box::new(PlayingScreen),
        Phase::Resting => Box::new(RestingScreen),
        Phase::Completed => Box::new(CompletedScreen),
    }
}
