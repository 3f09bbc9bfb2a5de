pub mod overlay;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};
use seance::{
    keymap::HINTS,
    session::Session,
    snapshot::{Snapshot, TourMark},
    timer::CountdownState,
};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;

pub fn draw(app: &App, f: &mut Frame) {
    let snapshot = app.snapshot();
    screen::current_screen(snapshot.phase).render(app, &snapshot, f);
}

/// Header, timer panel, exercise panel and footer
pub struct PlayerView<'a> {
    pub app: &'a App,
    pub snapshot: &'a Snapshot,
}

impl Widget for PlayerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(8),    // panels
                Constraint::Length(2), // notice + hints
            ])
            .split(area);

        render_header(self.app.player.session(), self.snapshot, chunks[0], buf);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        render_timer_panel(self.snapshot, panels[0], buf);
        render_exercise_panel(self.snapshot, panels[1], buf);
        render_footer(self.app.notice.as_deref(), chunks[2], buf);
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn tour_dots(tours: &[TourMark]) -> Vec<Span<'static>> {
    tours
        .iter()
        .map(|mark| match mark {
            TourMark::Completed => Span::styled("● ", Style::default().fg(Color::Green)),
            TourMark::Active => Span::styled("◉ ", bold().fg(Color::Yellow)),
            TourMark::Future => Span::styled("○ ", dim()),
        })
        .collect()
}

fn render_header(session: &Session, snapshot: &Snapshot, area: Rect, buf: &mut Buffer) {
    let details = [
        session.author.as_str(),
        session.body_areas.as_str(),
        session.estimated_time.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join("  ·  ");

    let mut progress = vec![
        Span::styled(
            format!("Progress {}%", snapshot.progress_percent),
            bold().fg(Color::Cyan),
        ),
        Span::raw("   "),
        Span::styled(
            format!("Tour {}/{}  ", snapshot.current_tour, snapshot.tours.len()),
            bold(),
        ),
    ];
    progress.extend(tour_dots(&snapshot.tours));

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            session.title.clone(),
            bold().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(details, dim())),
        Line::from(progress),
    ])
    .alignment(Alignment::Center);

    header.render(area, buf);
}

fn render_timer_panel(snapshot: &Snapshot, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title(" Timer ");
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // exercises label
            Constraint::Length(1), // global gauge
            Constraint::Length(1), // padding
            Constraint::Length(1), // time left label
            Constraint::Length(1), // countdown
            Constraint::Length(1), // countdown gauge
            Constraint::Length(1), // padding
            Constraint::Length(1), // total time
            Constraint::Min(0),
        ])
        .split(inner);

    Paragraph::new(Line::from(vec![
        Span::styled("EXERCISES ", dim()),
        Span::styled(
            format!("{}/{}", snapshot.completed_count, snapshot.total_steps),
            bold(),
        ),
    ]))
    .alignment(Alignment::Center)
    .render(rows[0], buf);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(snapshot.progress_fraction.clamp(0.0, 1.0))
        .label(format!("{}%", snapshot.progress_percent))
        .render(rows[1], buf);

    Paragraph::new(Span::styled("TIME LEFT", dim()))
        .alignment(Alignment::Center)
        .render(rows[3], buf);

    let timer = &snapshot.timer;
    let (timer_style, suffix) = match timer.state {
        CountdownState::Running => (bold().fg(Color::Yellow), ""),
        CountdownState::Paused => (bold().fg(Color::Gray), "  (paused)"),
        CountdownState::Finished => (bold().fg(Color::Green), ""),
        CountdownState::Idle => (dim(), ""),
    };
    Paragraph::new(Line::from(vec![
        Span::styled(timer.display.clone(), timer_style),
        Span::styled(suffix, dim()),
    ]))
    .alignment(Alignment::Center)
    .render(rows[4], buf);

    if timer.shows_control {
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Yellow))
            .ratio(timer.progress.clamp(0.0, 1.0))
            .label("")
            .render(rows[5], buf);
    }

    let mut total = vec![
        Span::styled("TOTAL ", dim()),
        Span::styled(snapshot.total_elapsed.clone(), bold()),
    ];
    if snapshot.total_paused {
        total.push(Span::styled("  (paused)", dim()));
    }
    Paragraph::new(Line::from(total))
        .alignment(Alignment::Center)
        .render(rows[7], buf);
}

fn render_exercise_panel(snapshot: &Snapshot, area: Rect, buf: &mut Buffer) {
    let title = if snapshot.previewing {
        " Exercise (preview) "
    } else {
        " Exercise "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    block.render(area, buf);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // preview indicator
            Constraint::Length(4), // exercise card
            Constraint::Length(1), // navigation
            Constraint::Min(1),    // programme
        ])
        .split(inner);

    if snapshot.previewing {
        Paragraph::new(Span::styled(
            "PREVIEW MODE",
            bold().fg(Color::Magenta).add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(rows[0], buf);
    }

    let ex = &snapshot.exercise;
    let mut card = vec![
        Line::from(Span::styled(
            format!("{} {}", ex.icon, ex.name).trim().to_string(),
            bold(),
        )),
        Line::from(ex.specs.clone()),
    ];
    if let Some(secs) = ex.timed_duration() {
        card.push(Line::from(Span::styled(
            format!("timed: {secs}s"),
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(url) = ex.video_url() {
        card.push(Line::from(Span::styled(url, dim())));
    }
    Paragraph::new(card)
        .wrap(Wrap { trim: true })
        .render(rows[1], buf);

    let nav_style = |enabled: bool| if enabled { bold() } else { dim() };
    Paragraph::new(Line::from(vec![
        Span::styled("◀ prev", nav_style(snapshot.can_go_prev)),
        Span::styled("   (v) preview   ", dim()),
        Span::styled("next ▶", nav_style(snapshot.can_go_next)),
    ]))
    .alignment(Alignment::Center)
    .render(rows[2], buf);

    let items: Vec<ListItem> = snapshot
        .upcoming
        .iter()
        .map(|item| {
            let mark = if item.completed { "✓" } else { " " };
            let mut style = Style::default();
            if item.completed {
                style = style.fg(Color::Green).add_modifier(Modifier::CROSSED_OUT);
            }
            if item.displayed {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            ListItem::new(Line::from(vec![
                Span::styled(format!("{mark} {} {}", item.icon, item.name), style),
                Span::styled(format!("  {}", item.specs), dim()),
            ]))
        })
        .collect();

    List::new(items)
        .block(Block::default().borders(Borders::TOP).title(" Programme "))
        .render(rows[3], buf);
}

fn render_footer(notice: Option<&str>, area: Rect, buf: &mut Buffer) {
    Paragraph::new(vec![
        Line::from(Span::styled(
            notice.unwrap_or_default().to_string(),
            bold().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            HINTS,
            Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .render(area, buf);
}
