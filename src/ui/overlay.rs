use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use seance::snapshot::{RestView, Snapshot};
use unicode_width::UnicodeWidthStr;

const MIN_OVERLAY_WIDTH: u16 = 34;

/// Rect of at most `width` x `height`, centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn overlay_rect(lines: &[&str], area: Rect) -> Rect {
    let widest = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    centered_rect(
        widest.saturating_add(6).max(MIN_OVERLAY_WIDTH),
        lines.len() as u16 + 4,
        area,
    )
}

/// Rest between tours, drawn over the player view
pub struct RestOverlay<'a>(pub &'a RestView);

impl Widget for RestOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rest = self.0;
        let controls = if rest.paused {
            "(space) skip   (r) resume"
        } else {
            "(space) skip   (r) pause"
        };
        let rect = overlay_rect(&[rest.title.as_str(), rest.remaining.as_str(), controls], area);

        Clear.render(rect, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(
                rest.title.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                rest.remaining.clone(),
                Style::default()
                    .fg(if rest.paused { Color::Gray } else { Color::Yellow })
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                controls,
                Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Rest "))
        .alignment(Alignment::Center)
        .render(rect, buf);
    }
}

pub const COMPLETION_MESSAGE: &str = "Workout complete! Well done.";

/// Terminal state banner
pub struct CompletionBanner<'a>(pub &'a Snapshot);

impl Widget for CompletionBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.0;
        let summary = format!(
            "{}/{} exercises in {}",
            snapshot.completed_count, snapshot.total_steps, snapshot.total_elapsed
        );
        let rect = overlay_rect(&[COMPLETION_MESSAGE, summary.as_str(), "(q) quit"], area);

        Clear.render(rect, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(
                COMPLETION_MESSAGE,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(summary),
            Line::from(Span::styled(
                "(q) quit",
                Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM),
            )),
        ])
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .render(rect, buf);
    }
}
