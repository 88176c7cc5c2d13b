//! Status overlay and the static fallback screen.

use std::time::Duration;

use backdrop_core::{AnimationKind, AnimationSpeed, Palette, Theme, TimingMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

/// What the status line reports.
#[derive(Debug, Clone, Copy)]
pub struct HudStatus {
    pub animation: AnimationKind,
    pub theme: Theme,
    pub speed: AnimationSpeed,
    pub timing: TimingMode,
    pub paused: bool,
    pub fps: Option<f32>,
    pub degraded: bool,
    /// Time left until auto-rotation; `None` while it is off.
    pub next_rotation: Option<Duration>,
}

pub fn status_line(status: &HudStatus, accent: Color) -> Line<'static> {
    let mut spans = vec![
        Span::from(format!(" {} ", status.animation.display_name())).bold().fg(accent),
        Span::from(format!(" theme {} ", status.theme.label())).dark_gray(),
        Span::from(format!(" speed {} ", status.speed.label())).dark_gray(),
        Span::from(format!(" {} ", status.timing.label())).dark_gray(),
    ];
    match status.next_rotation {
        Some(left) => {
            let secs = left.as_secs_f32().ceil();
            spans.push(Span::from(format!(" next in {secs:.0}s ")).dark_gray());
        }
        None => spans.push(Span::from(" auto off ").dark_gray()),
    }
    if let Some(fps) = status.fps {
        let fps = Span::from(format!(" {fps:.0} FPS "));
        spans.push(if status.degraded {
            fps.bold().yellow()
        } else {
            fps.dark_gray()
        });
        if status.degraded {
            spans.push(Span::from("low frame rate ").yellow());
        }
    }
    if status.paused {
        spans.push(Span::from(" paused ").bold().fg(accent));
    }
    Line::from(spans)
}

pub fn help_line(accent: Color) -> Line<'static> {
    let keys = [
        ("n", " next  "),
        ("r", " random  "),
        ("1-5", " pick  "),
        ("a", " auto  "),
        ("c", " theme  "),
        ("s", " speed  "),
        ("t", " timing  "),
        ("space", " pause  "),
        ("h", " hide  "),
        ("q", " quit"),
    ];
    let spans: Vec<Span> = keys
        .into_iter()
        .flat_map(|(key, label)| [key.bold().fg(accent), label.dark_gray()])
        .collect();
    Line::from(spans).centered()
}

/// Bottom two rows: status, then key help.
pub fn render(frame: &mut Frame, area: Rect, status: &HudStatus, palette: Palette) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);
    let accent = palette.accent.to_color();
    let bar = Style::new().bg(Color::Black);
    frame.render_widget(Paragraph::new(status_line(status, accent)).style(bar), chunks[1]);
    frame.render_widget(Paragraph::new(help_line(accent)).style(bar), chunks[2]);
}

/// Plain themed screen shown while no animation can run.
pub fn render_placeholder(frame: &mut Frame, area: Rect, palette: Palette, reason: &str) {
    let background = Style::new().bg(palette.background.to_color());
    frame.render_widget(Block::new().style(background), area);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);
    let text = Style::new().fg(palette.foreground.to_color());
    frame.render_widget(
        Paragraph::new("backdrop").style(text.bold()).alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(format!("animation unavailable: {reason}"))
            .style(text)
            .alignment(Alignment::Center),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn status() -> HudStatus {
        HudStatus {
            animation: AnimationKind::Bubbles,
            theme: Theme::Ocean,
            speed: AnimationSpeed::Fast,
            timing: TimingMode::PerTick,
            paused: false,
            fps: Some(58.6),
            degraded: false,
            next_rotation: Some(Duration::from_millis(4_200)),
        }
    }

    #[test]
    fn test_status_line_contents() {
        let line = text(&status_line(&status(), Color::White));
        assert!(line.contains(AnimationKind::Bubbles.display_name()));
        assert!(line.contains("theme ocean"));
        assert!(line.contains("speed fast"));
        assert!(line.contains("next in 5s"));
        assert!(line.contains("59 FPS"));
        assert!(!line.contains("low frame rate"));
    }

    #[test]
    fn test_degraded_and_paused_are_flagged() {
        let status = HudStatus {
            paused: true,
            fps: Some(20.0),
            degraded: true,
            next_rotation: None,
            ..status()
        };
        let line = text(&status_line(&status, Color::White));
        assert!(line.contains("low frame rate"));
        assert!(line.contains("paused"));
        assert!(line.contains("auto off"));
    }

    #[test]
    fn test_help_line_lists_quit() {
        assert!(text(&help_line(Color::White)).contains("q quit"));
    }
}
