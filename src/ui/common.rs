//! Common UI chrome shared around the chart.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::duration::format_age;
use crate::data::HealthLevel;

/// Render the header bar with the current health overview.
///
/// Displays: level indicator, latest score, sample count, min/max/mean.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let summary = app.state.summary();

    let Some(latest) = summary.latest else {
        let line = Line::from(vec![
            Span::styled(" GATEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("| waiting for samples..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let level = HealthLevel::from_score(latest, &app.thresholds);
    let level_style = app.theme.level_style(level);

    let line = Line::from(vec![
        Span::styled(" ● ", level_style),
        Span::styled("GATEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            format!("{:.0} ", latest),
            level_style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(level.label(), level_style),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", summary.samples),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("/{} samples │ ", app.state.retention())),
        Span::raw(format!(
            "min {:.0} max {:.0} avg {:.0}",
            summary.min.unwrap_or(0.0),
            summary.max.unwrap_or(0.0),
            summary.mean.unwrap_or(0.0),
        )),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for a temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(updated) = app.state.last_updated() {
        format!(
            " {} | updated {} ago | ←→:inspect Esc:clear e:export ?:help q:quit",
            app.source_description(),
            format_age(updated.elapsed()),
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        format!(" {} | waiting... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the chart.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Inspect",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l    Step through samples"),
        Line::from("  Home/End   Jump to oldest/latest"),
        Line::from("  Mouse      Hover a point, click to pin"),
        Line::from("  Esc        Clear the cursor"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r          Reload data"),
        Line::from("  e          Export to JSON"),
        Line::from("  q          Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 44u16.min(area.width.saturating_sub(4));
    let help_height = 18u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
