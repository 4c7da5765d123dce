//! Inspect overlay: the hovered sample's tooltip.
//!
//! Drawn on top of the chart next to the hovered point: the sample's time
//! label and score, verbatim from the store, on a dark rounded box.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::trend;

/// Render the tooltip for the hovered sample, if any.
///
/// Positioned beside the marker, flipped to whichever side has room. Skipped
/// entirely when the plot geometry is unknown or the terminal is too small.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let Some(plot) = app.plot_area else {
        return;
    };
    let Some((index, sample)) = app.hovered_sample() else {
        return;
    };

    let time_text = sample.time.clone();
    let score_text = format!("score {}", sample.score);
    let width = (time_text.chars().count().max(score_text.chars().count()) as u16 + 4).max(10);
    let height = 4u16;
    if area.width < width + 2 || area.height < height {
        return;
    }

    let marker_x = plot.x + trend::sample_column(index, app.state.len(), plot.width);

    // Prefer the right side of the marker, flip left when cramped
    let x = if marker_x + 2 + width <= area.x + area.width {
        marker_x + 2
    } else {
        marker_x.saturating_sub(width + 1).max(area.x)
    };
    let y = plot
        .y
        .max(area.y)
        .min((area.y + area.height).saturating_sub(height));

    let tooltip_area = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .style(Style::default().bg(app.theme.tooltip_bg));

    let lines = vec![
        Line::from(Span::styled(
            time_text,
            Style::default().fg(app.theme.tooltip_label),
        )),
        Line::from(Span::styled(
            score_text,
            Style::default()
                .fg(app.theme.series_color())
                .add_modifier(Modifier::BOLD),
        )),
    ];

    frame.render_widget(Clear, tooltip_area);
    frame.render_widget(Paragraph::new(lines).block(block), tooltip_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::data::{HealthSample, HealthUpdate, ScoreThresholds};
    use crate::source::ChannelSource;
    use crate::state::SharedState;
    use crate::ui::{trend, Theme};
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app(samples: Vec<HealthSample>) -> App {
        let (_tx, source) = ChannelSource::create("test");
        let mut state = SharedState::new(24);
        state.apply(HealthUpdate::Replace(samples));
        App::new(
            Box::new(source),
            state,
            ScoreThresholds::default(),
            Theme::dark(),
        )
    }

    fn render_text(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                trend::render(frame, app, area);
                render_overlay(frame, app, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn tooltip_shows_time_and_score_verbatim() {
        let mut app = test_app(vec![
            HealthSample::new("08:30", 87.5),
            HealthSample::new("09:30", 91.0),
        ]);
        app.cursor = Some(0);

        let text = render_text(&mut app, 50, 14);
        assert!(text.contains("08:30"));
        assert!(text.contains("score 87.5"));
    }

    #[test]
    fn no_tooltip_without_cursor() {
        let mut app = test_app(vec![HealthSample::new("08:30", 87.5)]);
        let text = render_text(&mut app, 50, 14);
        assert!(!text.contains("score"));
    }

    #[test]
    fn integral_scores_render_without_decimals() {
        let mut app = test_app(vec![HealthSample::new("10:00", 87.0)]);
        app.cursor = Some(0);

        let text = render_text(&mut app, 50, 14);
        assert!(text.contains("score 87"));
        assert!(!text.contains("score 87.0"));
    }
}
