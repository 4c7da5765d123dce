//! Health-trend chart rendering.
//!
//! Draws the health-history series as a filled area chart: a fixed [0, 100]
//! score axis, dashed grid lines, time labels along the bottom, and an area
//! whose fill fades from the series color at the curve down to the terminal
//! background. The hovered sample gets a point marker; its tooltip is drawn
//! by [`crate::ui::inspect`].

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
    Frame,
};

use crate::app::App;
use crate::data::HealthSample;
use crate::state::SharedState;
use crate::ui::Theme;

/// Fixed vertical domain of the chart; scores are always mapped against
/// this range, never against the data's own min/max.
pub const SCORE_DOMAIN: (f64, f64) = (0.0, 100.0);

/// Sub-cell fill glyphs for the area's top edge (8 levels per cell).
const EDGE_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Fill opacity at the top of the score domain; fades linearly to zero at
/// the baseline.
const FILL_ALPHA_TOP: f64 = 0.30;

/// Width of the score-label gutter ("100 ").
const Y_GUTTER: u16 = 4;

/// Render the health-trend chart into `area`.
///
/// Records the plot geometry on the [`App`] so mouse events can be mapped
/// back to sample indices. An empty history renders the bare chart frame.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(
        " Health Trend ({}/{}) ",
        app.state.len(),
        app.state.retention()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width < Y_GUTTER + 4 || inner.height < 4 {
        app.plot_area = None;
        return;
    }

    // Bottom row carries the time labels, the left gutter the score labels.
    let plot = Rect::new(
        inner.x + Y_GUTTER,
        inner.y,
        inner.width - Y_GUTTER,
        inner.height - 1,
    );
    app.plot_area = Some(plot);

    let theme = app.theme.clone();
    let cursor = app.cursor;
    let points = series_points(app.state.iter());
    let scores: Vec<f64> = points.iter().map(|&(_, score)| score).collect();

    let buf = frame.buffer_mut();
    draw_score_labels(buf, inner, plot, &theme);
    draw_grid(buf, plot, &theme);

    let columns = resample(&scores, plot.width);
    draw_area(buf, plot, &columns, &theme);
    draw_time_labels(buf, inner, plot, &app.state, &theme);

    if let Some(index) = cursor {
        draw_marker(buf, plot, &scores, index, &theme);
    }
}

/// Data points in input order: x = sample index, y = raw score.
pub fn series_points<'a, I>(samples: I) -> Vec<(f64, f64)>
where
    I: IntoIterator<Item = &'a HealthSample>,
{
    samples
        .into_iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.score))
        .collect()
}

/// Per-column values across `width` columns, linear between samples.
///
/// A single sample stays a single column; two or more are spread across the
/// full width, endpoints pinned to the first and last sample.
pub(crate) fn resample(scores: &[f64], width: u16) -> Vec<f64> {
    let w = width as usize;
    if scores.is_empty() || w == 0 {
        return Vec::new();
    }
    if scores.len() == 1 {
        return vec![scores[0]];
    }
    if w == 1 {
        // A single column shows the most recent value
        return scores.last().map(|&v| vec![v]).unwrap_or_default();
    }

    let n = scores.len();
    (0..w)
        .map(|c| {
            let t = c as f64 * (n - 1) as f64 / (w - 1) as f64;
            let i = t.floor() as usize;
            let frac = t - i as f64;
            if i + 1 < n {
                scores[i] * (1.0 - frac) + scores[i + 1] * frac
            } else {
                scores[n - 1]
            }
        })
        .collect()
}

/// Terminal column (relative to the plot) of sample `index`.
pub(crate) fn sample_column(index: usize, count: usize, width: u16) -> u16 {
    if count <= 1 || width <= 1 {
        return 0;
    }
    let col = (index as f64 * (width - 1) as f64 / (count - 1) as f64).round();
    (col as u16).min(width - 1)
}

/// Nearest sample to a terminal column (relative to the plot).
pub(crate) fn column_sample(column: u16, count: usize, width: u16) -> usize {
    if count <= 1 {
        return 0;
    }
    if width <= 1 {
        return count - 1;
    }
    let idx = (column as f64 * (count - 1) as f64 / (width - 1) as f64).round();
    (idx as usize).min(count - 1)
}

/// Sub-cell fill level for a score in a plot `height` rows tall.
///
/// Scores are clamped to the fixed domain for geometry only; the data is
/// never rewritten.
fn fill_level(score: f64, height: u16) -> u32 {
    let (lo, hi) = SCORE_DOMAIN;
    let sub_total = height as u32 * 8;
    let frac = (score.clamp(lo, hi) - lo) / (hi - lo);
    ((frac * sub_total as f64).round() as u32).min(sub_total)
}

/// Row of a domain value under plain linear cell mapping (labels, grid).
fn row_of(score: f64, plot: Rect) -> u16 {
    let (lo, hi) = SCORE_DOMAIN;
    let frac = (hi - score.clamp(lo, hi)) / (hi - lo);
    plot.y + (frac * (plot.height - 1) as f64).round() as u16
}

/// Row containing the area's top edge for a fill level.
fn edge_row(level: u32, plot: Rect) -> u16 {
    let bottom = plot.y + plot.height - 1;
    if level == 0 {
        return bottom;
    }
    let full = (level / 8) as u16;
    if level % 8 > 0 {
        bottom - full
    } else {
        bottom - (full - 1)
    }
}

fn put(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        put(buf, x + i as u16, y, ch, style);
    }
}

fn draw_score_labels(buf: &mut Buffer, inner: Rect, plot: Rect, theme: &Theme) {
    let style = Style::default().fg(theme.axis);
    put_str(buf, inner.x, row_of(100.0, plot), "100", style);
    put_str(buf, inner.x, row_of(50.0, plot), " 50", style);
    put_str(buf, inner.x, row_of(0.0, plot), "  0", style);
}

fn draw_grid(buf: &mut Buffer, plot: Rect, theme: &Theme) {
    let style = Style::default().fg(theme.grid);
    for value in [25.0, 50.0, 75.0] {
        let y = row_of(value, plot);
        for x in plot.x..plot.x + plot.width {
            put(buf, x, y, '╌', style);
        }
    }
}

fn draw_area(buf: &mut Buffer, plot: Rect, columns: &[f64], theme: &Theme) {
    let sub_total = plot.height as u32 * 8;
    let bottom = plot.y + plot.height - 1;
    let stroke = Style::default().fg(theme.series_color());

    for (i, &score) in columns.iter().enumerate() {
        let x = plot.x + i as u16;
        let level = fill_level(score, plot.height);
        let full = (level / 8) as u16;
        let rem = level % 8;

        for r in 0..full {
            let y = bottom - r;
            if rem == 0 && r + 1 == full {
                // Top edge lands on a cell boundary: the full block is the stroke
                put(buf, x, y, '█', stroke);
                continue;
            }
            let cell_mid = r as f64 * 8.0 + 4.0;
            let alpha = FILL_ALPHA_TOP * cell_mid / sub_total as f64;
            if alpha >= 0.03 {
                put(buf, x, y, '█', Style::default().fg(theme.series_faded(alpha)));
            }
        }

        if rem > 0 {
            put(buf, x, bottom - full, EDGE_CHARS[rem as usize - 1], stroke);
        } else if level == 0 {
            // Keep a zero score visible as a thin baseline
            put(buf, x, bottom, EDGE_CHARS[0], stroke);
        }
    }
}

fn draw_time_labels(buf: &mut Buffer, inner: Rect, plot: Rect, state: &SharedState, theme: &Theme) {
    let n = state.len();
    let Some(first) = state.get(0) else {
        return;
    };
    let style = Style::default().fg(theme.axis);
    let y = inner.y + inner.height - 1;

    put_str(buf, plot.x, y, &first.time, style);

    let Some(last) = state.latest().filter(|_| n >= 2) else {
        return;
    };
    let needed = (first.time.chars().count() + last.time.chars().count() + 2) as u16;
    if plot.width <= needed {
        return;
    }
    let last_x = plot.x + plot.width - last.time.chars().count() as u16;
    put_str(buf, last_x, y, &last.time, style);

    if let Some(mid) = state.get(n / 2).filter(|_| n >= 3) {
        let mid_len = mid.time.chars().count() as u16;
        if plot.width > needed + mid_len + 2 {
            let mid_x = plot.x + (plot.width - mid_len) / 2;
            put_str(buf, mid_x, y, &mid.time, style);
        }
    }
}

fn draw_marker(buf: &mut Buffer, plot: Rect, scores: &[f64], index: usize, theme: &Theme) {
    if index >= scores.len() {
        return;
    }
    let col = sample_column(index, scores.len(), plot.width);
    let level = fill_level(scores[index], plot.height);
    let y = edge_row(level, plot);
    let style = Style::default()
        .fg(theme.series_color())
        .add_modifier(Modifier::BOLD);
    put(buf, plot.x + col, y, '●', style);
}
