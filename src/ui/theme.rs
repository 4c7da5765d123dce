//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::HealthLevel;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on the
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warning-level health.
    pub warning: Color,
    /// Color for critical-level health.
    pub critical: Color,
    /// Color for healthy status.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Muted color for axis labels.
    pub axis: Color,
    /// Low-contrast color for grid lines.
    pub grid: Color,
    /// The trend series color (line and fill base).
    pub series: (u8, u8, u8),
    /// Background the area fill fades toward.
    pub canvas: (u8, u8, u8),
    /// Tooltip background.
    pub tooltip_bg: Color,
    /// Tooltip label (time) color.
    pub tooltip_label: Color,
    /// Style for the header line.
    pub header: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            axis: Color::Rgb(0x66, 0x66, 0x66),
            grid: Color::Rgb(0x33, 0x33, 0x33),
            series: (0x22, 0xc5, 0x5e),
            canvas: (0x10, 0x10, 0x10),
            tooltip_bg: Color::Rgb(0x1f, 0x1f, 0x1f),
            tooltip_label: Color::Rgb(0x99, 0x99, 0x99),
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            axis: Color::Rgb(0x55, 0x55, 0x55),
            grid: Color::Rgb(0xd4, 0xd4, 0xd4),
            series: (0x16, 0xa3, 0x4a),
            canvas: (0xf5, 0xf5, 0xf5),
            tooltip_bg: Color::Rgb(0x1f, 0x1f, 0x1f),
            tooltip_label: Color::Rgb(0x99, 0x99, 0x99),
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Resolve a configured theme name, falling back to auto-detection.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("dark") => Self::dark(),
            Some("light") => Self::light(),
            _ => Self::auto_detect(),
        }
    }

    /// Get style for a health level
    pub fn level_style(&self, level: HealthLevel) -> Style {
        match level {
            HealthLevel::Healthy => Style::default().fg(self.healthy),
            HealthLevel::Warning => Style::default().fg(self.warning),
            HealthLevel::Critical => {
                Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
            }
        }
    }

    /// The series color at full intensity.
    pub fn series_color(&self) -> Color {
        let (r, g, b) = self.series;
        Color::Rgb(r, g, b)
    }

    /// The series color blended toward the canvas at `alpha` in [0, 1].
    ///
    /// Terminal cells have no opacity, so the gradient fill is emulated by
    /// mixing the series color into the detected background.
    pub fn series_faded(&self, alpha: f64) -> Color {
        let a = alpha.clamp(0.0, 1.0);
        let blend = |fg: u8, bg: u8| (bg as f64 + (fg as f64 - bg as f64) * a).round() as u8;
        let (fr, fg_, fb) = self.series;
        let (br, bg_, bb) = self.canvas;
        Color::Rgb(blend(fr, br), blend(fg_, bg_), blend(fb, bb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name(Some("light")).series, Theme::light().series);
        assert_eq!(Theme::from_name(Some("dark")).series, Theme::dark().series);
    }

    #[test]
    fn test_series_faded_endpoints() {
        let theme = Theme::dark();
        assert_eq!(theme.series_faded(1.0), theme.series_color());
        let (r, g, b) = theme.canvas;
        assert_eq!(theme.series_faded(0.0), Color::Rgb(r, g, b));
    }

    #[test]
    fn test_level_styles_differ() {
        let theme = Theme::dark();
        assert_ne!(
            theme.level_style(HealthLevel::Healthy),
            theme.level_style(HealthLevel::Critical)
        );
    }
}
