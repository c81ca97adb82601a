//! Color constants and scaling helpers for the TUI.

use ratatui::style::Color;

use crate::catalog::actions::Priority;
use crate::catalog::plans::StepStatus;
use crate::sim::metrics::RiskBand;

/// Forecast temperature line color.
pub const FORECAST_COLOR: Color = Color::LightRed;
/// Heatwave threshold line color.
pub const THRESHOLD_COLOR: Color = Color::DarkGray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Heatwave indicator color.
pub const HEATWAVE_ACTIVE: Color = Color::Magenta;

pub fn risk_color(band: RiskBand) -> Color {
    match band {
        RiskBand::Low => Color::Green,
        RiskBand::Elevated => Color::Yellow,
        RiskBand::High => Color::Red,
    }
}

/// Green when high is good, red when low. Used for uptime, stability and charge.
pub fn health_color(pct: f64) -> Color {
    if pct >= 80.0 {
        Color::Green
    } else if pct >= 50.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Red when high is bad. Used for loads and demand.
pub fn load_color(pct: f64) -> Color {
    if pct > 130.0 {
        Color::Red
    } else if pct > 100.0 {
        Color::Yellow
    } else {
        Color::Cyan
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Critical => Color::Red,
        Priority::High => Color::LightRed,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Gray,
    }
}

pub fn step_color(status: StepStatus) -> Color {
    match status {
        StepStatus::Executing => Color::Blue,
        StepStatus::Completed => Color::Green,
        StepStatus::Ready => Color::Yellow,
        StepStatus::Pending => Color::DarkGray,
    }
}

/// Computes Y-axis bounds from chart data points with 10% padding.
pub fn auto_bounds_y(series: &[(f64, f64)], threshold: f64) -> [f64; 2] {
    let all = series.iter().map(|&(_, y)| y).chain(std::iter::once(threshold));
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 50.0];
    }
    let range = (max - min).max(1.0);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
