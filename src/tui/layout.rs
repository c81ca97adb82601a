//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, List, ListItem, Paragraph};

use super::runtime::App;
use super::style;
use crate::catalog::actions::recommended_actions;
use crate::catalog::plans::plan;
use crate::sim::session::Snapshot;
use crate::sim::temperature::forecast_24h;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let snap = app.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(6), // gauges
            Constraint::Min(10),   // forecast
            Constraint::Length(12), // actions + plan
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, &snap, chunks[0]);
    render_gauges(frame, &snap, chunks[1]);
    render_forecast(frame, &snap, chunks[2]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    render_actions(frame, &snap, bottom[0]);
    render_plan(frame, app, &snap, bottom[1]);

    render_footer(frame, chunks[4]);
}

/// Header bar: preset, site, hour, mode, temperature, heatwave state.
fn render_header(frame: &mut Frame, app: &App, snap: &Snapshot, area: Rect) {
    let s = &snap.state;
    let heatwave = if s.heatwave_active {
        Span::styled(
            format!(" HEATWAVE {} ", s.heatwave_intensity),
            Style::default()
                .fg(style::HEATWAVE_ACTIVE)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw(" calm ")
    };
    let monitoring = if snap.monitoring { "● MON" } else { "○ MON" };

    let header = Line::from(vec![
        Span::styled(
            " HEATWAVE-SIM ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(&app.preset_name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " │ {} │ {:02}:00 │ {} │ {}°C │",
            snap.location_name, snap.hour, s.operation_mode, s.current_temp,
        )),
        heatwave,
        Span::raw(format!("│ {monitoring} ")),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn gauge(title: &str, pct: f64, label: String, color: Color) -> Gauge<'static> {
    Gauge::default()
        .block(Block::default().title(format!(" {title} ")).borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio((pct / 100.0).clamp(0.0, 1.0))
        .label(label)
}

/// Two rows of metric gauges.
fn render_gauges(frame: &mut Frame, snap: &Snapshot, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);
    let thirds = [Constraint::Ratio(1, 3); 3];
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(thirds)
        .split(rows[0]);
    let bot = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(thirds)
        .split(rows[1]);

    let m = &snap.metrics;
    let s = &snap.state;
    let cooling = m.cooling_load_display();

    frame.render_widget(
        gauge("Uptime", m.uptime, format!("{:.2}%", m.uptime), style::health_color(m.uptime)),
        top[0],
    );
    // the bar saturates at 100 while the label shows the full value
    frame.render_widget(
        gauge("Cooling Load", cooling, format!("{cooling:.0}%"), style::load_color(cooling)),
        top[1],
    );
    frame.render_widget(
        gauge(
            "Heat Risk",
            m.heat_risk,
            format!("{:.0}% ({})", m.heat_risk, snap.risk_band),
            style::risk_color(snap.risk_band),
        ),
        top[2],
    );
    frame.render_widget(
        gauge(
            "Grid Stability",
            m.grid_stability,
            format!("{:.0}%", m.grid_stability),
            style::health_color(m.grid_stability),
        ),
        bot[0],
    );
    frame.render_widget(
        gauge(
            "Battery",
            s.battery_capacity,
            format!("{:.0}%", s.battery_capacity),
            style::health_color(s.battery_capacity),
        ),
        bot[1],
    );
    frame.render_widget(
        gauge(
            "Renewables",
            s.renewable_penetration,
            format!("{:.0}%", s.renewable_penetration),
            style::health_color(s.renewable_penetration),
        ),
        bot[2],
    );
}

/// 24-hour temperature forecast against the site's heatwave threshold.
fn render_forecast(frame: &mut Frame, snap: &Snapshot, area: Rect) {
    let s = &snap.state;
    let profile = s.location.profile();
    let forecast: Vec<(f64, f64)> = forecast_24h(profile, s.heatwave_active, s.heatwave_intensity)
        .iter()
        .map(|p| (f64::from(p.hour), f64::from(p.temperature)))
        .collect();
    let threshold = [(0.0, snap.heatwave_threshold), (23.0, snap.heatwave_threshold)];
    let now = [(f64::from(snap.hour), f64::from(s.current_temp))];

    let y_bounds = style::auto_bounds_y(&forecast, snap.heatwave_threshold);

    let datasets = vec![
        Dataset::default()
            .name("Forecast")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::FORECAST_COLOR))
            .data(&forecast),
        Dataset::default()
            .name("Threshold")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::THRESHOLD_COLOR))
            .data(&threshold),
        Dataset::default()
            .name("Now")
            .marker(symbols::Marker::Block)
            .style(Style::default().fg(style::HEADER_FG))
            .data(&now),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(format!(" 24h Forecast: {} ", profile.name))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("hour")
                .bounds([0.0, 23.0])
                .labels(vec!["0".to_string(), "12".to_string(), "23".to_string()]),
        )
        .y_axis(
            Axis::default()
                .title("°C")
                .bounds(y_bounds)
                .labels(vec![
                    format!("{:.0}", y_bounds[0]),
                    format!("{:.0}", y_bounds[1]),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Recommended actions, highest priority first.
fn render_actions(frame: &mut Frame, snap: &Snapshot, area: Rect) {
    let items: Vec<ListItem> = recommended_actions(&snap.state)
        .iter()
        .map(|a| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<9}", a.priority.to_string()),
                    Style::default().fg(style::priority_color(a.priority)),
                ),
                Span::raw(format!("{} ({}, -{}% risk)", a.title, a.cost_estimate, a.risk_reduction)),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .title(" Recommended Actions ")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

/// Steps of the viewed plan, marking whether it is the active one.
fn render_plan(frame: &mut Frame, app: &App, snap: &Snapshot, area: Rect) {
    let p = plan(app.viewed_plan, &snap.state, snap.state.location.profile());
    let active = snap.active_plan == Some(p.level);

    let mut lines = vec![Line::from(format!(
        "  trigger {:.0}°C  success {}%  ran {}x",
        p.trigger_temp, p.overall_success_probability, p.historical.times_executed,
    ))];
    lines.extend(p.steps.iter().map(|step| {
        Line::from(vec![
            Span::styled(
                format!("  {:<10}", step.status.to_string()),
                Style::default().fg(style::step_color(step.status)),
            ),
            Span::raw(format!("{} ({}%)", step.title, step.success_probability)),
        ])
    }));

    let title = if active {
        format!(" {} [ACTIVE] ", p.name)
    } else {
        format!(" {} ", p.name)
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  l:Site  h:Heatwave  i:Intensity  g:Grid  b:Gens  s:Shift  m:Monitor  +/-:Renew  [/]:Battery  p:Plan  1-4:Preset  r:Restart",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
