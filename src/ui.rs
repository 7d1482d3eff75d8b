pub mod charting;

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, ListState, Paragraph,
        StatefulWidget, Widget, Wrap,
    },
};

use crate::{
    app::App,
    format,
    inspection::InspectionState,
    session::Penalty,
    time_series::{trend, TrendPoint},
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const HELP: &str = concat!(
    "(space) start/stop  (i)nspect  (2) +2  (d)nf  (o)k  (x) delete  ",
    "(tab) puzzle  (n)ew scramble  (r)eset  (esc)ape"
);

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let now = Instant::now();
        let engine = &self.engine;

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // puzzle
                Constraint::Length(3), // scramble
                Constraint::Length(1), // padding
                Constraint::Length(1), // clock
                Constraint::Length(1), // inspection
                Constraint::Length(1), // stats
                Constraint::Min(5),    // history + chart
                Constraint::Length(1), // status
                Constraint::Length(1), // help
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("cubik · {}", engine.puzzle().name()),
            bold_style.fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(engine.scramble(), bold_style))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[1], buf);

        let clock_style = if engine.is_running() {
            bold_style
        } else if self.gesture.is_armed(now) {
            bold_style.fg(Color::Green)
        } else if self.gesture.is_pressed() {
            bold_style.fg(Color::Red)
        } else {
            bold_style.patch(dim_style)
        };
        Paragraph::new(Span::styled(format::clock_time(engine.tick()), clock_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let inspection_style = match self.inspection.state(now) {
            InspectionState::Counting { warning: true, .. } => Style::default().fg(Color::Red),
            InspectionState::Ready => Style::default().fg(Color::LightGreen),
            _ => Style::default().fg(Color::Rgb(255, 165, 0)),
        };
        Paragraph::new(Span::styled(self.inspection.label(now), inspection_style))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let stats = engine.statistics();
        let dnf_note = if stats.dnf_count > 0 {
            format!(" ({} DNF)", stats.dnf_count)
        } else {
            String::new()
        };
        Paragraph::new(Line::from(vec![
            Span::styled("best ", dim_style),
            Span::styled(stats.best_display(), bold_style.fg(Color::Green)),
            Span::styled("   worst ", dim_style),
            Span::styled(stats.worst_display(), bold_style.fg(Color::Red)),
            Span::styled("   avg ", dim_style),
            Span::styled(stats.average_display(), bold_style),
            Span::styled(
                format!(
                    "   σ {}",
                    stats
                        .std_dev
                        .map_or("--".to_string(), |sd| format!("{sd:.2}"))
                ),
                dim_style,
            ),
            Span::styled(format!("   solves {}{dnf_note}", stats.count), dim_style),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(10)])
            .split(chunks[6]);

        render_history(self, body[0], buf);
        render_trend(self, body[1], buf);

        Paragraph::new(Span::styled(
            self.status.as_str(),
            Style::default().fg(Color::Yellow),
        ))
        .alignment(Alignment::Center)
        .render(chunks[7], buf);

        Paragraph::new(Span::styled(HELP, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[8], buf);
    }
}

fn render_history(app: &App, area: Rect, buf: &mut Buffer) {
    let records = app.engine.records();
    let items: Vec<ListItem> = if records.is_empty() {
        vec![ListItem::new(Span::styled(
            "No solves yet",
            Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC),
        ))]
    } else {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let style = match record.penalty() {
                    Penalty::None => Style::default(),
                    Penalty::PlusTwo => Style::default().fg(Color::Yellow),
                    Penalty::DidNotFinish => Style::default().fg(Color::Red),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>3}. ", i + 1),
                        Style::default().add_modifier(Modifier::DIM),
                    ),
                    Span::styled(record.display_time(), style),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Times"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !records.is_empty() {
        state.select(app.selected);
    }
    StatefulWidget::render(list, area, buf, &mut state);
}

fn render_trend(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let points = trend(app.engine.session());
    let (x_bounds, y_bounds) = charting::compute_chart_bounds(&points, app.engine.records().len());

    let data: Vec<(f64, f64)> = points.iter().copied().map(<(f64, f64)>::from).collect();
    let selected: Vec<(f64, f64)> = app
        .selected
        .and_then(|i| points.iter().find(|p| p.solve == (i + 1) as f64))
        .map(|p: &TrendPoint| vec![(p.solve, p.secs)])
        .unwrap_or_default();

    let datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .style(Style::default().fg(Color::Magenta))
            .graph_type(GraphType::Line)
            .data(&data),
        Dataset::default()
            .marker(Marker::Dot)
            .style(Style::default().fg(Color::Yellow))
            .graph_type(GraphType::Scatter)
            .data(&selected),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("Trend"))
        .x_axis(
            Axis::default()
                .title("solve")
                .bounds(x_bounds)
                .labels(vec![
                    Span::styled(charting::format_label(x_bounds[0]), bold_style),
                    Span::styled(charting::format_label(x_bounds[1]), bold_style),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("seconds")
                .bounds(y_bounds)
                .labels(vec![
                    Span::styled(charting::format_label(y_bounds[0]), bold_style),
                    Span::styled(charting::format_label(y_bounds[1]), bold_style),
                ]),
        );

    chart.render(area, buf);
}
