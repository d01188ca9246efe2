use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::demo_state::Demo;

const HELP_TEXT: &str = "j/k scroll  PgUp/PgDn half page  g/G top/bottom  p parallax  q quit";

const FILLER: [&str; 6] = [
    "The coordinator listens once and fans out to every consumer.",
    "Native events between frames collapse into a single pending event.",
    "Each handler keeps its own throttle and never slows the others.",
    "Sub-pixel jitter is dropped before it reaches anyone.",
    "The last consumer to leave takes the listeners with it.",
    "",
];

impl Demo {
    pub fn render(&mut self, frame: &mut Frame) {
        let [body, fade_area, stats_area, help_area] = Layout::vertical([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let [document_area, rail_area] =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(26)]).areas(body);

        self.render_document(frame, document_area);
        self.render_parallax(frame, rail_area);
        self.render_fade(frame, fade_area);
        self.render_stats(frame, stats_area);
        self.render_help_line(frame, help_area);
    }

    fn render_document(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title(" Document ");
        let inner = block.inner(area);
        self.resize_pane(inner.width, inner.height);

        let scroll = self.window.scroll();
        let first = scroll.offset;
        let last = (first + u32::from(inner.height)).min(scroll.lines);
        let lines: Vec<Line> = (first..last)
            .map(|row| {
                Line::from(vec![
                    Span::styled(format!("{:>5} ", row + 1), Style::default().fg(Color::DarkGray)),
                    Span::raw(FILLER[row as usize % FILLER.len()]),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_parallax(&self, frame: &mut Frame, area: Rect) {
        let title = if self.parallax_paused {
            " Parallax (paused) "
        } else {
            " Parallax "
        };
        let lines = vec![
            Line::from(format!("offset  {:.0}px", self.parallax.offset())),
            Line::from(format!("factor  {}", self.parallax.multiplier())),
            Line::from(match self.viewport.viewport() {
                Some(size) => format!("view    {}x{}", size.width, size.height),
                None => "view    -".to_string(),
            }),
        ];
        let block = Block::default().borders(Borders::ALL).title(title);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_fade(&self, frame: &mut Frame, area: Rect) {
        let opacity = self.fade.opacity();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Fade "))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(opacity.clamp(0.0, 1.0))
            .label(format!("opacity {:.2}", opacity));
        frame.render_widget(gauge, area);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let last = match self.last_event() {
            Some(event) => event.to_string(),
            None => "waiting for scroll".to_string(),
        };
        let monitor = if self.monitor.is_enabled() {
            self.monitor.report().to_string()
        } else {
            "disabled".to_string()
        };
        let stats = self.coordinator.stats();

        let lines = vec![
            Line::from(vec!["last     ".bold(), Span::raw(last)]),
            Line::from(vec!["monitor  ".bold(), Span::raw(monitor)]),
            Line::from(vec![
                "dispatch ".bold(),
                Span::raw(format!(
                    "native {} discarded {} frames {} deliveries {} failures {}",
                    stats.native_events,
                    stats.discarded_events,
                    stats.frames,
                    stats.deliveries,
                    stats.handler_failures
                )),
            ]),
        ];
        let block = Block::default().borders(Borders::ALL).title(" Events ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_help_line(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.notification {
            Some(message) => Line::from(message.as_str().yellow()),
            None => Line::from(HELP_TEXT.dark_gray()),
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
