//! UI Components for the terminal interface

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::{Phase, Progress};

const TITLE: &str = " NBA Stats Pipeline ";

impl Phase {
    /// Position of the phase among the four pipeline steps
    pub fn step(&self) -> Option<usize> {
        match self {
            Phase::Connecting => Some(1),
            Phase::Generating => Some(2),
            Phase::Loading => Some(3),
            Phase::Verifying => Some(4),
            Phase::Complete | Phase::Failed => None,
        }
    }

    fn indicator(&self) -> &'static str {
        match self {
            Phase::Connecting => "◐",
            Phase::Generating => "⚙",
            Phase::Loading => "↓",
            Phase::Verifying => "≡",
            Phase::Complete => "✓",
            Phase::Failed => "✗",
        }
    }

    fn style(&self) -> Style {
        let color = match self {
            Phase::Complete => Color::Green,
            Phase::Failed => Color::Red,
            _ => Color::Cyan,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

/// Status panel showing current phase, step and info
pub struct StatusPanel {
    phase: Phase,
    info: String,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self {
            phase: Phase::Connecting,
            info: String::new(),
        }
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let style = self.phase.style();

        let mut heading = vec![
            Span::styled(format!(" {} ", self.phase.indicator()), style),
            Span::styled(self.phase.to_string(), style),
        ];
        if let Some(step) = self.phase.step() {
            heading.push(Span::styled(
                format!("  (step {}/4)", step),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let lines = vec![
            Line::from(heading),
            Line::from(""),
            Line::from(vec![
                Span::raw("   "),
                Span::styled(&self.info, Style::default().fg(Color::Gray)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(TITLE)
            .border_style(Style::default().fg(Color::Blue));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Progress panel showing rows loaded for the current file
pub struct ProgressPanel {
    progress: Option<Progress>,
}

impl ProgressPanel {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn set_progress(&mut self, progress: Progress) {
        self.progress = Some(progress);
    }

    pub fn clear(&mut self) {
        self.progress = None;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::Blue));

        let Some(progress) = &self.progress else {
            frame.render_widget(Paragraph::new("").block(block), area);
            return;
        };

        let label = if progress.total > 0 {
            format!(
                "{}: {}/{} rows ({:.0}%)",
                progress.label,
                progress.current,
                progress.total,
                progress.ratio() * 100.0
            )
        } else {
            progress.label.clone()
        };

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
            .ratio(progress.ratio().min(1.0))
            .label(label);

        frame.render_widget(gauge, area);
    }
}

/// Log panel showing the most recent activity, failures highlighted
pub struct LogPanel {
    entries: Vec<String>,
    max_entries: usize,
}

impl LogPanel {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 200,
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Activity ")
            .border_style(Style::default().fg(Color::Blue));

        let visible_height = area.height.saturating_sub(2) as usize;
        let start = self.entries.len().saturating_sub(visible_height);
        let last = self.entries.len().saturating_sub(1);

        let items: Vec<ListItem> = self.entries[start..]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let lower = entry.to_lowercase();
                let style = if lower.contains("failed") || lower.contains("error") {
                    Style::default().fg(Color::Red)
                } else if start + i == last {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Span::styled(format!(" {}", entry), style))
            })
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

/// Selectable list of menu entries
pub struct MenuPanel {
    entries: Vec<String>,
    state: ListState,
}

impl MenuPanel {
    pub fn new(entries: Vec<String>) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));
        Self { entries, state }
    }

    pub fn selected(&self) -> usize {
        self.state.selected().unwrap_or(0)
    }

    pub fn next(&mut self) {
        let next = (self.selected() + 1) % self.entries.len().max(1);
        self.state.select(Some(next));
    }

    pub fn previous(&mut self) {
        let len = self.entries.len().max(1);
        let prev = (self.selected() + len - 1) % len;
        self.state.select(Some(prev));
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| ListItem::new(format!(" {}. {}", i + 1, entry)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Schedule automation ")
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
