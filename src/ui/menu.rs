//! Interactive menu for the scheduling facility

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io::{self, BufRead, Write};

use super::components::MenuPanel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Daily,
    Weekly,
    Custom,
    Test,
    List,
    Remove,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Daily,
        MenuChoice::Weekly,
        MenuChoice::Custom,
        MenuChoice::Test,
        MenuChoice::List,
        MenuChoice::Remove,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Daily => "Set up daily automation (6 AM)",
            MenuChoice::Weekly => "Set up weekly automation (Monday 6 AM)",
            MenuChoice::Custom => "Set up custom schedule",
            MenuChoice::Test => "Test automation script",
            MenuChoice::List => "List current cron jobs",
            MenuChoice::Remove => "Remove NBA automation",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Choice bound to a digit key, 1-based like the displayed list
    pub fn from_digit(c: char) -> Option<Self> {
        let idx = c.to_digit(10)? as usize;
        Self::ALL.get(idx.checked_sub(1)?).copied()
    }
}

/// Show the menu until the user picks an entry; Esc or `q` exit
pub fn select_choice() -> Result<MenuChoice> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_menu(&mut terminal);

    terminal::disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_menu(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<MenuChoice> {
    let mut menu = MenuPanel::new(MenuChoice::ALL.iter().map(|c| c.label().to_string()).collect());

    loop {
        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(9), Constraint::Length(1)])
                .split(frame.area());

            menu.render(frame, chunks[0]);
            frame.render_widget(
                Paragraph::new(" ↑/↓ move  Enter select  1-7 jump  q quit")
                    .style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
        })?;

        if let CrosstermEvent::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => menu.previous(),
                KeyCode::Down | KeyCode::Char('j') => menu.next(),
                KeyCode::Enter => return Ok(MenuChoice::ALL[menu.selected()]),
                KeyCode::Esc | KeyCode::Char('q') => return Ok(MenuChoice::Exit),
                KeyCode::Char(c) => {
                    if let Some(choice) = MenuChoice::from_digit(c) {
                        return Ok(choice);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Ask for a cron expression on the plain terminal
pub fn prompt_schedule() -> Result<Option<String>> {
    print!("Enter cron schedule (e.g., '0 6 * * *' for daily at 6 AM): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();

    Ok(if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_digit() {
        assert_eq!(MenuChoice::from_digit('1'), Some(MenuChoice::Daily));
        assert_eq!(MenuChoice::from_digit('7'), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::from_digit('0'), None);
        assert_eq!(MenuChoice::from_digit('8'), None);
        assert_eq!(MenuChoice::from_digit('x'), None);
    }
}
