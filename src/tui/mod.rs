//! Ratatui-based terminal UI.
//!
//! The TUI is the interactive input form: pick soil type and crop, set the
//! numeric fields, submit, and read the predicted yield (or the error) in the
//! result panel. Every submission reloads the artifact, and a failed one leaves
//! the form ready for the next attempt.

use std::io;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};

use crate::app::pipeline::{self, Submission};
use crate::artifact::ArtifactStore;
use crate::config::Settings;
use crate::error::{AppError, EXIT_TERMINAL};

pub mod form;

use form::{Field, FormState};

/// Start the TUI.
pub fn run(settings: Settings) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(settings);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_TERMINAL, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    settings: Settings,
    store: ArtifactStore,
    form: FormState,
    selected_field: usize,
    /// Text buffer while a numeric field is being typed in.
    editing: Option<String>,
    status: String,
    result: Option<(Submission, DateTime<Local>)>,
}

impl App {
    fn new(settings: Settings) -> Self {
        let store = ArtifactStore::new(&settings.artifact_path);
        Self {
            status: format!("artifact: {}", store.path().display()),
            settings,
            store,
            form: FormState::default(),
            selected_field: 0,
            editing: None,
            result: None,
        }
    }

    fn field(&self) -> Field {
        Field::ALL[self.selected_field]
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down | KeyCode::Tab => {
                if self.selected_field < Field::ALL.len() - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.form.adjust(self.field(), -1),
            KeyCode::Right => self.form.adjust(self.field(), 1),
            KeyCode::PageDown => self.form.adjust(self.field(), -10),
            KeyCode::PageUp => self.form.adjust(self.field(), 10),
            KeyCode::Enter => {
                let field = self.field();
                if field == Field::Submit {
                    self.submit();
                } else if field.is_numeric() {
                    self.editing = Some(String::new());
                    self.status = format!("Editing {}. Enter to apply, Esc to cancel.", field.label());
                } else {
                    self.form.adjust(field, 1);
                }
            }
            KeyCode::Char('p') => self.submit(),
            _ => {}
        }

        false
    }

    fn handle_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let text = buffer.clone();
                self.editing = None;
                let field = self.field();
                self.status = match self.form.set_from_text(field, &text) {
                    Ok(Some(note)) => note,
                    Ok(None) => format!("{}: {}", field.label(), self.form.value_text(field)),
                    Err(e) => e,
                };
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn submit(&mut self) {
        let raw = self.form.raw_input();
        let outcome = pipeline::submit(&self.store, &raw, self.settings.encoder_policy);
        self.status = if outcome.is_success() {
            "Prediction complete.".to_string()
        } else {
            "Prediction failed; adjust the inputs or artifact and submit again.".to_string()
        };
        self.result = Some((outcome, Local::now()));
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "AI Driven Yield Prediction",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Revolutionizing agriculture with data-driven insights",
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = Field::ALL
            .iter()
            .enumerate()
            .map(|(idx, &field)| {
                if field == Field::Submit {
                    return ListItem::new(Line::from(Span::styled(
                        "[ Predict Yield ]",
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )));
                }
                let value = match (&self.editing, idx == self.selected_field) {
                    (Some(buffer), true) => format!("{buffer}_"),
                    _ => self.form.value_text(field),
                };
                let range = field
                    .bounds()
                    .map(|b| format!("  ({} .. {})", b.min, b.max))
                    .unwrap_or_else(|| "  (←/→)".to_string());
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{:<20} ", field.label())),
                    Span::styled(value, Style::default().fg(Color::Cyan)),
                    Span::styled(range, Style::default().fg(Color::DarkGray)),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Result").borders(Borders::ALL);

        let Some((outcome, at)) = &self.result else {
            let msg = Paragraph::new("Fill in the form and press Enter on [ Predict Yield ] (or p).")
                .style(Style::default().fg(Color::Yellow))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let mut lines = Vec::new();
        match outcome {
            Submission::Predicted { lines: result, warnings, .. } => {
                for line in result {
                    lines.push(Line::from(Span::styled(
                        line.clone(),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    )));
                }
                for warning in warnings {
                    lines.push(Line::from(Span::styled(warning.clone(), Style::default().fg(Color::Yellow))));
                }
            }
            Submission::Failed { line, .. } => {
                lines.push(Line::from(Span::styled(line.clone(), Style::default().fg(Color::Red))));
            }
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("submitted {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )));

        let p = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(block);
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ×10  Enter edit/submit  p predict  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
