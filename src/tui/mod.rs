//! Ratatui-based terminal UI.
//!
//! The TUI is an input form over the twelve profile fields: pick a field,
//! adjust it, press Enter to score. The result card and the encoded feature
//! vector are shown next to the form.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::domain::{CategoricalField, NumericField, PredictionResult, RawInput};
use crate::error::{AppError, EXIT_INTERNAL};
use crate::predictor::{Classifier, IncomeService, Scored};

/// Start the TUI.
pub fn run<M: Classifier>(service: &IncomeService<M>, model_label: &str) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(service, model_label);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_INTERNAL,
                format!("Failed to enter alternate screen: {e}"),
            ));
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

/// One row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Number(NumericField),
    Choice(CategoricalField),
}

/// Form order: the two input columns of the original layout, then the rest.
const FORM: [FormField; 12] = [
    FormField::Number(NumericField::Age),
    FormField::Choice(CategoricalField::Workclass),
    FormField::Choice(CategoricalField::MaritalStatus),
    FormField::Choice(CategoricalField::Occupation),
    FormField::Number(NumericField::CapitalGain),
    FormField::Number(NumericField::EducationNum),
    FormField::Choice(CategoricalField::Relationship),
    FormField::Choice(CategoricalField::Race),
    FormField::Choice(CategoricalField::Gender),
    FormField::Number(NumericField::CapitalLoss),
    FormField::Number(NumericField::HoursPerWeek),
    FormField::Choice(CategoricalField::NativeCountry),
];

impl FormField {
    fn name(self) -> &'static str {
        match self {
            FormField::Number(f) => f.name(),
            FormField::Choice(f) => f.name(),
        }
    }
}

struct App<'a, M> {
    service: &'a IncomeService<M>,
    model_label: String,
    input: RawInput,
    selected_field: usize,
    status: String,
    last: Option<Scored>,
}

impl<'a, M: Classifier> App<'a, M> {
    fn new(service: &'a IncomeService<M>, model_label: &str) -> Self {
        Self {
            service,
            model_label: model_label.to_string(),
            input: RawInput::default(),
            selected_field: 0,
            status: "Fill in the details and press Enter to predict.".to_string(),
            last: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_INTERNAL, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code)? {
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
    fn handle_key(&mut self, code: KeyCode) -> Result<bool, AppError> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FORM.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::PageDown => self.adjust_field(-10),
            KeyCode::PageUp => self.adjust_field(10),
            KeyCode::Char('r') => {
                self.input = RawInput::default();
                self.last = None;
                self.status = "Form reset.".to_string();
            }
            KeyCode::Enter => self.predict()?,
            _ => {}
        }
        Ok(false)
    }

    fn adjust_field(&mut self, delta: i64) {
        match FORM[self.selected_field] {
            FormField::Number(field) => {
                let (lo, hi) = field.range();
                let next = (self.input.value(field) + delta * field.step()).clamp(lo, hi);
                self.input.set_value(field, next);
            }
            FormField::Choice(field) => {
                let options = field.options();
                let n = options.len() as i64;
                let cur = options
                    .iter()
                    .position(|o| *o == self.input.label(field))
                    .unwrap_or(0) as i64;
                let next = (cur + delta.signum()).rem_euclid(n) as usize;
                self.input.set_label(field, options[next]);
            }
        }
        // Any edit invalidates the shown result.
        self.last = None;
    }

    fn predict(&mut self) -> Result<(), AppError> {
        match self.service.score(&self.input) {
            Ok(scored) => {
                self.status = format!("Prediction: {}", scored.prediction.short_label());
                self.last = Some(scored);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
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
            Line::from(vec![
                Span::styled(
                    "Employee Salary Predictor",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(": more or less than $50K?"),
            ]),
            Line::from(Span::styled(
                format!("model: {}", self.model_label),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
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
        let items: Vec<ListItem> = FORM
            .iter()
            .map(|&field| ListItem::new(format!("{:<16} {}", field.name(), self.field_text(field))))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Enter the details").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn field_text(&self, field: FormField) -> String {
        match field {
            FormField::Number(f) => {
                let (lo, hi) = f.range();
                format!("{}  [{lo}..{hi}]", self.input.value(f))
            }
            FormField::Choice(f) => format!("‹ {} ›", self.input.label(f)),
        }
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Result").borders(Borders::ALL);

        let Some(scored) = &self.last else {
            let msg = Paragraph::new("Press Enter to predict.")
                .style(Style::default().fg(Color::Yellow))
                .block(block);
            frame.render_widget(msg, area);
            return;
        };

        let color = match scored.prediction {
            PredictionResult::HighIncome => Color::Green,
            PredictionResult::StandardIncome => Color::Cyan,
        };

        let mut lines = vec![
            Line::from(Span::styled(
                scored.prediction.headline(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(scored.prediction.detail(), Style::default().fg(color))),
            Line::from(""),
            Line::from(Span::styled("Feature vector", Style::default().fg(Color::Gray))),
        ];
        for (name, value) in scored.features.named() {
            lines.push(Line::from(format!("  {name:<16} {value}")));
        }

        frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ×10  Enter predict  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}
