//! Loan creation dialog
//!
//! Collects game, client and the loan period. "Crear" only fires while the
//! draft passes the full validity check; the period message shows whenever
//! the date range alone is not acceptable.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::form::{buttons_line, field_line, readonly_line, SelectField, TextField};
use crate::model::loan::parse_date_input;
use crate::model::{Client, Game, Loan, LoanDraft, DATE_RANGE_MESSAGE};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoanField {
    #[default]
    Game,
    Client,
    StartDate,
    EndDate,
}

impl LoanField {
    fn next(self) -> Self {
        match self {
            LoanField::Game => LoanField::Client,
            LoanField::Client => LoanField::StartDate,
            LoanField::StartDate => LoanField::EndDate,
            LoanField::EndDate => LoanField::Game,
        }
    }

    fn previous(self) -> Self {
        match self {
            LoanField::Game => LoanField::EndDate,
            LoanField::Client => LoanField::Game,
            LoanField::StartDate => LoanField::Client,
            LoanField::EndDate => LoanField::StartDate,
        }
    }
}

pub struct LoanDialog {
    id: String,
    games: SelectField<Game>,
    clients: SelectField<Client>,
    start_date: TextField,
    end_date: TextField,
    focus: LoanField,
}

impl Default for LoanDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanDialog {
    pub fn new() -> Self {
        Self {
            id: String::new(),
            games: SelectField::new("Juego"),
            clients: SelectField::new("Cliente"),
            start_date: TextField::new("Fecha de Inicio"),
            end_date: TextField::new("Fecha de Fin"),
            focus: LoanField::default(),
        }
    }

    /// Reset the dialog, optionally pre-populated from an existing loan
    pub fn open(&mut self, loan: Option<&Loan>, games: Vec<Game>, clients: Vec<Client>) {
        let draft = loan.map(LoanDraft::from_loan).unwrap_or_default();
        *self = Self::new();
        self.set_options(games, clients);

        self.id = draft.id.clone();
        self.games.select_id(draft.game.as_ref().map(|g| g.id.as_str()));
        self.clients.select_id(draft.client.as_ref().map(|c| c.id.as_str()));
        if let Some(date) = draft.start_date {
            self.start_date.set(date.format(INPUT_DATE_FORMAT).to_string());
        }
        if let Some(date) = draft.end_date {
            self.end_date.set(date.format(INPUT_DATE_FORMAT).to_string());
        }
    }

    pub fn set_options(&mut self, games: Vec<Game>, clients: Vec<Client>) {
        self.games.set_options(games);
        self.clients.set_options(clients);
    }

    /// Current form content as a draft
    pub fn draft(&self) -> LoanDraft {
        LoanDraft {
            id: self.id.clone(),
            game: self.games.selected().cloned(),
            client: self.clients.selected().cloned(),
            start_date: parse_date_input(&self.start_date.value),
            end_date: parse_date_input(&self.end_date.value),
        }
    }

    /// Whether "Crear" is enabled
    pub fn can_submit(&self) -> bool {
        self.draft().is_valid()
    }

    /// Whether the loan period message is on screen
    pub fn shows_date_message(&self) -> bool {
        !self.draft().is_date_range_valid()
    }

    fn focused_text(&mut self) -> Option<&mut TextField> {
        match self.focus {
            LoanField::StartDate => Some(&mut self.start_date),
            LoanField::EndDate => Some(&mut self.end_date),
            _ => None,
        }
    }
}

impl Component for LoanDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.draft().to_submission().map(Action::SaveLoan),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.previous();
                None
            }
            KeyCode::Right => {
                match self.focus {
                    LoanField::Game => self.games.next(),
                    LoanField::Client => self.clients.next(),
                    _ => {}
                }
                None
            }
            KeyCode::Left => {
                match self.focus {
                    LoanField::Game => self.games.previous(),
                    LoanField::Client => self.clients.previous(),
                    _ => {}
                }
                None
            }
            KeyCode::Backspace => {
                if let Some(field) = self.focused_text() {
                    field.backspace();
                }
                None
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.focused_text() {
                    field.input(c);
                }
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 66, 14);
        frame.render_widget(Clear, popup_area);

        let id = if self.id.is_empty() { "—" } else { self.id.as_str() };
        let mut content = vec![
            Line::from(""),
            readonly_line("Identificador", id),
            field_line(self.games.label, &self.games.display(), self.focus == LoanField::Game, true),
            field_line(
                self.clients.label,
                &self.clients.display(),
                self.focus == LoanField::Client,
                true,
            ),
            field_line(
                self.start_date.label,
                &self.start_date.value,
                self.focus == LoanField::StartDate,
                false,
            ),
            field_line(
                self.end_date.label,
                &self.end_date.value,
                self.focus == LoanField::EndDate,
                false,
            ),
            Line::from(Span::styled(
                "  Fechas en formato AAAA-MM-DD",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];

        if self.shows_date_message() {
            content.push(Line::from(Span::styled(
                format!("  {}", DATE_RANGE_MESSAGE),
                Style::default().fg(Color::Red),
            )));
        } else {
            content.push(Line::from(""));
        }
        content.push(Line::from(""));
        content.push(buttons_line("Crear", self.can_submit()));

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Crear Préstamo ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(dialog: &mut LoanDialog, text: &str) {
        for c in text.chars() {
            dialog.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
    }

    fn games() -> Vec<Game> {
        vec![Game { id: "G1".to_string(), title: "Catan".to_string(), ..Game::default() }]
    }

    fn clients() -> Vec<Client> {
        vec![Client { id: "C1".to_string(), name: "Ana".to_string() }]
    }

    /// Fill the form the way a user would: pick game and client, type dates
    fn fill(dialog: &mut LoanDialog, start: &str, end: &str) {
        dialog.handle_key_event(key(KeyCode::Right)).unwrap();
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        dialog.handle_key_event(key(KeyCode::Right)).unwrap();
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(dialog, start);
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(dialog, end);
    }

    #[test]
    fn test_create_loan_scenario() {
        let mut dialog = LoanDialog::new();
        dialog.open(None, games(), clients());
        assert!(!dialog.can_submit());
        assert!(dialog.shows_date_message());

        fill(&mut dialog, "2024-01-01", "2024-01-10");
        assert!(dialog.can_submit());
        assert!(!dialog.shows_date_message());

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        let loan = match action {
            Some(Action::SaveLoan(loan)) => loan,
            other => panic!("expected SaveLoan, got {:?}", other),
        };
        assert!(loan.id.is_empty());
        assert_eq!(loan.game.map(|g| g.id), Some("G1".to_string()));
        assert_eq!(loan.client.map(|c| c.id), Some("C1".to_string()));
        assert_eq!(loan.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(loan.end_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn test_too_long_period_blocks_submit() {
        let mut dialog = LoanDialog::new();
        dialog.open(None, games(), clients());
        fill(&mut dialog, "2024-01-01", "2024-01-16");

        assert!(dialog.shows_date_message());
        assert!(!dialog.can_submit());
        assert_eq!(dialog.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
    }

    #[test]
    fn test_date_message_ignores_other_fields() {
        let mut dialog = LoanDialog::new();
        dialog.open(None, games(), clients());
        // Jump straight to the dates without choosing game or client
        dialog.handle_key_event(key(KeyCode::BackTab)).unwrap();
        dialog.handle_key_event(key(KeyCode::BackTab)).unwrap();
        type_text(&mut dialog, "2024-01-01");
        dialog.handle_key_event(key(KeyCode::Tab)).unwrap();
        type_text(&mut dialog, "2024-01-05");

        assert!(!dialog.shows_date_message());
        assert!(!dialog.can_submit());
    }

    #[test]
    fn test_unparseable_date_counts_as_missing() {
        let mut dialog = LoanDialog::new();
        dialog.open(None, games(), clients());
        fill(&mut dialog, "2024-01-01", "mañana");
        assert!(dialog.draft().end_date.is_none());
        assert!(dialog.shows_date_message());
    }

    #[test]
    fn test_prefilled_loan_submits_blank_id() {
        let existing = Loan {
            id: "7".to_string(),
            game: games().pop(),
            client: clients().pop(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        };
        let mut dialog = LoanDialog::new();
        dialog.open(Some(&existing), games(), clients());
        assert_eq!(dialog.draft().id, "7");
        assert!(dialog.can_submit());

        let action = dialog.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(matches!(action, Some(Action::SaveLoan(ref loan)) if loan.id.is_empty()));
    }

    #[test]
    fn test_escape_closes() {
        let mut dialog = LoanDialog::new();
        assert_eq!(
            dialog.handle_key_event(key(KeyCode::Esc)).unwrap(),
            Some(Action::CloseModal)
        );
    }
}
