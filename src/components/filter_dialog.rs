//! Filter dialogs for the loan and game lists
//!
//! Both apply on Enter. `Delete` clears the focused field.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::form::{buttons_line, field_line, SelectField, TextField};
use crate::model::loan::parse_date_input;
use crate::model::{Category, Client, Game, GameFilter, LoanFilter};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn filter_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(title)
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
}

fn clear_hint() -> Line<'static> {
    Line::from(Span::styled(
        "  Supr limpia el campo seleccionado",
        Style::default().fg(Color::DarkGray),
    ))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Loan filter
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum LoanFilterField {
    #[default]
    Game,
    Client,
    Date,
}

pub struct LoanFilterDialog {
    games: SelectField<Game>,
    clients: SelectField<Client>,
    date: TextField,
    focus: LoanFilterField,
}

impl Default for LoanFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanFilterDialog {
    pub fn new() -> Self {
        Self {
            games: SelectField::new("Juego"),
            clients: SelectField::new("Cliente"),
            date: TextField::new("Fecha"),
            focus: LoanFilterField::default(),
        }
    }

    /// Reset to the filters currently applied to the list
    pub fn open(&mut self, filter: &LoanFilter, games: Vec<Game>, clients: Vec<Client>) {
        *self = Self::new();
        self.set_options(games, clients);
        self.games.select_id(filter.game_id.as_deref());
        self.clients.select_id(filter.client_id.as_deref());
        if let Some(date) = filter.date {
            self.date.set(date.format("%Y-%m-%d").to_string());
        }
    }

    pub fn set_options(&mut self, games: Vec<Game>, clients: Vec<Client>) {
        self.games.set_options(games);
        self.clients.set_options(clients);
    }

    /// Typed date that does not parse
    fn has_bad_date(&self) -> bool {
        !self.date.is_blank() && parse_date_input(&self.date.value).is_none()
    }

    /// Filter to apply, or `None` while the date cannot be read
    pub fn filter(&self) -> Option<LoanFilter> {
        if self.has_bad_date() {
            return None;
        }
        Some(LoanFilter {
            game_id: self.games.selected_id().map(str::to_string),
            client_id: self.clients.selected_id().map(str::to_string),
            date: parse_date_input(&self.date.value),
        })
    }

    fn clear_focused(&mut self) {
        match self.focus {
            LoanFilterField::Game => self.games.clear(),
            LoanFilterField::Client => self.clients.clear(),
            LoanFilterField::Date => self.date.clear(),
        }
    }
}

impl Component for LoanFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.filter().map(Action::ApplyLoanFilter),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = match self.focus {
                    LoanFilterField::Game => LoanFilterField::Client,
                    LoanFilterField::Client => LoanFilterField::Date,
                    LoanFilterField::Date => LoanFilterField::Game,
                };
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = match self.focus {
                    LoanFilterField::Game => LoanFilterField::Date,
                    LoanFilterField::Client => LoanFilterField::Game,
                    LoanFilterField::Date => LoanFilterField::Client,
                };
                None
            }
            KeyCode::Right => {
                match self.focus {
                    LoanFilterField::Game => self.games.next(),
                    LoanFilterField::Client => self.clients.next(),
                    LoanFilterField::Date => {}
                }
                None
            }
            KeyCode::Left => {
                match self.focus {
                    LoanFilterField::Game => self.games.previous(),
                    LoanFilterField::Client => self.clients.previous(),
                    LoanFilterField::Date => {}
                }
                None
            }
            KeyCode::Delete => {
                self.clear_focused();
                None
            }
            KeyCode::Backspace if self.focus == LoanFilterField::Date => {
                self.date.backspace();
                None
            }
            KeyCode::Char(c) if self.focus == LoanFilterField::Date => {
                self.date.input(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 60, 11);
        frame.render_widget(Clear, popup_area);

        let date_hint = if self.has_bad_date() {
            Span::styled("  Fecha no válida (AAAA-MM-DD)", Style::default().fg(Color::Red))
        } else {
            Span::styled("  Fecha en formato AAAA-MM-DD", Style::default().fg(Color::DarkGray))
        };

        let content = vec![
            Line::from(""),
            field_line(
                self.games.label,
                &self.games.display(),
                self.focus == LoanFilterField::Game,
                true,
            ),
            field_line(
                self.clients.label,
                &self.clients.display(),
                self.focus == LoanFilterField::Client,
                true,
            ),
            field_line(
                self.date.label,
                &self.date.value,
                self.focus == LoanFilterField::Date,
                false,
            ),
            Line::from(date_hint),
            clear_hint(),
            Line::from(""),
            buttons_line("Filtrar", !self.has_bad_date()),
        ];

        let paragraph = Paragraph::new(content).block(filter_block(" Filtrar Préstamos "));
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Game filter
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum GameFilterField {
    #[default]
    Title,
    Category,
}

pub struct GameFilterDialog {
    title: TextField,
    categories: SelectField<Category>,
    focus: GameFilterField,
}

impl Default for GameFilterDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFilterDialog {
    pub fn new() -> Self {
        Self {
            title: TextField::new("Título"),
            categories: SelectField::new("Categoría"),
            focus: GameFilterField::default(),
        }
    }

    pub fn open(&mut self, filter: &GameFilter, categories: Vec<Category>) {
        *self = Self::new();
        self.set_options(categories);
        self.title.set(filter.title.clone());
        self.categories.select_id(filter.category_id.as_deref());
    }

    pub fn set_options(&mut self, categories: Vec<Category>) {
        self.categories.set_options(categories);
    }

    pub fn filter(&self) -> GameFilter {
        GameFilter {
            title: self.title.value.trim().to_string(),
            category_id: self.categories.selected_id().map(str::to_string),
        }
    }
}

impl Component for GameFilterDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ApplyGameFilter(self.filter())),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
                self.focus = match self.focus {
                    GameFilterField::Title => GameFilterField::Category,
                    GameFilterField::Category => GameFilterField::Title,
                };
                None
            }
            KeyCode::Right if self.focus == GameFilterField::Category => {
                self.categories.next();
                None
            }
            KeyCode::Left if self.focus == GameFilterField::Category => {
                self.categories.previous();
                None
            }
            KeyCode::Delete => {
                match self.focus {
                    GameFilterField::Title => self.title.clear(),
                    GameFilterField::Category => self.categories.clear(),
                }
                None
            }
            KeyCode::Backspace if self.focus == GameFilterField::Title => {
                self.title.backspace();
                None
            }
            KeyCode::Char(c) if self.focus == GameFilterField::Title => {
                self.title.input(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 60, 9);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            field_line(
                self.title.label,
                &self.title.value,
                self.focus == GameFilterField::Title,
                false,
            ),
            field_line(
                self.categories.label,
                &self.categories.display(),
                self.focus == GameFilterField::Category,
                true,
            ),
            Line::from(""),
            clear_hint(),
            Line::from(""),
            buttons_line("Filtrar", true),
        ];

        let paragraph = Paragraph::new(content).block(filter_block(" Filtrar Juegos "));
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
