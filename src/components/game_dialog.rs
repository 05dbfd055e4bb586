//! Game create/edit dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::form::{buttons_line, field_line, readonly_line, SelectField, TextField};
use crate::model::{Author, Category, Game};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum GameField {
    #[default]
    Title,
    Category,
    Author,
}

pub struct GameDialog {
    id: String,
    title: TextField,
    categories: SelectField<Category>,
    authors: SelectField<Author>,
    focus: GameField,
}

impl Default for GameDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl GameDialog {
    pub fn new() -> Self {
        Self {
            id: String::new(),
            title: TextField::new("Título"),
            categories: SelectField::new("Categoría"),
            authors: SelectField::new("Autor"),
            focus: GameField::default(),
        }
    }

    /// Reset for a new game, or pre-populate from an existing one
    pub fn open(&mut self, game: Option<&Game>, categories: Vec<Category>, authors: Vec<Author>) {
        *self = Self::new();
        self.set_options(categories, authors);
        if let Some(game) = game {
            self.id = game.id.clone();
            self.title.set(game.title.clone());
            self.categories.select_id(game.category.as_ref().map(|c| c.id.as_str()));
            self.authors.select_id(game.author.as_ref().map(|a| a.id.as_str()));
        }
    }

    pub fn set_options(&mut self, categories: Vec<Category>, authors: Vec<Author>) {
        self.categories.set_options(categories);
        self.authors.set_options(authors);
    }

    pub fn is_editing(&self) -> bool {
        !self.id.is_empty()
    }

    /// The game to save, when every field is filled in
    pub fn submission(&self) -> Option<Game> {
        if self.title.is_blank() {
            return None;
        }
        Some(Game {
            id: self.id.clone(),
            title: self.title.value.trim().to_string(),
            category: Some(self.categories.selected()?.clone()),
            author: Some(self.authors.selected()?.clone()),
        })
    }
}

impl Component for GameDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => self.submission().map(Action::SaveGame),
            KeyCode::Tab | KeyCode::Down => {
                self.focus = match self.focus {
                    GameField::Title => GameField::Category,
                    GameField::Category => GameField::Author,
                    GameField::Author => GameField::Title,
                };
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = match self.focus {
                    GameField::Title => GameField::Author,
                    GameField::Category => GameField::Title,
                    GameField::Author => GameField::Category,
                };
                None
            }
            KeyCode::Right => {
                match self.focus {
                    GameField::Category => self.categories.next(),
                    GameField::Author => self.authors.next(),
                    GameField::Title => {}
                }
                None
            }
            KeyCode::Left => {
                match self.focus {
                    GameField::Category => self.categories.previous(),
                    GameField::Author => self.authors.previous(),
                    GameField::Title => {}
                }
                None
            }
            KeyCode::Backspace if self.focus == GameField::Title => {
                self.title.backspace();
                None
            }
            KeyCode::Char(c) if self.focus == GameField::Title => {
                self.title.input(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 60, 10);
        frame.render_widget(Clear, popup_area);

        let (heading, button) = if self.is_editing() {
            (" Modificar Juego ", "Guardar")
        } else {
            (" Crear Juego ", "Crear")
        };
        let id = if self.id.is_empty() { "—" } else { self.id.as_str() };

        let content = vec![
            Line::from(""),
            readonly_line("Identificador", id),
            field_line(self.title.label, &self.title.value, self.focus == GameField::Title, false),
            field_line(
                self.categories.label,
                &self.categories.display(),
                self.focus == GameField::Category,
                true,
            ),
            field_line(
                self.authors.label,
                &self.authors.display(),
                self.focus == GameField::Author,
                true,
            ),
            Line::from(""),
            buttons_line(button, self.submission().is_some()),
        ];

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(heading)
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
