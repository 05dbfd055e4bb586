//! Create/edit dialog for records that only carry a name

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::components::form::{buttons_line, field_line, readonly_line, TextField};
use crate::model::Resource;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub struct NameDialog {
    resource: Resource,
    id: String,
    name: TextField,
}

impl Default for NameDialog {
    fn default() -> Self {
        Self {
            resource: Resource::Category,
            id: String::new(),
            name: TextField::new("Nombre"),
        }
    }
}

impl NameDialog {
    pub fn open(&mut self, resource: Resource, id: &str, name: &str) {
        self.resource = resource;
        self.id = id.to_string();
        self.name = TextField::new("Nombre");
        self.name.set(name);
    }
}

impl Component for NameDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter if !self.name.is_blank() => Some(Action::SaveNamed {
                resource: self.resource,
                id: self.id.clone(),
                name: self.name.value.trim().to_string(),
            }),
            KeyCode::Backspace => {
                self.name.backspace();
                None
            }
            KeyCode::Char(c) => {
                self.name.input(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 56, 8);
        frame.render_widget(Clear, popup_area);

        let (verb, button) = if self.id.is_empty() {
            ("Crear", "Crear")
        } else {
            ("Modificar", "Guardar")
        };
        let id = if self.id.is_empty() { "—" } else { self.id.as_str() };

        let content = vec![
            Line::from(""),
            readonly_line("Identificador", id),
            field_line(self.name.label, &self.name.value, true, false),
            Line::from(""),
            buttons_line(button, !self.name.is_blank()),
        ];

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" {} {} ", verb, self.resource.singular()))
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
