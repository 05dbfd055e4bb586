//! Delete confirmation dialog

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::Resource;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub struct ConfirmDialog {
    resource: Resource,
    id: String,
}

impl Default for ConfirmDialog {
    fn default() -> Self {
        Self {
            resource: Resource::Loan,
            id: String::new(),
        }
    }
}

impl ConfirmDialog {
    pub fn open(&mut self, resource: Resource, id: &str) {
        self.resource = resource;
        self.id = id.to_string();
    }

    pub fn title(&self) -> String {
        format!("Eliminar {}", self.resource.singular())
    }

    pub fn text(&self) -> String {
        let target = self.resource.with_article();
        format!(
            "Atención si borra {} se perderán sus datos. ¿Desea eliminar {}?",
            target, target
        )
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('y') | KeyCode::Enter => {
                Some(Action::ConfirmDelete)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let popup_area = centered_popup(area, 56, 9);
        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.text(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Identificador: {}", self.id),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " s/Enter ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Eliminar  "),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
                Span::raw("Cancelar"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(format!(" {} ", self.title()))
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
