//! Quit confirmation

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct QuitDialog {
    /// A save or delete had not been answered when the dialog opened
    pending_changes: bool,
}

impl QuitDialog {
    pub fn open(&mut self, pending_changes: bool) {
        self.pending_changes = pending_changes;
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "¿Seguro que quiere salir?",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
        ];
        if self.pending_changes {
            lines.push(Line::from(Span::styled(
                "Hay cambios enviándose al servidor",
                Style::default().fg(Color::Red),
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" s ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw("Sí, salir  "),
            Span::styled(" n/Esc ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw("No"),
        ]));
        lines
    }
}

impl Component for QuitDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('s' | 'S' | 'y' | 'Y') => Some(Action::ForceQuit),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let lines = self.lines();
        let popup_area = centered_popup(area, 44, lines.len() as u16 + 2);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Salir ")
            .title_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(
            Paragraph::new(lines).block(block).alignment(Alignment::Center),
            popup_area,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn text(dialog: &QuitDialog) -> String {
        dialog
            .lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect()
    }

    #[test]
    fn test_warns_about_unanswered_changes() {
        let mut dialog = QuitDialog::default();
        dialog.open(false);
        assert!(!text(&dialog).contains("cambios"));
        dialog.open(true);
        assert!(text(&dialog).contains("Hay cambios enviándose al servidor"));
    }

    #[test]
    fn test_keys() {
        let mut dialog = QuitDialog::default();
        let yes = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        let no = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        let other = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(yes).unwrap(), Some(Action::ForceQuit));
        assert_eq!(dialog.handle_key_event(no).unwrap(), Some(Action::CloseModal));
        assert_eq!(dialog.handle_key_event(other).unwrap(), None);
    }
}
