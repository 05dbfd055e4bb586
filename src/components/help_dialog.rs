//! Help dialog component
//!
//! Lists every keyboard shortcut of the admin screens.

use crate::action::Action;
use crate::component::Component;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        // Clear the area
        frame.render_widget(Clear, area);

        let margin = 4;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let content = build_help_content();
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Atajos de teclado ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        // Render scrollbar if content exceeds visible area
        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Build the help content with all keyboard shortcuts
fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    // Helper to add a section header
    let add_section = |lines: &mut Vec<Line<'static>>, title: &str| {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.chars().count() + 2)),
            Style::default().fg(Color::DarkGray),
        )));
    };

    // Helper to add a shortcut line
    let add_shortcut = |lines: &mut Vec<Line<'static>>, key: &str, description: &str| {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:12}", key),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(description.to_string(), Style::default().fg(Color::White)),
        ]));
    };

    add_section(&mut lines, "Navegación");
    add_shortcut(&mut lines, "j / ↓", "Fila siguiente");
    add_shortcut(&mut lines, "k / ↑", "Fila anterior");
    add_shortcut(&mut lines, "g", "Primera fila");
    add_shortcut(&mut lines, "G", "Última fila");
    add_shortcut(&mut lines, "Tab", "Vista siguiente (Juegos/Categorías/...)");
    add_shortcut(&mut lines, "Shift+Tab", "Vista anterior");

    add_section(&mut lines, "Paginación (Autores, Préstamos)");
    add_shortcut(&mut lines, "l / →", "Página siguiente");
    add_shortcut(&mut lines, "h / ←", "Página anterior");
    add_shortcut(&mut lines, "s", "Cambiar filas por página (5/10/25)");

    add_section(&mut lines, "Registros");
    add_shortcut(&mut lines, "n", "Crear");
    add_shortcut(&mut lines, "e / Enter", "Modificar la fila seleccionada");
    add_shortcut(&mut lines, "d", "Eliminar la fila seleccionada");

    add_section(&mut lines, "Filtros (Juegos, Préstamos)");
    add_shortcut(&mut lines, "f", "Abrir filtros");
    add_shortcut(&mut lines, "c", "Limpiar filtros");

    add_section(&mut lines, "Diálogos");
    add_shortcut(&mut lines, "Tab / ↑↓", "Cambiar de campo");
    add_shortcut(&mut lines, "← / →", "Elegir opción");
    add_shortcut(&mut lines, "Supr", "Limpiar campo (filtros)");
    add_shortcut(&mut lines, "Enter", "Confirmar");
    add_shortcut(&mut lines, "Esc", "Cancelar");

    add_section(&mut lines, "General");
    add_shortcut(&mut lines, "R", "Recargar la vista");
    add_shortcut(&mut lines, "x", "Descartar notificación");
    add_shortcut(&mut lines, "?", "Mostrar esta ayuda");
    add_shortcut(&mut lines, "q", "Salir");
    add_shortcut(&mut lines, "Ctrl+c", "Salir sin confirmar");

    // Footer
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Pulse q, Esc o ? para cerrar",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}
