//! Application shell: tab bar, status line and help bar around the active
//! page view

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{calculate_main_layout, MainLayout};
use crate::model::notification::NotificationKind;
use crate::model::{Tab, UiContext};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Characters used for the loading animation
const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

#[derive(Default)]
pub struct ShellComponent {
    pub active_tab: Tab,
    spinner_frame: usize,
}

/// What the shell needs from the App to draw its bars
pub struct ShellRenderContext<'a> {
    pub ui: &'a UiContext,
    pub paginated: bool,
    pub filterable: bool,
    /// Edit and delete hints only show when there is a row to act on
    pub has_rows: bool,
}

impl ShellComponent {
    pub fn new() -> Self {
        Self::default()
    }

    fn spinner(&self) -> char {
        SPINNER_CHARS[self.spinner_frame % SPINNER_CHARS.len()]
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for ShellComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') => Some(Action::FirstItem),
            KeyCode::Char('G') => Some(Action::LastItem),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),

            // Pagination
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextPage),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevPage),
            KeyCode::Char('s') => Some(Action::CyclePageSize),

            // Records
            KeyCode::Char('n') => Some(Action::OpenCreate),
            KeyCode::Char('e') | KeyCode::Enter => Some(Action::OpenEdit),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::OpenDelete),

            // Filters
            KeyCode::Char('f') => Some(Action::OpenFilter),
            KeyCode::Char('c') => Some(Action::ClearFilters),

            KeyCode::Char('R') => Some(Action::Refresh),
            KeyCode::Char('x') => Some(Action::DismissNotification),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => self.spinner_frame = self.spinner_frame.wrapping_add(1),
            Action::NextTab => self.active_tab = self.active_tab.next(),
            Action::PrevTab => self.active_tab = self.active_tab.previous(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Rendering is handled by draw_shell with the App's context
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Draw the bars and return the layout; the caller renders the page view
/// into `layout.content`
pub fn draw_shell(
    frame: &mut Frame,
    area: Rect,
    shell: &ShellComponent,
    ctx: &ShellRenderContext,
) -> MainLayout {
    let layout = calculate_main_layout(area);
    render_tabs(frame, layout.tabs, shell);
    render_status_bar(frame, layout.status, shell, ctx.ui);
    render_help_bar(frame, layout.help, ctx);
    layout
}

fn render_tabs(frame: &mut Frame, area: Rect, shell: &ShellComponent) {
    let all_tabs = Tab::all();
    let titles: Vec<&str> = all_tabs.iter().map(|t| t.name()).collect();
    let selected = all_tabs
        .iter()
        .position(|t| *t == shell.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::BOTTOM))
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, shell: &ShellComponent, ui: &UiContext) {
    let mut spans = vec![Span::styled(
        " Ludoteca ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(" "));

    if ui.is_loading() {
        spans.push(Span::styled(
            format!("{} Cargando… ", shell.spinner()),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(notification) = ui.notifications.current() {
        let color = match notification.kind {
            NotificationKind::Ok => Color::Green,
            NotificationKind::Error => Color::Red,
        };
        spans.push(Span::styled(
            format!(" {} ", notification.text),
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ));
        let queued = ui.notifications.len().saturating_sub(1);
        if queued > 0 {
            spans.push(Span::styled(
                format!(" +{}", queued),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn help_key(key: &'static str, color: Color) -> Span<'static> {
    Span::styled(key, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn render_help_bar(frame: &mut Frame, area: Rect, ctx: &ShellRenderContext) {
    frame.render_widget(Paragraph::new(help_bar_line(ctx)), area);
}

fn help_bar_line(ctx: &ShellRenderContext) -> Line<'static> {
    let mut spans = vec![
        help_key(" q ", Color::Yellow),
        Span::raw("Salir "),
        help_key(" n ", Color::Green),
        Span::raw("Nuevo "),
    ];
    if ctx.has_rows {
        spans.push(help_key(" e ", Color::Cyan));
        spans.push(Span::raw("Modificar "));
        spans.push(help_key(" d ", Color::Red));
        spans.push(Span::raw("Eliminar "));
    }
    if ctx.filterable {
        spans.push(help_key(" f ", Color::Magenta));
        spans.push(Span::raw("Filtrar "));
        spans.push(help_key(" c ", Color::Magenta));
        spans.push(Span::raw("Limpiar "));
    }
    if ctx.paginated {
        spans.push(help_key(" ←/→ ", Color::Cyan));
        spans.push(Span::raw("Página "));
        spans.push(help_key(" s ", Color::Cyan));
        spans.push(Span::raw("Filas "));
    }
    spans.push(help_key(" R ", Color::White));
    spans.push(Span::raw("Recargar "));
    spans.push(help_key(" ? ", Color::White));
    spans.push(Span::raw("Ayuda "));
    Line::from(spans)
}
