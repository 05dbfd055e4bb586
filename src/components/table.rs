//! Shared table rendering for the page views
//!
//! Renders headers, rows and an optional pagination footer. Column widths
//! are measured in terminal cells so accented names line up.

use crate::model::PageRequest;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a column may grow before its cells get truncated
const MAX_COLUMN_WIDTH: usize = 40;

// ═══════════════════════════════════════════════════════════════════════════════
// Row Selection
// ═══════════════════════════════════════════════════════════════════════════════

/// Highlighted row of a table, kept inside the current row count
#[derive(Debug, Default)]
pub struct RowSelection {
    state: TableState,
    len: usize,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the row count, clamping the selection into range
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        let selected = match (len, self.state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (_, Some(i)) => Some(i.min(len - 1)),
        };
        self.state.select(selected);
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn next(&mut self) {
        if let Some(i) = self.state.selected() {
            if i + 1 < self.len {
                self.state.select(Some(i + 1));
            }
        }
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.state.selected() {
            self.state.select(Some(i.saturating_sub(1)));
        }
    }

    pub fn first(&mut self) {
        if self.len > 0 {
            self.state.select(Some(0));
        }
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.state.select(Some(self.len - 1));
        }
    }

    fn state_mut(&mut self) -> &mut TableState {
        &mut self.state
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Cell Sizing
// ═══════════════════════════════════════════════════════════════════════════════

/// Display width of every column: the widest of header and cells, capped
pub fn column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.width());
            }
        }
    }
    widths.into_iter().map(|w| w.min(MAX_COLUMN_WIDTH)).collect()
}

/// Cut `text` to at most `width` terminal cells, marking the cut with "…"
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Footer line in the style "Filas por página: 5   1–5 de 12"
pub fn pagination_footer(page: &PageRequest, total: u64) -> Line<'static> {
    Line::from(vec![
        Span::styled(" Filas por página: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            page.page_size.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(page.range_label(total), Style::default().fg(Color::White)),
        Span::styled(
            format!("   página {}/{}", page.page_number + 1, page.page_count(total)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

// ═══════════════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything a page view hands over to get its table drawn
pub struct TableView<'a> {
    pub title: String,
    pub headers: &'a [&'a str],
    pub rows: Vec<Vec<String>>,
    /// Lines rendered above the table (active filters)
    pub header_lines: Vec<Line<'static>>,
    pub footer: Option<Line<'static>>,
}

pub fn draw_table(frame: &mut Frame, area: Rect, view: TableView, selection: &mut RowSelection) {
    let mut constraints = Vec::new();
    if !view.header_lines.is_empty() {
        constraints.push(Constraint::Length(view.header_lines.len() as u16));
    }
    constraints.push(Constraint::Min(3));
    if view.footer.is_some() {
        constraints.push(Constraint::Length(1));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut idx = 0;
    if !view.header_lines.is_empty() {
        frame.render_widget(Paragraph::new(view.header_lines), chunks[idx]);
        idx += 1;
    }
    let table_area = chunks[idx];

    let widths = column_widths(view.headers, &view.rows);
    let header = Row::new(view.headers.iter().map(|h| {
        Cell::from(h.to_string()).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    }))
    .style(Style::default().bg(Color::Black))
    .bottom_margin(0);

    let rows: Vec<Row> = if view.rows.is_empty() {
        vec![Row::new(vec![Cell::from(Span::styled(
            "Sin resultados",
            Style::default().fg(Color::DarkGray),
        ))])]
    } else {
        view.rows
            .iter()
            .map(|row| {
                Row::new(
                    row.iter()
                        .enumerate()
                        .map(|(i, cell)| {
                            let width = widths.get(i).copied().unwrap_or(MAX_COLUMN_WIDTH);
                            Cell::from(truncate(cell, width))
                        }),
                )
                .style(Style::default().fg(Color::White))
            })
            .collect()
    };

    let constraints: Vec<Constraint> = widths
        .iter()
        .map(|w| Constraint::Length(*w as u16))
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view.title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, table_area, selection.state_mut());

    if let Some(footer) = view.footer {
        frame.render_widget(Paragraph::new(footer), chunks[idx + 1]);
    }
}
