//! Form fields shared by the dialogs
//!
//! Selects cycle through a list of records with ←/→; text fields take
//! typed characters. Neither does any I/O.

use crate::model::Named;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Pick one record out of a list, or none
#[derive(Debug, Clone)]
pub struct SelectField<T> {
    pub label: &'static str,
    options: Vec<T>,
    selected: Option<usize>,
}

impl<T: Named + Clone> SelectField<T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            options: Vec::new(),
            selected: None,
        }
    }

    /// Replace the options, keeping the current choice when it is still offered
    pub fn set_options(&mut self, options: Vec<T>) {
        let current = self.selected_id().map(str::to_string);
        self.options = options;
        self.selected = current.and_then(|id| self.options.iter().position(|o| o.id() == id));
    }

    pub fn select_id(&mut self, id: Option<&str>) {
        self.selected = id.and_then(|id| self.options.iter().position(|o| o.id() == id));
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|i| self.options.get(i))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|o| o.id())
    }

    /// Next option; from "none" this picks the first one
    pub fn next(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.selected = Some(match self.selected {
            None => 0,
            Some(i) => (i + 1) % self.options.len(),
        });
    }

    pub fn previous(&mut self) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        self.selected = Some(match self.selected {
            None => len - 1,
            Some(i) => (i + len - 1) % len,
        });
    }

    pub fn display(&self) -> String {
        match self.selected() {
            Some(option) => option.name().to_string(),
            None if self.options.is_empty() => "(sin opciones)".to_string(),
            None => "—".to_string(),
        }
    }
}

/// Single-line text input
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
        }
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn input(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Render one labelled field line. Selects show ◀ ▶ hints, the focused
/// field gets a cursor.
pub fn field_line(label: &str, value: &str, focused: bool, is_select: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if focused {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let marker = if focused { "▶ " } else { "  " };
    let mut spans = vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:18}", label), label_style),
    ];
    if is_select {
        spans.push(Span::styled("◀ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(value.to_string(), value_style));
        spans.push(Span::styled(" ▶", Style::default().fg(Color::DarkGray)));
    } else {
        spans.push(Span::styled(value.to_string(), value_style));
        if focused {
            spans.push(Span::styled("_", Style::default().fg(Color::Cyan)));
        }
    }
    Line::from(spans)
}

/// Read-only field line (e.g. the record id)
pub fn readonly_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:18}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), Style::default().fg(Color::DarkGray)),
    ])
}

/// Button row: the primary button is dimmed while disabled
pub fn buttons_line(primary: &str, enabled: bool) -> Line<'static> {
    let primary_style = if enabled {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    };
    Line::from(vec![
        Span::styled(" Esc ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw("Cancelar   "),
        Span::styled(" Enter ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {} ", primary), primary_style),
    ])
}
