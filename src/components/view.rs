//! Shared shape of the five page views
//!
//! A page view owns its filter and paging state, names the queries it
//! subscribes to, and copies their cached results into its rows on every
//! sync. Views never talk to the backend themselves.

use crate::action::Action;
use crate::component::Component;
use crate::components::table::RowSelection;
use crate::model::{QueryKey, Resource};
use crate::services::QueryCache;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub trait ResourceView: Component {
    fn resource(&self) -> Resource;

    /// Query keys this view currently reads
    fn subscriptions(&self) -> Vec<QueryKey>;

    /// Pull the latest cached results into the view. Rows are only
    /// replaced once data for the current key is cached.
    fn sync(&mut self, cache: &QueryCache);

    /// Id of the highlighted row
    fn selected_id(&self) -> Option<String>;

    fn row_count(&self) -> usize;

    fn is_paginated(&self) -> bool {
        false
    }

    fn has_filters(&self) -> bool {
        false
    }
}

/// Apply a row navigation action; returns whether it was one
pub fn navigate(selection: &mut RowSelection, action: &Action) -> bool {
    match action {
        Action::NextItem => selection.next(),
        Action::PrevItem => selection.previous(),
        Action::FirstItem => selection.first(),
        Action::LastItem => selection.last(),
        _ => return false,
    }
    true
}

/// "Filtros: Juego=Catan  Cliente=—" line shown above filtered tables
pub fn filter_summary(filters: &[(&str, Option<String>)]) -> Line<'static> {
    let mut spans = vec![Span::styled(
        " Filtros: ",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )];
    for (label, value) in filters {
        spans.push(Span::styled(format!("{}=", label), Style::default().fg(Color::DarkGray)));
        match value {
            Some(value) => spans.push(Span::styled(
                value.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            None => spans.push(Span::styled("—", Style::default().fg(Color::DarkGray))),
        }
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled("(f filtrar, c limpiar)", Style::default().fg(Color::DarkGray)));
    Line::from(spans)
}

/// Display name of a reference, or "—"
pub fn name_or_dash(name: Option<&str>) -> String {
    name.filter(|n| !n.is_empty()).unwrap_or("—").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigate() {
        let mut selection = RowSelection::new();
        selection.set_len(3);
        assert!(navigate(&mut selection, &Action::LastItem));
        assert_eq!(selection.selected(), Some(2));
        assert!(navigate(&mut selection, &Action::PrevItem));
        assert_eq!(selection.selected(), Some(1));
        assert!(!navigate(&mut selection, &Action::NextPage));
    }

    #[test]
    fn test_filter_summary_text() {
        let line = filter_summary(&[("Juego", Some("Catan".to_string())), ("Cliente", None)]);
        let text = line.to_string();
        assert!(text.contains("Juego=Catan"));
        assert!(text.contains("Cliente=—"));
    }
}
