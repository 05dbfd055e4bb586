//! Author list view, paginated server side

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{draw_table, pagination_footer, RowSelection, TableView};
use crate::components::view::{navigate, ResourceView};
use crate::model::{Author, PageRequest, QueryData, QueryKey, Resource};
use crate::services::QueryCache;
use anyhow::Result;
use ratatui::{layout::Rect, Frame};

const HEADERS: [&str; 2] = ["Identificador", "Nombre"];

pub struct AuthorsView {
    page: PageRequest,
    rows: Vec<Author>,
    total: u64,
    selection: RowSelection,
}

impl AuthorsView {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: PageRequest::with_size(page_size),
            rows: Vec::new(),
            total: 0,
            selection: RowSelection::new(),
        }
    }

    #[cfg(test)]
    pub fn page(&self) -> &PageRequest {
        &self.page
    }

    pub fn selected_author(&self) -> Option<&Author> {
        self.selection.selected().and_then(|i| self.rows.get(i))
    }
}

impl ResourceView for AuthorsView {
    fn resource(&self) -> Resource {
        Resource::Author
    }

    fn subscriptions(&self) -> Vec<QueryKey> {
        vec![QueryKey::AuthorsPage(self.page)]
    }

    fn sync(&mut self, cache: &QueryCache) {
        if let Some(page) = cache
            .get(&QueryKey::AuthorsPage(self.page))
            .and_then(QueryData::author_page)
        {
            self.rows = page.content.clone();
            self.total = page.total_elements;
            let last = self.page.page_count(self.total) - 1;
            if self.page.page_number > last {
                self.page.page_number = last;
            }
        }
        self.selection.set_len(self.rows.len());
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_author().map(|a| a.id.clone())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn is_paginated(&self) -> bool {
        true
    }
}

impl Component for AuthorsView {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if navigate(&mut self.selection, &action) {
            return Ok(None);
        }
        match action {
            Action::NextPage => self.page.next(self.total),
            Action::PrevPage => self.page.previous(),
            Action::CyclePageSize => self.page.cycle_page_size(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = self
            .rows
            .iter()
            .map(|a| vec![a.id.clone(), a.name.clone()])
            .collect();
        let view = TableView {
            title: format!(" Autores ({}) ", self.total),
            headers: &HEADERS,
            rows,
            header_lines: Vec::new(),
            footer: Some(pagination_footer(&self.page, self.total)),
        };
        draw_table(frame, area, view, &mut self.selection);
        Ok(())
    }
}
