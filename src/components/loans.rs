//! Loan list view
//!
//! Paginated and filtered by game, client and date. Also keeps the full
//! game and client lists for the filter selectors and the creation dialog.

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{draw_table, pagination_footer, RowSelection, TableView};
use crate::components::view::{filter_summary, name_or_dash, navigate, ResourceView};
use crate::model::{Client, Game, Loan, LoanFilter, LoanQuery, PageRequest, QueryData, QueryKey, Resource};
use crate::services::QueryCache;
use anyhow::Result;
use ratatui::{layout::Rect, Frame};

const HEADERS: [&str; 5] = ["Identificador", "Juego", "Cliente", "Fecha Inicio", "Fecha Fin"];
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

pub struct LoansView {
    query: LoanQuery,
    rows: Vec<Loan>,
    total: u64,
    games: Vec<Game>,
    clients: Vec<Client>,
    selection: RowSelection,
}

impl LoansView {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: LoanQuery {
                page: PageRequest::with_size(page_size),
                filter: LoanFilter::default(),
            },
            rows: Vec::new(),
            total: 0,
            games: Vec::new(),
            clients: Vec::new(),
            selection: RowSelection::new(),
        }
    }

    #[cfg(test)]
    pub fn query(&self) -> &LoanQuery {
        &self.query
    }

    pub fn filter(&self) -> &LoanFilter {
        &self.query.filter
    }

    #[cfg(test)]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[Loan] {
        &self.rows
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    fn loans_key(&self) -> QueryKey {
        QueryKey::Loans(self.query.clone())
    }

    /// Replace the filters; always goes back to the first page
    pub fn apply_filter(&mut self, filter: LoanFilter) {
        self.query.filter = filter;
        self.query.page.page_number = 0;
    }

    /// "Limpiar": drop every filter and go back to the first page
    pub fn clear_filters(&mut self) {
        self.query.filter.clear();
        self.query.page.page_number = 0;
    }

    fn game_title(&self, id: &str) -> Option<String> {
        self.games.iter().find(|g| g.id == id).map(|g| g.title.clone())
    }

    fn client_name(&self, id: &str) -> Option<String> {
        self.clients.iter().find(|c| c.id == id).map(|c| c.name.clone())
    }

    fn table_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|loan| {
                vec![
                    loan.id.clone(),
                    name_or_dash(loan.game.as_ref().map(|g| g.title.as_str())),
                    name_or_dash(loan.client.as_ref().map(|c| c.name.as_str())),
                    loan.start_date.format(DISPLAY_DATE_FORMAT).to_string(),
                    loan.end_date.format(DISPLAY_DATE_FORMAT).to_string(),
                ]
            })
            .collect()
    }
}

impl ResourceView for LoansView {
    fn resource(&self) -> Resource {
        Resource::Loan
    }

    fn subscriptions(&self) -> Vec<QueryKey> {
        vec![self.loans_key(), QueryKey::AllGames, QueryKey::Clients]
    }

    fn sync(&mut self, cache: &QueryCache) {
        if let Some(page) = cache.get(&self.loans_key()).and_then(QueryData::loan_page) {
            self.rows = page.content.clone();
            self.total = page.total_elements;

            // A delete can leave us past the last page
            let last = self.query.page.page_count(self.total) - 1;
            if self.query.page.page_number > last {
                self.query.page.page_number = last;
            }
        }
        if let Some(games) = cache.get(&QueryKey::AllGames).and_then(QueryData::games) {
            self.games = games.to_vec();
        }
        if let Some(clients) = cache.get(&QueryKey::Clients).and_then(QueryData::clients) {
            self.clients = clients.to_vec();
        }
        self.selection.set_len(self.rows.len());
    }

    fn selected_id(&self) -> Option<String> {
        self.selection
            .selected()
            .and_then(|i| self.rows.get(i))
            .map(|loan| loan.id.clone())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn is_paginated(&self) -> bool {
        true
    }

    fn has_filters(&self) -> bool {
        true
    }
}

impl Component for LoansView {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if navigate(&mut self.selection, &action) {
            return Ok(None);
        }
        match action {
            Action::NextPage => self.query.page.next(self.total),
            Action::PrevPage => self.query.page.previous(),
            Action::CyclePageSize => self.query.page.cycle_page_size(),
            Action::ClearFilters => self.clear_filters(),
            Action::ApplyLoanFilter(filter) => self.apply_filter(filter),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let filter = &self.query.filter;
        let summary = filter_summary(&[
            (
                "Juego",
                filter
                    .game_id
                    .as_deref()
                    .map(|id| self.game_title(id).unwrap_or_else(|| id.to_string())),
            ),
            (
                "Cliente",
                filter
                    .client_id
                    .as_deref()
                    .map(|id| self.client_name(id).unwrap_or_else(|| id.to_string())),
            ),
            ("Fecha", filter.date.map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())),
        ]);

        let view = TableView {
            title: format!(" Préstamos ({}) ", self.total),
            headers: &HEADERS,
            rows: self.table_rows(),
            header_lines: vec![summary],
            footer: Some(pagination_footer(&self.query.page, self.total)),
        };
        draw_table(frame, area, view, &mut self.selection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;
    use chrono::NaiveDate;
    use rstest::rstest;
    use std::time::{Duration, Instant};

    fn loan(id: &str) -> Loan {
        Loan {
            id: id.to_string(),
            game: Some(Game { id: "G1".to_string(), title: "Catan".to_string(), ..Game::default() }),
            client: Some(Client { id: "C1".to_string(), name: "Ana".to_string() }),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        }
    }

    fn cache_with(view: &LoansView, loans: Vec<Loan>, total: u64) -> QueryCache {
        let mut cache = QueryCache::new(Duration::from_secs(60));
        let page = Page { content: loans, total_elements: total };
        cache.store(view.loans_key(), 0, Ok(QueryData::LoanPage(page)), Instant::now());
        cache
    }

    #[test]
    fn test_sync_copies_cached_page() {
        let mut view = LoansView::new(5);
        let cache = cache_with(&view, vec![loan("1"), loan("2")], 2);
        view.sync(&cache);

        assert_eq!(view.row_count(), 2);
        assert_eq!(view.total(), 2);
        assert_eq!(view.selected_id(), Some("1".to_string()));
        view.update(Action::NextItem).unwrap();
        assert_eq!(view.selected_id(), Some("2".to_string()));
    }

    #[test]
    fn test_rows_kept_while_new_key_loads() {
        let mut view = LoansView::new(5);
        let cache = cache_with(&view, vec![loan("1")], 1);
        view.sync(&cache);

        view.update(Action::CyclePageSize).unwrap();
        view.sync(&cache);
        assert_eq!(view.row_count(), 1);
    }

    #[test]
    fn test_clear_filters_resets_everything() {
        let mut view = LoansView::new(5);
        view.total = 30;
        view.update(Action::ApplyLoanFilter(LoanFilter {
            game_id: Some("G1".to_string()),
            client_id: Some("C1".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 1, 3),
        }))
        .unwrap();
        view.update(Action::NextPage).unwrap();
        assert_eq!(view.query().page.page_number, 1);

        view.update(Action::ClearFilters).unwrap();
        assert!(view.filter().is_empty());
        assert_eq!(view.query().page.page_number, 0);
        match &view.subscriptions()[0] {
            QueryKey::Loans(query) => assert!(query.filter.query_params().is_empty()),
            other => panic!("unexpected key {:?}", other),
        }
    }

    #[test]
    fn test_apply_filter_resets_page() {
        let mut view = LoansView::new(5);
        view.total = 30;
        view.update(Action::NextPage).unwrap();
        view.update(Action::ApplyLoanFilter(LoanFilter {
            client_id: Some("C2".to_string()),
            ..LoanFilter::default()
        }))
        .unwrap();
        assert_eq!(view.query().page.page_number, 0);
        assert_eq!(view.filter().client_id.as_deref(), Some("C2"));
    }

    #[rstest]
    #[case(5, 0)]
    #[case(10, 2)]
    #[case(25, 1)]
    fn test_page_passes_through_to_key(#[case] size: u32, #[case] page_number: u32) {
        let mut view = LoansView::new(size);
        view.total = 100;
        for _ in 0..page_number {
            view.update(Action::NextPage).unwrap();
        }
        match &view.subscriptions()[0] {
            QueryKey::Loans(query) => {
                assert_eq!(query.page, PageRequest { page_number, page_size: size });
            }
            other => panic!("unexpected key {:?}", other),
        }
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut view = LoansView::new(5);
        view.total = 100;
        view.update(Action::NextPage).unwrap();
        view.update(Action::CyclePageSize).unwrap();
        assert_eq!(view.query().page, PageRequest { page_number: 0, page_size: 10 });
    }

    #[test]
    fn test_page_clamped_after_rows_disappear() {
        let mut view = LoansView::new(5);
        view.total = 6;
        view.update(Action::NextPage).unwrap();
        let cache = cache_with(&view, Vec::new(), 5);
        view.sync(&cache);
        assert_eq!(view.query().page.page_number, 0);
    }
}
