//! Game list view, filtered by title and category

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{draw_table, RowSelection, TableView};
use crate::components::view::{filter_summary, name_or_dash, navigate, ResourceView};
use crate::model::{Author, Category, Game, GameFilter, QueryData, QueryKey, Resource};
use crate::services::QueryCache;
use anyhow::Result;
use ratatui::{layout::Rect, Frame};

const HEADERS: [&str; 4] = ["Identificador", "Título", "Categoría", "Autor"];

#[derive(Default)]
pub struct GamesView {
    filter: GameFilter,
    rows: Vec<Game>,
    categories: Vec<Category>,
    authors: Vec<Author>,
    selection: RowSelection,
}

impl GamesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> &GameFilter {
        &self.filter
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn selected_game(&self) -> Option<&Game> {
        self.selection.selected().and_then(|i| self.rows.get(i))
    }

    fn games_key(&self) -> QueryKey {
        QueryKey::Games(self.filter.clone())
    }
}

impl ResourceView for GamesView {
    fn resource(&self) -> Resource {
        Resource::Game
    }

    fn subscriptions(&self) -> Vec<QueryKey> {
        vec![self.games_key(), QueryKey::Categories, QueryKey::AllAuthors]
    }

    fn sync(&mut self, cache: &QueryCache) {
        if let Some(games) = cache.get(&self.games_key()).and_then(QueryData::games) {
            self.rows = games.to_vec();
        }
        if let Some(categories) = cache.get(&QueryKey::Categories).and_then(QueryData::categories) {
            self.categories = categories.to_vec();
        }
        if let Some(authors) = cache.get(&QueryKey::AllAuthors).and_then(QueryData::authors) {
            self.authors = authors.to_vec();
        }
        self.selection.set_len(self.rows.len());
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_game().map(|g| g.id.clone())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn has_filters(&self) -> bool {
        true
    }
}

impl Component for GamesView {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if navigate(&mut self.selection, &action) {
            return Ok(None);
        }
        match action {
            Action::ApplyGameFilter(filter) => self.filter = filter,
            Action::ClearFilters => self.filter = GameFilter::default(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let title = Some(self.filter.title.clone()).filter(|t| !t.is_empty());
        let category = self.filter.category_id.as_deref().map(|id| {
            self.categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| id.to_string())
        });

        let rows = self
            .rows
            .iter()
            .map(|game| {
                vec![
                    game.id.clone(),
                    game.title.clone(),
                    name_or_dash(game.category.as_ref().map(|c| c.name.as_str())),
                    name_or_dash(game.author.as_ref().map(|a| a.name.as_str())),
                ]
            })
            .collect();

        let view = TableView {
            title: format!(" Juegos ({}) ", self.rows.len()),
            headers: &HEADERS,
            rows,
            header_lines: vec![filter_summary(&[("Título", title), ("Categoría", category)])],
            footer: None,
        };
        draw_table(frame, area, view, &mut self.selection);
        Ok(())
    }
}
