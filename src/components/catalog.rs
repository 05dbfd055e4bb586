//! Plain id + name list view, used for categories and clients

use crate::action::Action;
use crate::component::Component;
use crate::components::table::{draw_table, RowSelection, TableView};
use crate::components::view::{navigate, ResourceView};
use crate::model::{Category, Client, Named, QueryData, QueryKey, Resource};
use crate::services::QueryCache;
use anyhow::Result;
use ratatui::{layout::Rect, Frame};

const HEADERS: [&str; 2] = ["Identificador", "Nombre"];

pub struct CatalogView<T> {
    resource: Resource,
    title: &'static str,
    key: QueryKey,
    extract: fn(&QueryData) -> Option<&[T]>,
    rows: Vec<T>,
    selection: RowSelection,
}

impl CatalogView<Category> {
    pub fn categories() -> Self {
        Self::new(Resource::Category, "Categorías", QueryKey::Categories, QueryData::categories)
    }
}

impl CatalogView<Client> {
    pub fn clients() -> Self {
        Self::new(Resource::Client, "Clientes", QueryKey::Clients, QueryData::clients)
    }
}

impl<T: Named + Clone> CatalogView<T> {
    fn new(
        resource: Resource,
        title: &'static str,
        key: QueryKey,
        extract: fn(&QueryData) -> Option<&[T]>,
    ) -> Self {
        Self {
            resource,
            title,
            key,
            extract,
            rows: Vec::new(),
            selection: RowSelection::new(),
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.selection.selected().and_then(|i| self.rows.get(i))
    }
}

impl<T: Named + Clone> ResourceView for CatalogView<T> {
    fn resource(&self) -> Resource {
        self.resource
    }

    fn subscriptions(&self) -> Vec<QueryKey> {
        vec![self.key.clone()]
    }

    fn sync(&mut self, cache: &QueryCache) {
        if let Some(items) = cache.get(&self.key).and_then(self.extract) {
            self.rows = items.to_vec();
        }
        self.selection.set_len(self.rows.len());
    }

    fn selected_id(&self) -> Option<String> {
        self.selected().map(|r| r.id().to_string())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

}

impl<T: Named + Clone> Component for CatalogView<T> {
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        navigate(&mut self.selection, &action);
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let rows = self
            .rows
            .iter()
            .map(|r| vec![r.id().to_string(), r.name().to_string()])
            .collect();
        let view = TableView {
            title: format!(" {} ({}) ", self.title, self.rows.len()),
            headers: &HEADERS,
            rows,
            header_lines: Vec::new(),
            footer: None,
        };
        draw_table(frame, area, view, &mut self.selection);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_clients_view_reads_its_key_only() {
        let mut view = CatalogView::clients();
        assert_eq!(view.resource(), Resource::Client);
        assert_eq!(view.subscriptions(), vec![QueryKey::Clients]);

        let mut cache = QueryCache::new(Duration::from_secs(60));
        let now = Instant::now();
        cache.store(
            QueryKey::Categories,
            0,
            Ok(QueryData::Categories(vec![Category { id: "1".to_string(), name: "Eurogames".to_string() }])),
            now,
        );
        view.sync(&cache);
        assert_eq!(view.row_count(), 0);

        cache.store(
            QueryKey::Clients,
            0,
            Ok(QueryData::Clients(vec![
                Client { id: "C1".to_string(), name: "Ana".to_string() },
                Client { id: "C2".to_string(), name: "Luis".to_string() },
            ])),
            now,
        );
        view.sync(&cache);
        view.update(Action::LastItem).unwrap();
        assert_eq!(view.selected_id(), Some("C2".to_string()));
        assert_eq!(view.selected().map(|c| c.name.as_str()), Some("Luis"));
    }
}
