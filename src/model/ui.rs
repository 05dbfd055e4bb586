//! UI state - presentation state separate from domain data

use super::entity::Resource;

/// Tab selection in the main UI, one per page view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Games,
    Categories,
    Authors,
    Clients,
    Loans,
}

impl Tab {
    pub fn all() -> Vec<Tab> {
        vec![
            Tab::Games,
            Tab::Categories,
            Tab::Authors,
            Tab::Clients,
            Tab::Loans,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            Tab::Games => "Juegos",
            Tab::Categories => "Categorías",
            Tab::Authors => "Autores",
            Tab::Clients => "Clientes",
            Tab::Loans => "Préstamos",
        }
    }

    pub fn resource(&self) -> Resource {
        match self {
            Tab::Games => Resource::Game,
            Tab::Categories => Resource::Category,
            Tab::Authors => Resource::Author,
            Tab::Clients => Resource::Client,
            Tab::Loans => Resource::Loan,
        }
    }

    pub fn next(&self) -> Tab {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(idx + 1) % tabs.len()]
    }

    pub fn previous(&self) -> Tab {
        let tabs = Tab::all();
        let idx = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(idx + tabs.len() - 1) % tabs.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::default(), Tab::Games);
        assert_eq!(Tab::Loans.next(), Tab::Games);
        assert_eq!(Tab::Games.previous(), Tab::Loans);
        assert_eq!(Tab::Authors.next(), Tab::Clients);
    }
}
