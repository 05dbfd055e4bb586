//! Query keys, filters and pagination state
//!
//! A [`QueryKey`] identifies one cached read; two reads with equal keys share
//! a cache entry. Every key belongs to exactly one [`Resource`] tag.

use super::entity::{Author, Category, Client, Game, Loan, Page, Resource};
use chrono::NaiveDate;
use serde::Serialize;

/// Page sizes offered by the paginated views
pub const PAGE_SIZE_OPTIONS: [u32; 3] = [5, 10, 25];

/// Default page size for paginated views
pub const DEFAULT_PAGE_SIZE: u32 = 5;

// ═══════════════════════════════════════════════════════════════════════════════
// Pagination
// ═══════════════════════════════════════════════════════════════════════════════

/// Zero-based page request, serialized as the backend's `pageable` object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_number: u32,
    pub page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::with_size(DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    /// First page with the given size, snapped to an offered size
    pub fn with_size(page_size: u32) -> Self {
        Self {
            page_number: 0,
            page_size: snap_page_size(page_size),
        }
    }

    /// Number of pages needed for `total` rows (at least one)
    pub fn page_count(&self, total: u64) -> u32 {
        let size = u64::from(self.page_size.max(1));
        let pages = total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn next(&mut self, total: u64) {
        if self.page_number + 1 < self.page_count(total) {
            self.page_number += 1;
        }
    }

    pub fn previous(&mut self) {
        self.page_number = self.page_number.saturating_sub(1);
    }

    /// Change the page size; always goes back to the first page
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = snap_page_size(page_size);
        self.page_number = 0;
    }

    /// Advance to the next offered page size, wrapping around
    pub fn cycle_page_size(&mut self) {
        let idx = PAGE_SIZE_OPTIONS
            .iter()
            .position(|s| *s == self.page_size)
            .map(|i| (i + 1) % PAGE_SIZE_OPTIONS.len())
            .unwrap_or(0);
        self.set_page_size(PAGE_SIZE_OPTIONS[idx]);
    }

    /// Range label in the style "1–5 de 12"
    pub fn range_label(&self, total: u64) -> String {
        if total == 0 {
            return "0–0 de 0".to_string();
        }
        let size = u64::from(self.page_size);
        let from = u64::from(self.page_number) * size + 1;
        let to = (from + size - 1).min(total);
        format!("{}–{} de {}", from, to, total)
    }
}

/// Snap an arbitrary size to the closest offered page size
pub fn snap_page_size(page_size: u32) -> u32 {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .min_by_key(|s| s.abs_diff(page_size))
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Filters
// ═══════════════════════════════════════════════════════════════════════════════

/// Loan list filters. `None` means "not filtered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LoanFilter {
    pub game_id: Option<String>,
    pub client_id: Option<String>,
    pub date: Option<NaiveDate>,
}

impl LoanFilter {
    pub fn is_empty(&self) -> bool {
        self.game_id.is_none() && self.client_id.is_none() && self.date.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Query parameters for the loan list request; unset filters are omitted
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.game_id.as_deref().filter(|id| !id.is_empty()) {
            params.push(("idGame", id.to_string()));
        }
        if let Some(id) = self.client_id.as_deref().filter(|id| !id.is_empty()) {
            params.push(("idClient", id.to_string()));
        }
        if let Some(date) = self.date {
            params.push(("dateString", date.format("%Y-%m-%dT00:00:00.000Z").to_string()));
        }
        params
    }
}

/// Loan list request: a page plus filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct LoanQuery {
    pub page: PageRequest,
    pub filter: LoanFilter,
}

/// Game list filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GameFilter {
    pub title: String,
    pub category_id: Option<String>,
}

impl GameFilter {
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.category_id.is_none()
    }

    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        let title = self.title.trim();
        if !title.is_empty() {
            params.push(("title", title.to_string()));
        }
        if let Some(id) = self.category_id.as_deref().filter(|id| !id.is_empty()) {
            params.push(("idCategory", id.to_string()));
        }
        params
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Query keys and data
// ═══════════════════════════════════════════════════════════════════════════════

/// Identity of one cached read
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Categories,
    Clients,
    AllAuthors,
    AuthorsPage(PageRequest),
    AllGames,
    Games(GameFilter),
    Loans(LoanQuery),
}

impl QueryKey {
    /// Cache tag this read belongs to
    pub fn tag(&self) -> Resource {
        match self {
            QueryKey::Categories => Resource::Category,
            QueryKey::Clients => Resource::Client,
            QueryKey::AllAuthors | QueryKey::AuthorsPage(_) => Resource::Author,
            QueryKey::AllGames | QueryKey::Games(_) => Resource::Game,
            QueryKey::Loans(_) => Resource::Loan,
        }
    }
}

/// Decoded result of a read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryData {
    Categories(Vec<Category>),
    Clients(Vec<Client>),
    Authors(Vec<Author>),
    AuthorPage(Page<Author>),
    Games(Vec<Game>),
    LoanPage(Page<Loan>),
}

impl QueryData {
    pub fn categories(&self) -> Option<&[Category]> {
        match self {
            QueryData::Categories(items) => Some(items),
            _ => None,
        }
    }

    pub fn clients(&self) -> Option<&[Client]> {
        match self {
            QueryData::Clients(items) => Some(items),
            _ => None,
        }
    }

    pub fn authors(&self) -> Option<&[Author]> {
        match self {
            QueryData::Authors(items) => Some(items),
            _ => None,
        }
    }

    pub fn author_page(&self) -> Option<&Page<Author>> {
        match self {
            QueryData::AuthorPage(page) => Some(page),
            _ => None,
        }
    }

    pub fn games(&self) -> Option<&[Game]> {
        match self {
            QueryData::Games(items) => Some(items),
            _ => None,
        }
    }

    pub fn loan_page(&self) -> Option<&Page<Loan>> {
        match self {
            QueryData::LoanPage(page) => Some(page),
            _ => None,
        }
    }

    /// Number of rows carried by this result
    pub fn len(&self) -> usize {
        match self {
            QueryData::Categories(items) => items.len(),
            QueryData::Clients(items) => items.len(),
            QueryData::Authors(items) => items.len(),
            QueryData::AuthorPage(page) => page.content.len(),
            QueryData::Games(items) => items.len(),
            QueryData::LoanPage(page) => page.content.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_change_resets_page() {
        let mut page = PageRequest::default();
        page.next(100);
        page.next(100);
        assert_eq!(page.page_number, 2);

        page.set_page_size(25);
        assert_eq!(page, PageRequest { page_number: 0, page_size: 25 });
    }

    #[test]
    fn test_cycle_page_size() {
        let mut page = PageRequest::default();
        assert_eq!(page.page_size, 5);
        page.cycle_page_size();
        assert_eq!(page.page_size, 10);
        page.cycle_page_size();
        assert_eq!(page.page_size, 25);
        page.cycle_page_size();
        assert_eq!(page.page_size, 5);
    }

    #[test]
    fn test_page_navigation_is_bounded() {
        let mut page = PageRequest::with_size(5);
        page.previous();
        assert_eq!(page.page_number, 0);

        for _ in 0..10 {
            page.next(12);
        }
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_count(12), 3);
        assert_eq!(page.page_count(0), 1);
    }

    #[test]
    fn test_range_label() {
        let mut page = PageRequest::with_size(5);
        assert_eq!(page.range_label(0), "0–0 de 0");
        assert_eq!(page.range_label(12), "1–5 de 12");
        page.next(12);
        page.next(12);
        assert_eq!(page.range_label(12), "11–12 de 12");
    }

    #[test]
    fn test_snap_page_size() {
        assert_eq!(snap_page_size(5), 5);
        assert_eq!(snap_page_size(7), 5);
        assert_eq!(snap_page_size(9), 10);
        assert_eq!(snap_page_size(100), 25);
    }

    #[test]
    fn test_loan_filter_params() {
        let filter = LoanFilter {
            game_id: Some("1".to_string()),
            client_id: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 10),
        };
        assert_eq!(
            filter.query_params(),
            vec![
                ("idGame", "1".to_string()),
                ("dateString", "2024-01-10T00:00:00.000Z".to_string()),
            ]
        );

        let mut filter = filter;
        filter.clear();
        assert!(filter.is_empty());
        assert!(filter.query_params().is_empty());
    }

    #[test]
    fn test_game_filter_params() {
        let filter = GameFilter {
            title: "  catan ".to_string(),
            category_id: Some("2".to_string()),
        };
        assert_eq!(
            filter.query_params(),
            vec![("title", "catan".to_string()), ("idCategory", "2".to_string())]
        );
        assert!(GameFilter::default().query_params().is_empty());
    }

    #[test]
    fn test_query_key_tags() {
        assert_eq!(QueryKey::AllGames.tag(), Resource::Game);
        assert_eq!(QueryKey::Games(GameFilter::default()).tag(), Resource::Game);
        assert_eq!(QueryKey::AuthorsPage(PageRequest::default()).tag(), Resource::Author);
        assert_eq!(QueryKey::Loans(LoanQuery::default()).tag(), Resource::Loan);
    }
}
