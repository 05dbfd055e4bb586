//! In-memory backend used by the tests
//!
//! Honors the same filters and paging as the real service, counts reads per
//! key and can be told to fail or to hold requests until released.

use crate::error::ApiError;
use crate::model::{
    Author, Category, Client, Game, Loan, Mutation, Page, PageRequest, QueryData, QueryKey,
    Resource,
};
use crate::services::api::LudotecaApi;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Condvar, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    categories: Vec<Category>,
    authors: Vec<Author>,
    games: Vec<Game>,
    clients: Vec<Client>,
    loans: Vec<Loan>,
    next_id: u64,
    fetches: HashMap<QueryKey, usize>,
    mutations: Vec<Mutation>,
    query_failure: Option<ApiError>,
    mutation_failure: Option<ApiError>,
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    state: Mutex<State>,
    held: Mutex<bool>,
    released: Condvar,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn page_of<T: Clone>(items: &[T], page: &PageRequest) -> Page<T> {
    let size = page.page_size.max(1) as usize;
    let start = page.page_number as usize * size;
    Page {
        content: items.iter().skip(start).take(size).cloned().collect(),
        total_elements: items.len() as u64,
    }
}

impl FakeBackend {
    /// Two categories, seven authors, three games, two clients, three loans
    pub fn seeded() -> Self {
        let categories = vec![
            Category { id: "1".to_string(), name: "Eurogames".to_string() },
            Category { id: "2".to_string(), name: "Familiar".to_string() },
        ];
        let authors: Vec<Author> = [
            "Klaus Teuber",
            "Klaus-Jürgen Wrede",
            "Uwe Rosenberg",
            "Reiner Knizia",
            "Antoine Bauza",
            "Alan R. Moon",
            "Vlaada Chvátil",
        ]
        .iter()
        .enumerate()
        .map(|(i, name)| Author { id: (i + 1).to_string(), name: name.to_string() })
        .collect();
        let games = vec![
            Game {
                id: "G1".to_string(),
                title: "Catan".to_string(),
                category: Some(categories[0].clone()),
                author: Some(authors[0].clone()),
            },
            Game {
                id: "G2".to_string(),
                title: "Carcassonne".to_string(),
                category: Some(categories[1].clone()),
                author: Some(authors[1].clone()),
            },
            Game {
                id: "G3".to_string(),
                title: "Agricola".to_string(),
                category: Some(categories[0].clone()),
                author: Some(authors[2].clone()),
            },
        ];
        let clients = vec![
            Client { id: "C1".to_string(), name: "Ana".to_string() },
            Client { id: "C2".to_string(), name: "Luis".to_string() },
        ];
        let loans = vec![
            Loan {
                id: "1".to_string(),
                game: Some(games[0].clone()),
                client: Some(clients[0].clone()),
                start_date: date(2024, 1, 1),
                end_date: date(2024, 1, 5),
            },
            Loan {
                id: "2".to_string(),
                game: Some(games[1].clone()),
                client: Some(clients[1].clone()),
                start_date: date(2024, 2, 1),
                end_date: date(2024, 2, 10),
            },
            Loan {
                id: "3".to_string(),
                game: Some(games[2].clone()),
                client: Some(clients[0].clone()),
                start_date: date(2024, 3, 1),
                end_date: date(2024, 3, 14),
            },
        ];

        let backend = Self::default();
        {
            let mut state = backend.lock();
            state.categories = categories;
            state.authors = authors;
            state.games = games;
            state.clients = clients;
            state.loans = loans;
            state.next_id = 100;
        }
        backend
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of reads served for a key
    pub fn fetch_count(&self, key: &QueryKey) -> usize {
        self.lock().fetches.get(key).copied().unwrap_or(0)
    }

    /// Total number of reads served for keys under a tag
    pub fn fetch_count_for(&self, tag: Resource) -> usize {
        self.lock()
            .fetches
            .iter()
            .filter(|(key, _)| key.tag() == tag)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.lock().mutations.clone()
    }

    pub fn loan_ids(&self) -> Vec<String> {
        self.lock().loans.iter().map(|l| l.id.clone()).collect()
    }

    pub fn fail_queries_with(&self, error: ApiError) {
        self.lock().query_failure = Some(error);
    }

    pub fn fail_mutations_with(&self, error: ApiError) {
        self.lock().mutation_failure = Some(error);
    }

    /// Make every request block until [`release_requests`](Self::release_requests)
    pub fn hold_requests(&self) {
        *self.held.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    pub fn release_requests(&self) {
        *self.held.lock().unwrap_or_else(|e| e.into_inner()) = false;
        self.released.notify_all();
    }

    fn wait_if_held(&self) {
        let mut held = self.held.lock().unwrap_or_else(|e| e.into_inner());
        while *held {
            held = self.released.wait(held).unwrap_or_else(|e| e.into_inner());
        }
    }

    fn assign_id(state: &mut State, id: &str) -> String {
        if id.is_empty() {
            state.next_id += 1;
            state.next_id.to_string()
        } else {
            id.to_string()
        }
    }
}

fn upsert<T: Clone>(items: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> &str) {
    let id = id_of(&item).to_string();
    match items.iter_mut().find(|existing| id_of(existing) == id) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

impl LudotecaApi for FakeBackend {
    fn fetch(&self, key: &QueryKey) -> Result<QueryData, ApiError> {
        self.wait_if_held();
        let mut state = self.lock();
        *state.fetches.entry(key.clone()).or_insert(0) += 1;
        if let Some(error) = &state.query_failure {
            return Err(error.clone());
        }

        Ok(match key {
            QueryKey::Categories => QueryData::Categories(state.categories.clone()),
            QueryKey::Clients => QueryData::Clients(state.clients.clone()),
            QueryKey::AllAuthors => QueryData::Authors(state.authors.clone()),
            QueryKey::AuthorsPage(page) => QueryData::AuthorPage(page_of(&state.authors, page)),
            QueryKey::AllGames => QueryData::Games(state.games.clone()),
            QueryKey::Games(filter) => {
                let title = filter.title.trim().to_lowercase();
                let games = state
                    .games
                    .iter()
                    .filter(|g| title.is_empty() || g.title.to_lowercase().contains(&title))
                    .filter(|g| match &filter.category_id {
                        Some(id) => g.category.as_ref().is_some_and(|c| &c.id == id),
                        None => true,
                    })
                    .cloned()
                    .collect();
                QueryData::Games(games)
            }
            QueryKey::Loans(query) => {
                let filter = &query.filter;
                let loans: Vec<Loan> = state
                    .loans
                    .iter()
                    .filter(|l| match &filter.game_id {
                        Some(id) => l.game.as_ref().is_some_and(|g| &g.id == id),
                        None => true,
                    })
                    .filter(|l| match &filter.client_id {
                        Some(id) => l.client.as_ref().is_some_and(|c| &c.id == id),
                        None => true,
                    })
                    .filter(|l| match filter.date {
                        Some(day) => l.start_date <= day && day <= l.end_date,
                        None => true,
                    })
                    .cloned()
                    .collect();
                QueryData::LoanPage(page_of(&loans, &query.page))
            }
        })
    }

    fn mutate(&self, mutation: &Mutation) -> Result<(), ApiError> {
        self.wait_if_held();
        let mut state = self.lock();
        state.mutations.push(mutation.clone());
        if let Some(error) = &state.mutation_failure {
            return Err(error.clone());
        }

        match mutation.clone() {
            Mutation::SaveCategory(mut c) => {
                c.id = Self::assign_id(&mut state, &c.id);
                upsert(&mut state.categories, c, |c| &c.id);
            }
            Mutation::SaveAuthor(mut a) => {
                a.id = Self::assign_id(&mut state, &a.id);
                // Games embed their author
                for game in state.games.iter_mut() {
                    if let Some(author) = game.author.as_mut().filter(|x| x.id == a.id) {
                        *author = a.clone();
                    }
                }
                upsert(&mut state.authors, a, |a| &a.id);
            }
            Mutation::SaveGame(mut g) => {
                g.id = Self::assign_id(&mut state, &g.id);
                upsert(&mut state.games, g, |g| &g.id);
            }
            Mutation::SaveClient(mut c) => {
                c.id = Self::assign_id(&mut state, &c.id);
                upsert(&mut state.clients, c, |c| &c.id);
            }
            Mutation::SaveLoan(mut l) => {
                l.id = Self::assign_id(&mut state, &l.id);
                // Store the seeded records, not the copies the request carried
                if let Some(game_id) = l.game.as_ref().map(|g| g.id.clone()) {
                    l.game = state.games.iter().find(|g| g.id == game_id).cloned().or(l.game);
                }
                if let Some(client_id) = l.client.as_ref().map(|c| c.id.clone()) {
                    l.client = state.clients.iter().find(|c| c.id == client_id).cloned().or(l.client);
                }
                upsert(&mut state.loans, l, |l| &l.id);
            }
            Mutation::Delete { resource, id } => {
                let before = match resource {
                    Resource::Category => state.categories.len(),
                    Resource::Author => state.authors.len(),
                    Resource::Game => state.games.len(),
                    Resource::Client => state.clients.len(),
                    Resource::Loan => state.loans.len(),
                };
                match resource {
                    Resource::Category => state.categories.retain(|x| x.id != id),
                    Resource::Author => state.authors.retain(|x| x.id != id),
                    Resource::Game => state.games.retain(|x| x.id != id),
                    Resource::Client => state.clients.retain(|x| x.id != id),
                    Resource::Loan => state.loans.retain(|x| x.id != id),
                }
                let after = match resource {
                    Resource::Category => state.categories.len(),
                    Resource::Author => state.authors.len(),
                    Resource::Game => state.games.len(),
                    Resource::Client => state.clients.len(),
                    Resource::Loan => state.loans.len(),
                };
                if before == after {
                    return Err(ApiError::Backend {
                        status: 404,
                        msg: format!("No existe {} con id {}", resource.with_article(), id),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GameFilter, LoanFilter, LoanQuery};

    #[test]
    fn test_loan_filters_and_paging() {
        let backend = FakeBackend::seeded();
        let by_client = QueryKey::Loans(LoanQuery {
            page: PageRequest::default(),
            filter: LoanFilter {
                client_id: Some("C1".to_string()),
                ..LoanFilter::default()
            },
        });
        let page = backend.fetch(&by_client).unwrap();
        assert_eq!(page.loan_page().map(|p| p.total_elements), Some(2));

        let by_date = QueryKey::Loans(LoanQuery {
            page: PageRequest::default(),
            filter: LoanFilter {
                date: Some(date(2024, 2, 5)),
                ..LoanFilter::default()
            },
        });
        let page = backend.fetch(&by_date).unwrap();
        let ids: Vec<_> = page.loan_page().unwrap().content.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec!["2"]);

        let authors = backend
            .fetch(&QueryKey::AuthorsPage(PageRequest { page_number: 1, page_size: 5 }))
            .unwrap();
        let page = authors.author_page().unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 7);
    }

    #[test]
    fn test_game_filter() {
        let backend = FakeBackend::seeded();
        let data = backend
            .fetch(&QueryKey::Games(GameFilter {
                title: "car".to_string(),
                category_id: None,
            }))
            .unwrap();
        assert_eq!(data.games().map(|g| g.len()), Some(1));
    }

    #[test]
    fn test_saved_loan_keeps_seeded_records() {
        let backend = FakeBackend::seeded();
        let loan = Loan {
            id: String::new(),
            game: Some(Game { id: "G1".to_string(), title: "stale".to_string(), ..Game::default() }),
            client: Some(Client { id: "C1".to_string(), name: String::new() }),
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 5),
        };
        backend.mutate(&Mutation::SaveLoan(loan)).unwrap();

        let all = QueryKey::Loans(LoanQuery {
            page: PageRequest { page_number: 0, page_size: 25 },
            filter: LoanFilter::default(),
        });
        let data = backend.fetch(&all).unwrap();
        let created = data
            .loan_page()
            .unwrap()
            .content
            .iter()
            .find(|l| !["1", "2", "3"].contains(&l.id.as_str()))
            .cloned()
            .unwrap();
        assert_eq!(created.game.map(|g| g.title), Some("Catan".to_string()));
        assert!(created.client.is_some_and(|c| !c.name.is_empty()));
    }

    #[test]
    fn test_delete_missing_record_fails() {
        let backend = FakeBackend::seeded();
        let result = backend.mutate(&Mutation::Delete {
            resource: Resource::Loan,
            id: "42".to_string(),
        });
        assert!(matches!(result, Err(ApiError::Backend { status: 404, .. })));
        assert_eq!(backend.loan_ids(), vec!["1", "2", "3"]);
    }
}
