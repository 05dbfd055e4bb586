//! Tag-based query cache
//!
//! Each read is cached under its [`QueryKey`]. Every key belongs to one
//! [`Resource`] tag, and each tag carries a generation counter. Invalidating
//! a tag bumps its generation, which turns every entry stored under an older
//! generation stale; stale entries keep serving their data until a refetch
//! replaces them.

use crate::error::ApiError;
use crate::model::{QueryData, QueryKey, Resource};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    data: Option<QueryData>,
    /// Tag generation the request was dispatched under
    generation: u64,
    last_used: Instant,
}

#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    generations: HashMap<Resource, u64>,
    keep_unused: Duration,
}

impl QueryCache {
    pub fn new(keep_unused: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            generations: HashMap::new(),
            keep_unused,
        }
    }

    /// Current generation of a tag
    pub fn generation(&self, tag: Resource) -> u64 {
        self.generations.get(&tag).copied().unwrap_or(0)
    }

    /// Last successful data for a key, stale or not
    pub fn get(&self, key: &QueryKey) -> Option<&QueryData> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether the entry predates the last invalidation of its tag
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_some_and(|e| e.generation < self.generation(key.tag()))
    }

    /// Whether a subscriber to this key should trigger a request
    pub fn needs_fetch(&self, key: &QueryKey) -> bool {
        !self.contains(key) || self.is_stale(key)
    }

    /// Record the outcome of a request dispatched under `generation`.
    /// A failure keeps the previous data so views do not go blank.
    pub fn store(
        &mut self,
        key: QueryKey,
        generation: u64,
        result: Result<QueryData, ApiError>,
        now: Instant,
    ) {
        let entry = self.entries.entry(key).or_insert_with(|| CacheEntry {
            data: None,
            generation,
            last_used: now,
        });
        entry.generation = generation;
        entry.last_used = now;
        // A failure keeps the previous data; the entry's generation alone
        // stops it from being retried until the tag is invalidated
        if let Ok(data) = result {
            entry.data = Some(data);
        }
    }

    /// Mark every entry under the given tags stale
    pub fn invalidate(&mut self, tags: &[Resource]) {
        for tag in tags {
            let generation = self.generations.entry(*tag).or_insert(0);
            *generation += 1;
            tracing::debug!(tag = %tag, generation = *generation, "invalidated cache tag");
        }
    }

    /// Mark entries as in use
    pub fn touch<'a>(&mut self, keys: impl IntoIterator<Item = &'a QueryKey>, now: Instant) {
        for key in keys {
            if let Some(entry) = self.entries.get_mut(key) {
                entry.last_used = now;
            }
        }
    }

    /// Drop entries nobody subscribes to that have been unused for longer
    /// than the keep-unused window
    pub fn evict_unused(&mut self, subscribed: &HashSet<QueryKey>, now: Instant) -> usize {
        let keep_unused = self.keep_unused;
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            subscribed.contains(key) || now.duration_since(entry.last_used) < keep_unused
        });
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!(evicted, "evicted unused cache entries");
        }
        evicted
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, LoanQuery, Page, PageRequest};

    fn categories(names: &[&str]) -> QueryData {
        QueryData::Categories(
            names
                .iter()
                .enumerate()
                .map(|(i, name)| Category {
                    id: (i + 1).to_string(),
                    name: name.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_empty_cache_needs_fetch() {
        let cache = QueryCache::new(Duration::from_secs(60));
        assert!(cache.needs_fetch(&QueryKey::Categories));
        assert!(cache.get(&QueryKey::Categories).is_none());
        assert!(!cache.is_stale(&QueryKey::Categories));
    }

    #[test]
    fn test_mutation_makes_next_read_refetch() {
        let now = Instant::now();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        let key = QueryKey::Categories;
        cache.store(key.clone(), cache.generation(Resource::Category), Ok(categories(&["A"])), now);
        assert!(!cache.needs_fetch(&key));

        cache.invalidate(&[Resource::Category]);
        assert!(cache.needs_fetch(&key));
        assert!(cache.is_stale(&key));
        // Stale data is still served until the refetch lands
        assert_eq!(cache.get(&key), Some(&categories(&["A"])));

        cache.store(key.clone(), cache.generation(Resource::Category), Ok(categories(&["A", "B"])), now);
        assert!(!cache.needs_fetch(&key));
        assert_eq!(cache.get(&key).map(QueryData::len), Some(2));
    }

    #[test]
    fn test_invalidation_only_touches_its_tag() {
        let now = Instant::now();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        let loans = QueryKey::Loans(LoanQuery::default());
        cache.store(loans.clone(), 0, Ok(QueryData::LoanPage(Page::default())), now);
        cache.store(QueryKey::Categories, 0, Ok(categories(&["A"])), now);

        cache.invalidate(&[Resource::Loan]);
        assert!(cache.needs_fetch(&loans));
        assert!(!cache.needs_fetch(&QueryKey::Categories));
    }

    #[test]
    fn test_response_dispatched_before_invalidation_is_stale() {
        let now = Instant::now();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        let dispatched_under = cache.generation(Resource::Category);
        cache.invalidate(&[Resource::Category]);

        cache.store(QueryKey::Categories, dispatched_under, Ok(categories(&["old"])), now);
        assert!(cache.is_stale(&QueryKey::Categories));
        assert!(cache.needs_fetch(&QueryKey::Categories));
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let now = Instant::now();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        cache.store(QueryKey::Categories, 0, Ok(categories(&["A"])), now);
        cache.invalidate(&[Resource::Category]);
        cache.store(
            QueryKey::Categories,
            1,
            Err(ApiError::Transport("refused".to_string())),
            now,
        );

        assert_eq!(cache.get(&QueryKey::Categories), Some(&categories(&["A"])));
        assert!(!cache.is_stale(&QueryKey::Categories));
        // No retry loop until the tag is invalidated again
        assert!(!cache.needs_fetch(&QueryKey::Categories));
    }

    #[test]
    fn test_evict_unused_entries() {
        let start = Instant::now();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        let page_one = QueryKey::AuthorsPage(PageRequest::default());
        let page_two = QueryKey::AuthorsPage(PageRequest {
            page_number: 1,
            page_size: 5,
        });
        cache.store(page_one.clone(), 0, Ok(QueryData::AuthorPage(Page::default())), start);
        cache.store(page_two.clone(), 0, Ok(QueryData::AuthorPage(Page::default())), start);

        let subscribed: HashSet<QueryKey> = [page_two.clone()].into_iter().collect();
        assert_eq!(cache.evict_unused(&subscribed, start + Duration::from_secs(30)), 0);
        assert_eq!(cache.evict_unused(&subscribed, start + Duration::from_secs(61)), 1);
        assert!(!cache.contains(&page_one));
        assert!(cache.contains(&page_two));
    }

    #[test]
    fn test_touch_extends_lifetime() {
        let start = Instant::now();
        let mut cache = QueryCache::new(Duration::from_secs(60));
        cache.store(QueryKey::Clients, 0, Ok(QueryData::Clients(Vec::new())), start);
        cache.touch([&QueryKey::Clients], start + Duration::from_secs(50));

        assert_eq!(cache.evict_unused(&HashSet::new(), start + Duration::from_secs(90)), 0);
        assert_eq!(cache.evict_unused(&HashSet::new(), start + Duration::from_secs(111)), 1);
        assert!(cache.is_empty());
    }
}
