//! A reference two-stage loader over a paged JSON feed.
//!
//! Stage 1 fetches the feed header and the reader's preferences; stage 2
//! fetches one page of items, keyed by the feed id from the header and the
//! page size from the preferences. Used by the `listflow demo` command.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::LoadError;
use crate::loading::{LoadingIntent, Section};
use crate::pipeline::{Fetched, LoaderResults, MemoryStore, Request, RequestPair, TwoStageLoader};

const FALLBACK_FEED_ID: &str = "default";
const FALLBACK_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedHeader {
    pub feed_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: u32,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct HeaderRequest {
    feed: String,
}

impl Request for HeaderRequest {
    type Output = FeedHeader;

    fn key(&self) -> String {
        header_key(&self.feed)
    }
}

#[derive(Debug, Clone)]
pub struct PreferencesRequest;

impl Request for PreferencesRequest {
    type Output = Preferences;

    fn key(&self) -> String {
        "preferences".to_string()
    }
}

#[derive(Debug, Clone)]
pub struct PageRequest {
    pub feed_id: String,
    pub page: u32,
    pub page_size: usize,
}

impl Request for PageRequest {
    type Output = Vec<FeedItem>;

    fn key(&self) -> String {
        page_key(&self.feed_id, self.page, self.page_size)
    }
}

pub fn header_key(feed: &str) -> String {
    format!("feeds/{feed}")
}

pub fn page_key(feed_id: &str, page: u32, page_size: usize) -> String {
    format!("feeds/{feed_id}/pages/{page}?size={page_size}")
}

/// Page a given intent loads. Everything but `Page` reloads the first page.
pub fn page_for(intent: &LoadingIntent) -> u32 {
    match intent {
        LoadingIntent::Page { page_number } => *page_number,
        _ => 1,
    }
}

/// Two-stage loader for one feed.
#[derive(Debug, Clone)]
pub struct FeedLoader {
    feed: String,
}

impl FeedLoader {
    pub fn new(feed: impl Into<String>) -> Self {
        Self { feed: feed.into() }
    }
}

impl TwoStageLoader for FeedLoader {
    type RequestA = HeaderRequest;
    type RequestB = PreferencesRequest;
    type RequestC = PageRequest;
    type Cell = FeedItem;

    fn build_first_requests(
        &self,
        intent: &LoadingIntent,
    ) -> Result<RequestPair<HeaderRequest, PreferencesRequest>, LoadError> {
        if page_for(intent) == 0 {
            return Err(LoadError::configuration("page numbers start at 1"));
        }
        if self.feed.is_empty() {
            return Err(LoadError::configuration("feed name is empty"));
        }
        Ok(RequestPair::new(
            HeaderRequest {
                feed: self.feed.clone(),
            },
            PreferencesRequest,
        ))
    }

    fn build_second_request(
        &self,
        intent: &LoadingIntent,
        first: &Fetched<FeedHeader>,
        second: &Fetched<Preferences>,
    ) -> Result<PageRequest, LoadError> {
        let feed_id = first
            .as_ref()
            .map(|header| header.feed_id.clone())
            .unwrap_or_else(|| FALLBACK_FEED_ID.to_string());
        let page_size = second
            .as_ref()
            .map(|prefs| prefs.page_size)
            .unwrap_or(FALLBACK_PAGE_SIZE);
        if page_size == 0 {
            return Err(LoadError::configuration("page size must be positive"));
        }
        Ok(PageRequest {
            feed_id,
            page: page_for(intent),
            page_size,
        })
    }

    fn map_to_sections(
        &self,
        results: &LoaderResults<Self>,
        intent: &LoadingIntent,
    ) -> Option<Vec<Section<FeedItem>>> {
        let items = results.third.as_ref()?;
        Some(vec![Section::new(page_for(intent), items.clone())])
    }

    fn on_results_received(&self, results: &LoaderResults<Self>, intent: &LoadingIntent) {
        tracing::debug!(
            feed = %self.feed,
            intent = ?intent,
            source = ?results.third.source,
            items = results.third.as_ref().map(Vec::len).unwrap_or(0),
            "Feed page received"
        );
    }
}

/// Generate `count` items for `page`, with ids continuing across pages.
pub fn items_for_page(page: u32, page_size: usize, count: usize, label: &str) -> Vec<FeedItem> {
    let first_id = (page.saturating_sub(1) as usize * page_size) as u32 + 1;
    (0..count as u32)
        .map(|offset| FeedItem {
            id: first_id + offset,
            title: format!("{label} #{}", first_id + offset),
        })
        .collect()
}

/// Seed `store` with a feed of `pages` full pages.
pub fn seed_feed(store: &MemoryStore, feed: &str, pages: u32, page_size: usize, label: &str) {
    let feed_id = format!("{feed}-id");
    store.insert(
        header_key(feed),
        json!({ "feed_id": feed_id, "title": format!("{feed} feed") }),
    );
    store.insert("preferences", json!({ "page_size": page_size }));
    for page in 1..=pages {
        let items = items_for_page(page, page_size, page_size, label);
        store.insert(page_key(&feed_id, page, page_size), json!(items));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::execute;

    #[test]
    fn item_ids_continue_across_pages() {
        let items = items_for_page(2, 3, 3, "item");
        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4, 5, 6]);
        assert_eq!(items[0].title, "item #4");
    }

    #[test]
    fn page_zero_is_a_configuration_error() {
        let loader = FeedLoader::new("news");
        let err = loader
            .build_first_requests(&LoadingIntent::Page { page_number: 0 })
            .unwrap_err();
        assert!(matches!(err, LoadError::Configuration { .. }));
    }

    #[tokio::test]
    async fn cold_cache_falls_back_and_network_fills_in() {
        let loader = FeedLoader::new("news");
        let cache = MemoryStore::cache();
        let network = MemoryStore::network();
        seed_feed(&network, "news", 2, 3, "fresh");

        let mut updates = Vec::new();
        execute(
            &loader,
            &cache,
            &network,
            LoadingIntent::Page { page_number: 2 },
            |u| updates.push(u),
        )
        .await
        .unwrap();

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0], None);
        assert_eq!(
            cache.requested_keys().last().cloned(),
            Some(page_key(FALLBACK_FEED_ID, 2, FALLBACK_PAGE_SIZE))
        );
        let sections = updates[1].clone().unwrap();
        assert_eq!(sections[0].page, 2);
        assert_eq!(sections[0].cells, items_for_page(2, 3, 3, "fresh"));
    }
}
