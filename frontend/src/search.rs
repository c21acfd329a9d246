//! Fan-out search orchestration across the user's selected channels.
//!
//! Two failure policies on purpose: explicit searches (`run_search`,
//! `load_more`) are all-or-nothing, while the pre-search feed
//! (`load_initial`) is best-effort and skips channels that fail.

use std::collections::HashMap;

use futures::future::join_all;
use log::warn;
use thiserror::Error;

use crate::models::{Channel, Video};
use crate::youtube::{SearchPage, YouTubeClient, YouTubeError, RECENT_UPLOADS_COUNT, SEARCH_PAGE_SIZE};

/// How many channels contribute to the initial recent-uploads feed.
pub const INITIAL_CHANNEL_LIMIT: usize = 3;

/// Per-channel continuation token; `None` means that channel has no further
/// pages.
pub type CursorMap = HashMap<String, Option<String>>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Please select at least one channel to search from.")]
    NoChannelsSelected,

    #[error(transparent)]
    Platform(#[from] YouTubeError),
}

#[allow(async_fn_in_trait)]
pub trait SearchClient {
    async fn search(
        &self,
        query: &str,
        language: &str,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, YouTubeError>;

    async fn recent_uploads(
        &self,
        channel_id: &str,
        known_channels: &[Channel],
    ) -> Result<Vec<Video>, YouTubeError>;
}

impl SearchClient for YouTubeClient {
    async fn search(
        &self,
        query: &str,
        language: &str,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, YouTubeError> {
        YouTubeClient::search(self, query, language, channel_id, page_token, SEARCH_PAGE_SIZE).await
    }

    async fn recent_uploads(
        &self,
        channel_id: &str,
        known_channels: &[Channel],
    ) -> Result<Vec<Video>, YouTubeError> {
        YouTubeClient::recent_uploads(self, channel_id, known_channels, RECENT_UPLOADS_COUNT).await
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    pub videos: Vec<Video>,
    pub cursors: CursorMap,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MoreOutcome {
    pub videos: Vec<Video>,
    pub cursors: CursorMap,
    pub has_more: bool,
}

/// One concurrent search per channel; results are concatenated in channel
/// order with no cross-channel de-duplication. Any single channel failure
/// fails the whole search.
pub async fn run_search<C: SearchClient>(
    client: &C,
    query: &str,
    language: &str,
    channel_ids: &[String],
) -> Result<SearchOutcome, SearchError> {
    if channel_ids.is_empty() {
        return Err(SearchError::NoChannelsSelected);
    }

    let pages = join_all(
        channel_ids
            .iter()
            .map(|id| client.search(query, language, id, None)),
    )
    .await;

    let mut outcome = SearchOutcome::default();
    for (channel_id, page) in channel_ids.iter().zip(pages) {
        let page = page?;
        outcome.cursors.insert(channel_id.clone(), page.next_page_token);
        outcome.videos.extend(page.videos);
    }
    Ok(outcome)
}

/// Continue each channel that still holds a cursor; channels without one
/// contribute nothing. `has_more` is false exactly when every cursor in the
/// returned map is exhausted.
pub async fn load_more<C: SearchClient>(
    client: &C,
    query: &str,
    language: &str,
    channel_ids: &[String],
    cursors: &CursorMap,
) -> Result<MoreOutcome, SearchError> {
    let continuing: Vec<(&String, &str)> = channel_ids
        .iter()
        .filter_map(|id| {
            cursors
                .get(id)
                .and_then(|cursor| cursor.as_deref())
                .map(|token| (id, token))
        })
        .collect();

    let pages = join_all(
        continuing
            .iter()
            .map(|(id, token)| client.search(query, language, id, Some(token))),
    )
    .await;

    let mut next_cursors = cursors.clone();
    let mut videos = Vec::new();
    for ((channel_id, _), page) in continuing.iter().zip(pages) {
        let page = page?;
        next_cursors.insert((*channel_id).clone(), page.next_page_token);
        videos.extend(page.videos);
    }

    let has_more = next_cursors.values().any(|cursor| cursor.is_some());
    Ok(MoreOutcome {
        videos,
        cursors: next_cursors,
        has_more,
    })
}

/// Recent uploads from the first few channels, fetched concurrently. A
/// failing channel is logged and skipped rather than failing the batch.
pub async fn load_initial<C: SearchClient>(client: &C, channels: &[Channel]) -> Vec<Video> {
    let batch: Vec<&Channel> = channels.iter().take(INITIAL_CHANNEL_LIMIT).collect();
    let results = join_all(
        batch
            .iter()
            .map(|channel| client.recent_uploads(&channel.id, channels)),
    )
    .await;

    let mut videos = Vec::new();
    for (channel, result) in batch.iter().zip(results) {
        match result {
            Ok(list) => videos.extend(list),
            Err(e) => warn!("Failed to load recent uploads from {}: {e}", channel.name),
        }
    }
    videos
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use futures::executor::block_on;

    use super::*;
    use crate::models::DEFAULT_LANGUAGE;

    #[derive(Default)]
    struct MockClient {
        pages: HashMap<String, SearchPage>,
        failing: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl MockClient {
        fn with_page(mut self, channel_id: &str, videos: &[&str], next: Option<&str>) -> Self {
            self.pages.insert(
                channel_id.to_string(),
                SearchPage {
                    videos: videos.iter().map(|id| video(id)).collect(),
                    next_page_token: next.map(String::from),
                },
            );
            self
        }

        fn failing_on(mut self, channel_id: &str) -> Self {
            self.failing.push(channel_id.to_string());
            self
        }
    }

    fn video(id: &str) -> Video {
        Video {
            id: id.to_string(),
            title: format!("video {id}"),
            channel: "chan".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            thumbnail: String::new(),
            duration: "2m".to_string(),
            duration_sec: 120,
            url: format!("https://www.youtube.com/watch?v={id}"),
            view_count: 0,
        }
    }

    fn channel(id: &str) -> Channel {
        Channel {
            id: id.to_string(),
            name: format!("channel {id}"),
            category: "Coding".to_string(),
            language: "en".to_string(),
        }
    }

    impl SearchClient for MockClient {
        async fn search(
            &self,
            _query: &str,
            _language: &str,
            channel_id: &str,
            page_token: Option<&str>,
        ) -> Result<SearchPage, YouTubeError> {
            self.calls
                .borrow_mut()
                .push(format!("{channel_id}:{}", page_token.unwrap_or("-")));
            if self.failing.iter().any(|id| id == channel_id) {
                return Err(YouTubeError::QuotaExceeded);
            }
            Ok(self.pages.get(channel_id).cloned().unwrap_or_default())
        }

        async fn recent_uploads(
            &self,
            channel_id: &str,
            _known_channels: &[Channel],
        ) -> Result<Vec<Video>, YouTubeError> {
            self.calls.borrow_mut().push(channel_id.to_string());
            if self.failing.iter().any(|id| id == channel_id) {
                return Err(YouTubeError::Network("boom".to_string()));
            }
            Ok(self
                .pages
                .get(channel_id)
                .map(|page| page.videos.clone())
                .unwrap_or_default())
        }
    }

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_selection_fails_before_any_call() {
        let client = MockClient::default();
        let result = block_on(run_search(&client, "rust", "en", &[]));
        assert_eq!(result, Err(SearchError::NoChannelsSelected));
        assert!(client.calls.borrow().is_empty());
    }

    #[test]
    fn results_merge_across_channels() {
        let client = MockClient::default()
            .with_page("c1", &["a", "b"], Some("tok1"))
            .with_page("c2", &["c"], None);

        let outcome = block_on(run_search(&client, "rust", "en", &ids(&["c1", "c2"]))).unwrap();
        let merged: Vec<&str> = outcome.videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(merged, vec!["a", "b", "c"]);
        assert_eq!(outcome.cursors["c1"].as_deref(), Some("tok1"));
        assert_eq!(outcome.cursors["c2"], None);
    }

    #[test]
    fn one_failed_channel_fails_the_search() {
        let client = MockClient::default()
            .with_page("c1", &["a"], None)
            .failing_on("c2");

        let result = block_on(run_search(&client, "rust", "en", &ids(&["c1", "c2"])));
        assert_eq!(
            result,
            Err(SearchError::Platform(YouTubeError::QuotaExceeded))
        );
    }

    #[test]
    fn load_more_only_continues_channels_with_cursors() {
        let client = MockClient::default().with_page("c1", &["d"], None);
        let mut cursors = CursorMap::new();
        cursors.insert("c1".to_string(), Some("tok1".to_string()));
        cursors.insert("c2".to_string(), None);

        let outcome = block_on(load_more(
            &client,
            "rust",
            "en",
            &ids(&["c1", "c2"]),
            &cursors,
        ))
        .unwrap();

        assert_eq!(*client.calls.borrow(), vec!["c1:tok1".to_string()]);
        assert_eq!(outcome.videos.len(), 1);
        assert!(!outcome.has_more);
    }

    #[test]
    fn load_more_reports_remaining_pages() {
        let client = MockClient::default().with_page("c1", &["d"], Some("tok2"));
        let mut cursors = CursorMap::new();
        cursors.insert("c1".to_string(), Some("tok1".to_string()));

        let outcome =
            block_on(load_more(&client, "rust", "en", &ids(&["c1"]), &cursors)).unwrap();
        assert!(outcome.has_more);
        assert_eq!(outcome.cursors["c1"].as_deref(), Some("tok2"));
    }

    #[test]
    fn initial_load_skips_failing_channels() {
        let client = MockClient::default()
            .with_page("c1", &["a"], None)
            .failing_on("c2")
            .with_page("c3", &["b"], None)
            .with_page("c4", &["c"], None);

        let channels: Vec<Channel> = ["c1", "c2", "c3", "c4"].iter().map(|id| channel(id)).collect();
        let videos = block_on(load_initial(&client, &channels));

        // Only the first three channels are polled, and the failing one is
        // dropped from the feed.
        let got: Vec<&str> = videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(got, vec!["a", "b"]);
        assert_eq!(client.calls.borrow().len(), 3);
    }
}
