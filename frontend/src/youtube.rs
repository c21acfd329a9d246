//! YouTube Data API v3 client used directly from the browser.
//!
//! Search results come back in two hops: a `search` call for matching video
//! ids, then a batched `videos` call for duration, snippet and statistics.

use gloo_net::http::Request;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Channel, Video, DEFAULT_LANGUAGE};

const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

pub const SEARCH_PAGE_SIZE: u32 = 9;
pub const RECENT_UPLOADS_COUNT: u32 = 2;

/// Anything shorter is assumed to be a short/teaser and dropped.
pub const MIN_DURATION_SEC: u64 = 60;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum YouTubeError {
    #[error("Today's API limit is over. Please try again tomorrow.")]
    QuotaExceeded,

    #[error("Channel not found or invalid URL")]
    ChannelNotFound,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    items: Option<Vec<SearchItem>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    items: Option<Vec<VideoItem>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    snippet: Option<Snippet>,
    content_details: Option<ContentDetails>,
    statistics: Option<Statistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Snippet {
    title: String,
    channel_title: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentDetails {
    duration: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    items: Option<Vec<ChannelItem>>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    snippet: ChannelSnippet,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub id: String,
    pub name: String,
}

/// One page of per-channel search results plus the continuation token for
/// the next page, if the platform reported one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub videos: Vec<Video>,
    pub next_page_token: Option<String>,
}

/// Decode the platform's hour/minute/second duration encoding ("PT1H2M3S")
/// into seconds. Absent fields count as zero; malformed input decodes to 0.
pub fn parse_duration(duration: &str) -> u64 {
    let Some(rest) = duration.strip_prefix("PT") else {
        return 0;
    };

    let mut total = 0u64;
    let mut number = String::new();
    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            number.push(ch);
        } else {
            let value: u64 = number.parse().unwrap_or(0);
            match ch {
                'H' => total += value * 3600,
                'M' => total += value * 60,
                'S' => total += value,
                _ => {}
            }
            number.clear();
        }
    }
    total
}

fn format_duration(raw: &str) -> String {
    raw.trim_start_matches("PT").to_lowercase()
}

fn videos_from_details(body: VideosResponse, language: &str) -> Vec<Video> {
    body.items
        .unwrap_or_default()
        .into_iter()
        .filter_map(|item| {
            let snippet = item.snippet.unwrap_or_default();
            let raw_duration = item
                .content_details
                .unwrap_or_default()
                .duration
                .unwrap_or_default();
            let duration_sec = parse_duration(&raw_duration);
            if duration_sec < MIN_DURATION_SEC {
                return None;
            }

            let thumbnail = snippet
                .thumbnails
                .high
                .or(snippet.thumbnails.medium)
                .or(snippet.thumbnails.default)
                .map(|t| t.url)
                .unwrap_or_default();
            let view_count = item
                .statistics
                .unwrap_or_default()
                .view_count
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);

            Some(Video {
                url: format!("https://www.youtube.com/watch?v={}", item.id),
                id: item.id,
                title: snippet.title,
                channel: snippet.channel_title,
                language: language.to_string(),
                thumbnail,
                duration: format_duration(&raw_duration),
                duration_sec,
                view_count,
            })
        })
        .collect()
}

pub struct YouTubeClient {
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self { api_key }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, YouTubeError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| YouTubeError::Network(e.to_string()))?;

        // 403 is how the platform reports quota exhaustion for key-only access.
        if response.status() == 403 {
            return Err(YouTubeError::QuotaExceeded);
        }
        if !response.ok() {
            return Err(YouTubeError::Network(format!(
                "API returned status {}",
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| YouTubeError::Parse(e.to_string()))
    }

    async fn channel_query(
        &self,
        param: &str,
        value: &str,
    ) -> Result<Option<ChannelInfo>, YouTubeError> {
        let url = format!(
            "{YOUTUBE_API_BASE}/channels?key={}&{}={}&part=snippet",
            self.api_key,
            param,
            urlencoding::encode(value)
        );
        let body: ChannelsResponse = self.get_json(&url).await?;
        Ok(body
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(|item| ChannelInfo {
                id: item.id,
                name: item.snippet.title,
            }))
    }

    /// Resolve user input (a `@handle`, a channel id, or a legacy username)
    /// to a canonical channel id and display name. Quota exhaustion on any
    /// attempt wins over a not-found outcome.
    pub async fn lookup_channel(&self, id_or_handle: &str) -> Result<ChannelInfo, YouTubeError> {
        if id_or_handle.starts_with('@') {
            if let Some(found) = self.channel_query("forHandle", id_or_handle).await? {
                return Ok(found);
            }
        }
        if let Some(found) = self.channel_query("id", id_or_handle).await? {
            return Ok(found);
        }
        if let Some(found) = self.channel_query("forUsername", id_or_handle).await? {
            return Ok(found);
        }
        Err(YouTubeError::ChannelNotFound)
    }

    /// Relevance-ordered search restricted to a single channel, optionally
    /// continued from an earlier page. Videos shorter than
    /// [`MIN_DURATION_SEC`] are filtered out after the detail lookup.
    pub async fn search(
        &self,
        query: &str,
        language: &str,
        channel_id: &str,
        page_token: Option<&str>,
        max_results: u32,
    ) -> Result<SearchPage, YouTubeError> {
        let mut url = format!(
            "{YOUTUBE_API_BASE}/search?key={}&q={}&type=video&maxResults={}&order=relevance&channelId={}&videoEmbeddable=true&safeSearch=strict",
            self.api_key,
            urlencoding::encode(query),
            max_results,
            channel_id
        );
        if language != "all" {
            url.push_str(&format!("&relevanceLanguage={language}"));
        }
        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={token}"));
        }

        let body: SearchResponse = self.get_json(&url).await?;
        let next_page_token = body.next_page_token;
        let ids: Vec<String> = body
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        if ids.is_empty() {
            return Ok(SearchPage::default());
        }

        let videos = self.fetch_details(&ids, language).await?;
        Ok(SearchPage {
            videos,
            next_page_token,
        })
    }

    /// Latest uploads for a channel, for the pre-search feed. The result
    /// language comes from the matching entry in `known_channels` rather
    /// than from any query.
    pub async fn recent_uploads(
        &self,
        channel_id: &str,
        known_channels: &[Channel],
        max_results: u32,
    ) -> Result<Vec<Video>, YouTubeError> {
        let url = format!(
            "{YOUTUBE_API_BASE}/search?key={}&channelId={}&part=snippet&order=date&maxResults={}&type=video&videoEmbeddable=true",
            self.api_key, channel_id, max_results
        );

        let body: SearchResponse = self.get_json(&url).await?;
        let ids: Vec<String> = body
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| item.id.video_id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let language = known_channels
            .iter()
            .find(|c| c.id == channel_id)
            .map(|c| c.language.clone())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        self.fetch_details(&ids, &language).await
    }

    async fn fetch_details(
        &self,
        ids: &[String],
        language: &str,
    ) -> Result<Vec<Video>, YouTubeError> {
        let url = format!(
            "{YOUTUBE_API_BASE}/videos?key={}&id={}&part=contentDetails,snippet,statistics",
            self.api_key,
            ids.join(",")
        );
        let body: VideosResponse = self.get_json(&url).await?;
        Ok(videos_from_details(body, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_decode_to_seconds() {
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT10M"), 600);
        assert_eq!(parse_duration("PT2H"), 7200);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("garbage"), 0);
        assert_eq!(parse_duration("1H2M"), 0);
    }

    #[test]
    fn durations_format_for_display() {
        assert_eq!(format_duration("PT4M13S"), "4m13s");
        assert_eq!(format_duration("PT1H2M3S"), "1h2m3s");
    }

    #[test]
    fn short_videos_are_filtered_out() {
        let body: VideosResponse = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "id": "short1",
                        "snippet": {
                            "title": "A short",
                            "channelTitle": "Chan",
                            "thumbnails": {"high": {"url": "http://t/1.jpg"}}
                        },
                        "contentDetails": {"duration": "PT59S"},
                        "statistics": {"viewCount": "10"}
                    },
                    {
                        "id": "long1",
                        "snippet": {
                            "title": "A lesson",
                            "channelTitle": "Chan",
                            "thumbnails": {"high": {"url": "http://t/2.jpg"}}
                        },
                        "contentDetails": {"duration": "PT1M1S"},
                        "statistics": {"viewCount": "1234"}
                    }
                ]
            }"#,
        )
        .unwrap();

        let videos = videos_from_details(body, "en");
        assert_eq!(videos.len(), 1);
        let video = &videos[0];
        assert_eq!(video.id, "long1");
        assert_eq!(video.duration_sec, 61);
        assert_eq!(video.duration, "1m1s");
        assert_eq!(video.url, "https://www.youtube.com/watch?v=long1");
        assert_eq!(video.view_count, 1234);
        assert_eq!(video.language, "en");
    }

    #[test]
    fn missing_detail_fields_do_not_panic() {
        let body: VideosResponse =
            serde_json::from_str(r#"{"items": [{"id": "bare1"}]}"#).unwrap();
        // No contentDetails means zero duration, which is below the cutoff.
        assert!(videos_from_details(body, "en").is_empty());

        let body: VideosResponse = serde_json::from_str(
            r#"{"items": [{"id": "v1", "contentDetails": {"duration": "PT2M"}}]}"#,
        )
        .unwrap();
        let videos = videos_from_details(body, "ta");
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "");
        assert_eq!(videos[0].thumbnail, "");
        assert_eq!(videos[0].view_count, 0);
    }
}
