use crate::error::CatalogError;
use crate::models::Channel;
use crate::utils::parse_count;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Parameters for the one item-search call a search makes.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogQuery {
    pub keywords: String,
    pub language: Option<String>,
    pub region: Option<String>,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub page_size: usize,
}

/// Minimal item metadata returned by the search endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: String,
    pub thumbnail_url: String,
}

/// Statistics and content details for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoDetails {
    pub id: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration: String,
}

/// The three lookups the engine needs from the video platform. Batch calls
/// receive at most `catalog::MAX_BATCH_SIZE` ids.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn search_videos(&self, query: &CatalogQuery) -> Result<Vec<SearchHit>, CatalogError>;

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoDetails>, CatalogError>;

    async fn channel_details(&self, ids: &[String]) -> Result<Vec<Channel>, CatalogError>;
}

// Wire shapes. Documentation: https://developers.google.com/youtube/v3/docs

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
}

impl Thumbnails {
    fn best_url(self) -> String {
        self.high
            .or(self.medium)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SearchSnippet {
    title: String,
    description: String,
    channel_id: String,
    channel_title: String,
    published_at: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: SearchItemId,
    #[serde(default)]
    snippet: SearchSnippet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct VideoStatistics {
    view_count: Option<String>,
    like_count: Option<String>,
    comment_count: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentDetails {
    duration: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    #[serde(default)]
    statistics: VideoStatistics,
    #[serde(default)]
    content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChannelSnippet {
    title: String,
    description: String,
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ChannelStatistics {
    subscriber_count: Option<String>,
    video_count: Option<String>,
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    id: String,
    #[serde(default)]
    snippet: ChannelSnippet,
    #[serde(default)]
    statistics: ChannelStatistics,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiErrorDetail {
    message: Option<String>,
}

/// YouTube Data API v3 client.
pub struct YouTubeClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, CatalogError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(YouTubeClient {
            http,
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, resource: &str, params: &[(&str, String)]) -> Result<Url, CatalogError> {
        let mut url = Url::parse(&format!("{}/{resource}", self.base_url))
            .map_err(|e| CatalogError::Decode(format!("invalid API base URL: {e}")))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("key", &self.api_key);
        Ok(url)
    }

    async fn get_list<T: DeserializeOwned + Send>(
        &self,
        resource: &str,
        params: &[(&str, String)],
        fallback_message: &str,
    ) -> Result<Vec<T>, CatalogError> {
        let url = self.endpoint(resource, params)?;
        debug!("GET {resource} ({} params)", params.len());

        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response, fallback_message).await);
        }

        let body = response.text().await?;
        let list: ListResponse<T> =
            serde_json::from_str(&body).map_err(|e| CatalogError::Decode(e.to_string()))?;
        Ok(list.items)
    }
}

async fn status_error(response: Response, fallback_message: &str) -> CatalogError {
    let status = response.status().as_u16();
    let message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.error)
        .and_then(|detail| detail.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback_message.to_string());
    CatalogError::Status { status, message }
}

fn search_params(query: &CatalogQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("part", "snippet".to_string()),
        ("type", "video".to_string()),
        ("maxResults", query.page_size.to_string()),
        ("q", query.keywords.clone()),
    ];
    if let Some(language) = &query.language {
        params.push(("relevanceLanguage", language.clone()));
    }
    if let Some(region) = &query.region {
        params.push(("regionCode", region.clone()));
    }
    if let Some(after) = query.published_after {
        params.push(("publishedAfter", after.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    if let Some(before) = query.published_before {
        params.push(("publishedBefore", before.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    params
}

#[async_trait]
impl CatalogProvider for YouTubeClient {
    async fn search_videos(&self, query: &CatalogQuery) -> Result<Vec<SearchHit>, CatalogError> {
        let items: Vec<SearchItem> = self
            .get_list("search", &search_params(query), "YouTube API search failed")
            .await?;

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id.filter(|id| !id.is_empty())?;
                let snippet = item.snippet;
                Some(SearchHit {
                    video_id,
                    title: snippet.title,
                    description: snippet.description,
                    channel_id: snippet.channel_id,
                    channel_title: snippet.channel_title,
                    published_at: snippet.published_at,
                    thumbnail_url: snippet.thumbnails.best_url(),
                })
            })
            .collect())
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoDetails>, CatalogError> {
        let params = [
            ("part", "statistics,contentDetails".to_string()),
            ("id", ids.join(",")),
        ];
        let items: Vec<VideoItem> = self
            .get_list("videos", &params, "YouTube API video lookup failed")
            .await?;

        Ok(items
            .into_iter()
            .map(|item| VideoDetails {
                id: item.id,
                view_count: parse_count(item.statistics.view_count.as_deref()),
                like_count: parse_count(item.statistics.like_count.as_deref()),
                comment_count: parse_count(item.statistics.comment_count.as_deref()),
                duration: item.content_details.duration,
            })
            .collect())
    }

    async fn channel_details(&self, ids: &[String]) -> Result<Vec<Channel>, CatalogError> {
        let params = [("part", "snippet,statistics".to_string()), ("id", ids.join(","))];
        let items: Vec<ChannelItem> = self
            .get_list("channels", &params, "YouTube API channel lookup failed")
            .await?;

        Ok(items
            .into_iter()
            .map(|item| Channel {
                id: item.id,
                title: item.snippet.title,
                description: item.snippet.description,
                thumbnail_url: item.snippet.thumbnails.best_url(),
                subscriber_count: parse_count(item.statistics.subscriber_count.as_deref()),
                video_count: parse_count(item.statistics.video_count.as_deref()),
                view_count: parse_count(item.statistics.view_count.as_deref()),
            })
            .collect())
    }
}
