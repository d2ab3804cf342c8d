#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, SecondsFormat, TimeZone, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use vidradar_backend::error::CatalogError;
use vidradar_backend::models::Channel;
use vidradar_backend::services::channel_cache::ChannelCache;
use vidradar_backend::services::clock::ManualClock;
use vidradar_backend::services::outlier_service::OutlierEngine;
use vidradar_backend::services::scoring::ScoringWeights;
use vidradar_backend::services::youtube_client::{
    CatalogProvider, CatalogQuery, SearchHit, VideoDetails,
};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// In-memory catalog that records every call it receives.
#[derive(Default)]
pub struct FakeCatalog {
    pub hits: Mutex<Vec<SearchHit>>,
    pub details: Mutex<HashMap<String, VideoDetails>>,
    pub channels: Mutex<HashMap<String, Channel>>,
    pub search_failure: Mutex<Option<CatalogError>>,
    pub failing_channel_ids: Mutex<HashSet<String>>,
    pub failing_video_ids: Mutex<HashSet<String>>,
    pub queries: Mutex<Vec<CatalogQuery>>,
    pub video_batches: Mutex<Vec<Vec<String>>>,
    pub channel_batches: Mutex<Vec<Vec<String>>>,
}

impl FakeCatalog {
    /// Adds a video with the given stats on `channel_id`, published `days_old` days before `now`.
    pub fn add_video(
        &self,
        video_id: &str,
        channel_id: &str,
        views: u64,
        likes: u64,
        now: DateTime<Utc>,
        days_old: i64,
    ) {
        let published_at = (now - Duration::days(days_old)).to_rfc3339_opts(SecondsFormat::Secs, true);
        self.hits.lock().unwrap().push(SearchHit {
            video_id: video_id.to_string(),
            title: format!("Video {video_id}"),
            description: String::new(),
            channel_id: channel_id.to_string(),
            channel_title: format!("Channel {channel_id}"),
            published_at,
            thumbnail_url: String::new(),
        });
        self.details.lock().unwrap().insert(
            video_id.to_string(),
            VideoDetails {
                id: video_id.to_string(),
                view_count: views,
                like_count: likes,
                comment_count: 0,
                duration: "PT10M".to_string(),
            },
        );
    }

    /// Adds a channel whose per-video average is `average_views`.
    pub fn add_channel(&self, channel_id: &str, subscribers: u64, average_views: u64) {
        self.channels.lock().unwrap().insert(
            channel_id.to_string(),
            Channel {
                id: channel_id.to_string(),
                title: format!("Channel {channel_id}"),
                description: String::new(),
                thumbnail_url: String::new(),
                subscriber_count: subscribers,
                video_count: 100,
                view_count: average_views * 100,
            },
        );
    }

    pub fn channel_fetches_for(&self, channel_id: &str) -> usize {
        self.channel_batches
            .lock()
            .unwrap()
            .iter()
            .filter(|batch| batch.iter().any(|id| id == channel_id))
            .count()
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn search_videos(&self, query: &CatalogQuery) -> Result<Vec<SearchHit>, CatalogError> {
        self.queries.lock().unwrap().push(query.clone());
        if let Some(err) = self.search_failure.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.hits.lock().unwrap().clone())
    }

    async fn video_details(&self, ids: &[String]) -> Result<Vec<VideoDetails>, CatalogError> {
        self.video_batches.lock().unwrap().push(ids.to_vec());
        let failing = self.failing_video_ids.lock().unwrap();
        if ids.iter().any(|id| failing.contains(id)) {
            return Err(CatalogError::Status {
                status: 500,
                message: "backend error".to_string(),
            });
        }
        let details = self.details.lock().unwrap();
        Ok(ids.iter().filter_map(|id| details.get(id).cloned()).collect())
    }

    async fn channel_details(&self, ids: &[String]) -> Result<Vec<Channel>, CatalogError> {
        self.channel_batches.lock().unwrap().push(ids.to_vec());
        let failing = self.failing_channel_ids.lock().unwrap();
        if ids.iter().any(|id| failing.contains(id)) {
            return Err(CatalogError::Status {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        let channels = self.channels.lock().unwrap();
        Ok(ids.iter().filter_map(|id| channels.get(id).cloned()).collect())
    }
}

pub struct Harness {
    pub catalog: Arc<FakeCatalog>,
    pub clock: Arc<ManualClock>,
    pub cache: Arc<ChannelCache>,
    pub engine: OutlierEngine,
}

pub fn harness() -> Harness {
    let catalog = Arc::new(FakeCatalog::default());
    let clock = Arc::new(ManualClock::new(start_time()));
    let cache = Arc::new(ChannelCache::with_default_ttl(clock.clone()));
    let engine = OutlierEngine::new(
        catalog.clone(),
        cache.clone(),
        clock.clone(),
        ScoringWeights::default(),
    );
    Harness {
        catalog,
        clock,
        cache,
        engine,
    }
}
