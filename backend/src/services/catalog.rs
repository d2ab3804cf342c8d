use crate::error::CatalogError;
use crate::models::{Candidate, Channel, FilterCriteria, Video};
use crate::services::channel_cache::ChannelCache;
use crate::services::youtube_client::{CatalogProvider, CatalogQuery, SearchHit, VideoDetails};
use crate::utils::{parse_iso8601_duration_to_seconds, parse_iso8601_to_datetime};
use futures::future::join_all;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Provider hard limit on ids per detail request.
pub const MAX_BATCH_SIZE: usize = 50;
/// The search call always asks for a full page; quota cost is the same for 1 or 50.
pub const SEARCH_PAGE_SIZE: usize = 50;

/// Split ids into consecutive chunks of at most `size` ids.
pub fn chunk_ids(ids: &[String], size: usize) -> Vec<&[String]> {
    ids.chunks(size.max(1)).collect()
}

/// First-seen order, duplicates removed.
pub fn distinct_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

impl From<&FilterCriteria> for CatalogQuery {
    fn from(criteria: &FilterCriteria) -> Self {
        CatalogQuery {
            keywords: criteria.keywords.clone(),
            language: criteria.language.clone(),
            region: criteria.region.clone(),
            published_after: criteria.published_after,
            published_before: criteria.published_before,
            page_size: SEARCH_PAGE_SIZE,
        }
    }
}

/// Turns filter criteria into joined (video, channel) candidates.
pub struct CatalogQueryAdapter {
    provider: Arc<dyn CatalogProvider>,
    cache: Arc<ChannelCache>,
}

impl CatalogQueryAdapter {
    pub fn new(provider: Arc<dyn CatalogProvider>, cache: Arc<ChannelCache>) -> Self {
        CatalogQueryAdapter { provider, cache }
    }

    /// Only a failed search call is an error. Failed detail batches shrink
    /// the candidate pool instead.
    pub async fn fetch_candidates(
        &self,
        criteria: &FilterCriteria,
    ) -> Result<Vec<Candidate>, CatalogError> {
        let hits = self
            .provider
            .search_videos(&CatalogQuery::from(criteria))
            .await?;
        if hits.is_empty() {
            return Ok(Vec::new());
        }

        let video_ids = distinct_ids(hits.iter().map(|h| h.video_id.as_str()));
        let channel_ids = distinct_ids(hits.iter().map(|h| h.channel_id.as_str()));

        let (details, channels) = tokio::join!(
            self.fetch_video_details(&video_ids),
            self.resolve_channels(&channel_ids)
        );

        let candidates = join_candidates(hits, &details, &channels);
        info!(
            "Joined {} candidates from {} videos / {} channels",
            candidates.len(),
            video_ids.len(),
            channel_ids.len()
        );
        Ok(candidates)
    }

    async fn fetch_video_details(&self, ids: &[String]) -> HashMap<String, VideoDetails> {
        let batches = chunk_ids(ids, MAX_BATCH_SIZE);
        let responses = join_all(batches.iter().map(|batch| self.provider.video_details(batch))).await;

        let mut details = HashMap::new();
        for (batch, response) in batches.iter().zip(responses) {
            match response {
                Ok(items) => {
                    for item in items {
                        details.insert(item.id.clone(), item);
                    }
                }
                Err(e) => warn!("Video detail batch of {} ids failed: {e}", batch.len()),
            }
        }
        details
    }

    async fn resolve_channels(&self, ids: &[String]) -> HashMap<String, Channel> {
        let mut channels = HashMap::new();
        let mut uncached = Vec::new();

        for id in ids {
            match self.cache.get(id) {
                Some(channel) => {
                    channels.insert(id.clone(), channel);
                }
                None => uncached.push(id.clone()),
            }
        }
        debug!(
            "Channel cache: {} hits, {} misses",
            channels.len(),
            uncached.len()
        );

        if uncached.is_empty() {
            return channels;
        }

        let batches = chunk_ids(&uncached, MAX_BATCH_SIZE);
        let responses =
            join_all(batches.iter().map(|batch| self.provider.channel_details(batch))).await;

        for (batch, response) in batches.iter().zip(responses) {
            match response {
                Ok(items) => {
                    for channel in items {
                        self.cache.put(channel.clone());
                        channels.insert(channel.id.clone(), channel);
                    }
                }
                Err(e) => warn!("Channel detail batch of {} ids failed: {e}", batch.len()),
            }
        }
        channels
    }
}

/// Join hits with their details in encounter order. Hits missing details,
/// a channel or a parseable publish time are dropped.
fn join_candidates(
    hits: Vec<SearchHit>,
    details: &HashMap<String, VideoDetails>,
    channels: &HashMap<String, Channel>,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::with_capacity(hits.len());

    for hit in hits {
        if !seen.insert(hit.video_id.clone()) {
            continue;
        }
        let (Some(detail), Some(channel)) = (details.get(&hit.video_id), channels.get(&hit.channel_id))
        else {
            debug!("Dropping {}: missing details or channel", hit.video_id);
            continue;
        };
        let Some(published_at) = parse_iso8601_to_datetime(&hit.published_at) else {
            debug!("Dropping {}: unparseable publish time '{}'", hit.video_id, hit.published_at);
            continue;
        };

        candidates.push(Candidate {
            video: Video {
                id: hit.video_id,
                title: hit.title,
                description: hit.description,
                channel_id: hit.channel_id,
                channel_title: hit.channel_title,
                published_at,
                thumbnail_url: hit.thumbnail_url,
                view_count: detail.view_count,
                like_count: detail.like_count,
                comment_count: detail.comment_count,
                duration: detail.duration.clone(),
                duration_seconds: parse_iso8601_duration_to_seconds(&detail.duration),
            },
            channel: channel.clone(),
        });
    }
    candidates
}
