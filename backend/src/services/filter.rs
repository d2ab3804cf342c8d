use crate::models::{Candidate, FilterCriteria};

/// Candidates partitioned into those that continue to scoring and those removed.
#[derive(Debug, Default)]
pub struct FilterResult {
    pub kept: Vec<Candidate>,
    pub removed: Vec<Candidate>,
}

/// All thresholds must hold. An absent subscriber maximum is unbounded.
pub fn passes(candidate: &Candidate, criteria: &FilterCriteria) -> bool {
    let video = &candidate.video;
    let subscribers = candidate.channel.subscriber_count;

    video.view_count >= criteria.min_views
        && video.like_count >= criteria.min_likes
        && subscribers >= criteria.min_subscribers
        && criteria.max_subscribers.map_or(true, |max| subscribers <= max)
}

/// Partition keeps encounter order on both sides.
pub fn apply(candidates: Vec<Candidate>, criteria: &FilterCriteria) -> FilterResult {
    let (kept, removed) = candidates
        .into_iter()
        .partition(|candidate| passes(candidate, criteria));
    FilterResult { kept, removed }
}
