use crate::models::{Candidate, Channel, OutlierResult, ScoreComponents, Video};
use crate::utils::days_between;
use chrono::{DateTime, Utc};

/// A single breakout video contributes at most this multiple of the channel baseline.
pub const VIEW_RATIO_CAP: f64 = 10.0;

/// Weights of the normalized components in the final score. Changing them
/// makes scores incomparable with previously stored results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub view: f64,
    pub velocity: f64,
    pub engagement: f64,
    pub potential: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            view: 0.4,
            velocity: 0.3,
            engagement: 0.2,
            potential: 0.1,
        }
    }
}

pub fn view_ratio(video: &Video, channel: &Channel) -> f64 {
    let channel_average = channel.view_count as f64 / (channel.video_count.max(1)) as f64;
    (video.view_count as f64 / channel_average.max(1.0)).min(VIEW_RATIO_CAP)
}

/// Likes per hundred views.
pub fn engagement_rate(video: &Video) -> f64 {
    video.like_count as f64 / (video.view_count.max(1)) as f64 * 100.0
}

/// Views per day since publish, with a one-day floor.
pub fn velocity_score(video: &Video, now: DateTime<Utc>) -> f64 {
    let days = days_between(video.published_at, now).max(1.0);
    video.view_count as f64 / days
}

/// High for tiny channels, decaying with subscriber count.
pub fn channel_potential(channel: &Channel) -> f64 {
    let subscribers = channel.subscriber_count.max(10) as f64;
    1.0 / (subscribers + 1.0).log10()
}

pub fn components(video: &Video, channel: &Channel, now: DateTime<Utc>) -> ScoreComponents {
    ScoreComponents {
        view_ratio: view_ratio(video, channel),
        engagement_rate: engagement_rate(video),
        velocity_score: velocity_score(video, now),
        channel_potential: channel_potential(channel),
    }
}

/// Normalize each component to 0..=100, take the weighted sum, round to one decimal.
pub fn final_score(components: &ScoreComponents, weights: &ScoringWeights) -> f64 {
    let normalized_view = (components.view_ratio * 10.0).min(100.0);
    let normalized_velocity = ((components.velocity_score + 1.0).log10() * 20.0).min(100.0);
    let normalized_engagement = (components.engagement_rate * 10.0).min(100.0);
    let normalized_potential = (components.channel_potential * 1000.0).min(100.0);

    let score = normalized_view * weights.view
        + normalized_velocity * weights.velocity
        + normalized_engagement * weights.engagement
        + normalized_potential * weights.potential;

    (score * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Default)]
pub struct OutlierScorer {
    weights: ScoringWeights,
}

impl OutlierScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, candidate: Candidate, now: DateTime<Utc>) -> OutlierResult {
        let score_components = components(&candidate.video, &candidate.channel, now);
        OutlierResult {
            outlier_score: final_score(&score_components, &self.weights),
            score_components,
            video: candidate.video,
            channel: candidate.channel,
        }
    }
}
