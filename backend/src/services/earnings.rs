use crate::utils::format_thousands;
use serde::{Deserialize, Serialize};

/// Channel age assumed when the real creation date is unknown.
pub const DEFAULT_CHANNEL_AGE_DAYS: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Niche {
    #[default]
    Default,
    Music,
    Gaming,
    Finance,
    Tech,
    Education,
    Lifestyle,
    Entertainment,
}

impl Niche {
    /// Gross CPM range in USD per 1000 views.
    pub fn cpm_range(self) -> (f64, f64) {
        match self {
            Niche::Default => (0.25, 4.0),
            Niche::Music => (0.5, 2.0),
            Niche::Gaming => (0.5, 3.0),
            Niche::Finance => (3.0, 12.0),
            Niche::Tech => (2.0, 8.0),
            Niche::Education => (2.0, 6.0),
            Niche::Lifestyle => (1.0, 4.0),
            Niche::Entertainment => (0.5, 3.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Product heuristics, not derived constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarningsConfig {
    /// Active channels are assumed to earn at least this share of their lifetime views each month.
    pub min_monthly_share: f64,
    /// Uploads per month assumed when scaling one recent video's views.
    pub videos_per_month: f64,
    /// Estimated monthly views above this give medium confidence.
    pub medium_confidence_views: f64,
}

impl Default for EarningsConfig {
    fn default() -> Self {
        Self {
            min_monthly_share: 0.15,
            videos_per_month: 4.0,
            medium_confidence_views: 50_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsEstimate {
    pub monthly_min: u64,
    pub monthly_max: u64,
    pub confidence: Confidence,
    pub monthly_views: u64,
}

impl EarningsEstimate {
    pub fn display_range(&self) -> String {
        if self.monthly_max < 1 {
            return "< $1".to_string();
        }
        format!(
            "${} - ${}",
            format_thousands(self.monthly_min),
            format_thousands(self.monthly_max)
        )
    }
}

/// Rough monthly earnings from public view counts.
pub fn estimate_monthly_earnings(
    total_views: u64,
    channel_age_days: f64,
    recent_video_views: Option<u64>,
    niche: Niche,
    config: &EarningsConfig,
) -> EarningsEstimate {
    let recent = recent_video_views.filter(|views| *views > 0);

    let monthly_views = match recent {
        Some(views) => views as f64 * config.videos_per_month,
        None => {
            let months_active = (channel_age_days / 30.0).max(1.0);
            let base = total_views as f64 / months_active;
            base.max(total_views as f64 * config.min_monthly_share)
        }
    };

    let (cpm_min, cpm_max) = niche.cpm_range();
    let confidence = if recent.is_some() {
        Confidence::High
    } else if monthly_views > config.medium_confidence_views {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    EarningsEstimate {
        monthly_min: (monthly_views / 1000.0 * cpm_min).round() as u64,
        monthly_max: (monthly_views / 1000.0 * cpm_max).round() as u64,
        confidence,
        monthly_views: monthly_views.round() as u64,
    }
}

pub fn social_blade_url(channel_id: &str) -> String {
    format!("https://socialblade.com/youtube/channel/{channel_id}")
}
