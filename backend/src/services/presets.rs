use crate::error::CriteriaError;
use crate::models::FilterCriteria;
use crate::services::catalog::SEARCH_PAGE_SIZE;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetValues {
    pub min_views: Option<u64>,
    pub min_likes: Option<u64>,
    pub min_subscribers: Option<u64>,
    pub max_subscribers: Option<u64>,
    pub published_after_days: Option<i64>,
    pub max_results: Option<usize>,
}

/// A named filter shortcut offered next to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub values: PresetValues,
}

pub static SMART_PRESETS: [FilterPreset; 5] = [
    FilterPreset {
        id: "rising-stars",
        name: "Rising Stars",
        description: "Small channels with a video that took off this week",
        values: PresetValues {
            min_views: Some(50_000),
            min_likes: Some(2_000),
            min_subscribers: None,
            max_subscribers: Some(10_000),
            published_after_days: Some(7),
            max_results: Some(50),
        },
    },
    FilterPreset {
        id: "hidden-virals",
        name: "Hidden Virals",
        description: "Videos far above their channel's usual view count",
        values: PresetValues {
            min_views: Some(100_000),
            min_likes: Some(3_000),
            min_subscribers: None,
            max_subscribers: Some(50_000),
            published_after_days: Some(30),
            max_results: Some(50),
        },
    },
    FilterPreset {
        id: "raw-diamonds",
        name: "Raw Diamonds",
        description: "Micro channels with highly engaged audiences",
        values: PresetValues {
            min_views: Some(5_000),
            min_likes: Some(400),
            min_subscribers: None,
            max_subscribers: Some(1_000),
            published_after_days: Some(14),
            max_results: Some(50),
        },
    },
    FilterPreset {
        id: "high-momentum",
        name: "High Momentum",
        description: "Recent videos gaining thousands of views per day",
        values: PresetValues {
            min_views: Some(30_000),
            min_likes: Some(1_500),
            min_subscribers: None,
            max_subscribers: Some(100_000),
            published_after_days: Some(3),
            max_results: Some(50),
        },
    },
    FilterPreset {
        id: "monetization-ready",
        name: "Monetization Ready",
        description: "Channels close to the monetization threshold",
        values: PresetValues {
            min_views: Some(50_000),
            min_likes: Some(2_000),
            min_subscribers: Some(500),
            max_subscribers: Some(1_500),
            published_after_days: Some(30),
            max_results: Some(50),
        },
    },
];

pub fn find_preset(id: &str) -> Option<&'static FilterPreset> {
    SMART_PRESETS.iter().find(|preset| preset.id == id)
}

/// Build criteria for `keywords` from a preset. `publishedAfterDays` counts
/// back from the start of `today`.
pub fn apply_preset(
    preset: &FilterPreset,
    keywords: &str,
    today: DateTime<Utc>,
) -> Result<FilterCriteria, CriteriaError> {
    let keywords = keywords.trim();
    if keywords.is_empty() {
        return Err(CriteriaError::EmptyKeywords);
    }

    let values = preset.values;
    let published_after = values.published_after_days.map(|days| {
        let day = (today - Duration::days(days)).date_naive();
        day.and_time(chrono::NaiveTime::MIN).and_utc()
    });

    Ok(FilterCriteria {
        published_after,
        min_views: values.min_views.unwrap_or(0),
        min_likes: values.min_likes.unwrap_or(0),
        min_subscribers: values.min_subscribers.unwrap_or(0),
        max_subscribers: values.max_subscribers,
        max_results: values
            .max_results
            .unwrap_or(SEARCH_PAGE_SIZE)
            .clamp(1, SEARCH_PAGE_SIZE),
        ..FilterCriteria::for_keywords(keywords)
    })
}
