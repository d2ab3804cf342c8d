use crate::services::earnings::EarningsEstimate;
use chrono::{DateTime, Utc};
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::{response, Response};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnail_url: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub duration: String,       // ISO8601, e.g. PT4M13S
    pub duration_seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub subscriber_count: u64,
    pub video_count: u64,
    pub view_count: u64,
}

/// The four raw signals behind an outlier score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreComponents {
    pub view_ratio: f64,
    pub engagement_rate: f64,
    pub velocity_score: f64,
    pub channel_potential: f64,
}

/// A video joined with its channel, before filtering and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub video: Video,
    pub channel: Channel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierResult {
    pub video: Video,
    pub channel: Channel,
    pub outlier_score: f64,
    pub score_components: ScoreComponents,
}

/// Numeric form fields arrive either as JSON numbers or as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

/// Search request body as sent by the web UI. Nothing here is trusted yet;
/// see `services::criteria` for the parsing step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub keywords: String,
    pub language: Option<String>,
    pub country: Option<String>,
    pub published_after: Option<String>,
    pub published_before: Option<String>,
    pub min_views: Option<NumericInput>,
    pub min_likes: Option<NumericInput>,
    pub min_subscribers: Option<NumericInput>,
    pub max_subscribers: Option<NumericInput>,
    pub max_results: Option<NumericInput>,
}

/// Validated search parameters. Every threshold is numeric by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub keywords: String,
    pub language: Option<String>,
    pub region: Option<String>,
    pub published_after: Option<DateTime<Utc>>,
    pub published_before: Option<DateTime<Utc>>,
    pub min_views: u64,
    pub min_likes: u64,
    pub min_subscribers: u64,
    pub max_subscribers: Option<u64>,
    pub max_results: usize,
}

impl FilterCriteria {
    /// Criteria with only a keyword set and every threshold at its default.
    pub fn for_keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            language: None,
            region: None,
            published_after: None,
            published_before: None,
            min_views: 0,
            min_likes: 0,
            min_subscribers: 0,
            max_subscribers: None,
            max_results: crate::services::catalog::SEARCH_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PresetSearchRequest {
    pub keywords: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedVideo {
    #[serde(flatten)]
    pub result: OutlierResult,
    pub earnings: EarningsEstimate,
    pub earnings_display: String,
    pub views_compact: String,
    pub social_blade_url: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Vec<RankedVideo>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip)]
    pub status: Status,
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: Status, error: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            error: error.to_string(),
            message: message.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let json = serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string());
        Response::build()
            .status(self.status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}
