use crate::error::{CatalogError, CriteriaError};
use crate::models::{
    ErrorResponse, FilterCriteria, OutlierResult, PresetSearchRequest, RankedVideo, SearchFilters,
    SearchResponse,
};
use crate::services::earnings::{
    estimate_monthly_earnings, social_blade_url, EarningsConfig, Niche, DEFAULT_CHANNEL_AGE_DAYS,
};
use crate::services::presets::{apply_preset, find_preset};
use crate::utils::format_views_compact;
use crate::AppState;
use log::{error, warn};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{post, State};

fn criteria_error(e: CriteriaError) -> ErrorResponse {
    warn!("Rejected search request: {e}");
    let status = match e {
        CriteriaError::UnknownPreset(_) => Status::NotFound,
        _ => Status::BadRequest,
    };
    ErrorResponse::new(status, "Invalid search request", e.to_string())
}

fn catalog_error(e: CatalogError) -> ErrorResponse {
    error!("YouTube search failed: {e}");
    ErrorResponse::new(Status::BadGateway, "Search failed", e.to_string())
}

fn rank_entry(result: OutlierResult, config: &EarningsConfig) -> RankedVideo {
    let earnings = estimate_monthly_earnings(
        result.channel.view_count,
        DEFAULT_CHANNEL_AGE_DAYS,
        None,
        Niche::Default,
        config,
    );
    RankedVideo {
        earnings_display: earnings.display_range(),
        views_compact: format_views_compact(result.video.view_count),
        social_blade_url: social_blade_url(&result.channel.id),
        earnings,
        result,
    }
}

async fn run_search(
    criteria: FilterCriteria,
    state: &AppState,
) -> Result<Json<SearchResponse>, ErrorResponse> {
    let results = state.engine.search(&criteria).await.map_err(catalog_error)?;

    let results: Vec<RankedVideo> = results
        .into_iter()
        .map(|result| rank_entry(result, &state.earnings))
        .collect();

    Ok(Json(SearchResponse {
        success: true,
        count: results.len(),
        results,
    }))
}

#[post("/youtube/search", data = "<filters>")]
pub async fn search_videos(
    filters: Json<SearchFilters>,
    state: &State<AppState>,
) -> Result<Json<SearchResponse>, ErrorResponse> {
    let criteria = FilterCriteria::try_from(&*filters).map_err(criteria_error)?;
    run_search(criteria, state).await
}

#[post("/youtube/search/preset/<preset_id>", data = "<request>")]
pub async fn search_with_preset(
    preset_id: &str,
    request: Json<PresetSearchRequest>,
    state: &State<AppState>,
) -> Result<Json<SearchResponse>, ErrorResponse> {
    let preset = find_preset(preset_id)
        .ok_or_else(|| criteria_error(CriteriaError::UnknownPreset(preset_id.to_string())))?;
    let criteria =
        apply_preset(preset, &request.keywords, state.clock.now()).map_err(criteria_error)?;
    run_search(criteria, state).await
}
