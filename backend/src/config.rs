use crate::services::channel_cache::{ChannelCache, DEFAULT_CHANNEL_TTL_HOURS};
use crate::services::clock::{Clock, SystemClock};
use crate::services::earnings::EarningsConfig;
use crate::services::outlier_service::OutlierEngine;
use crate::services::scoring::ScoringWeights;
use crate::services::youtube_client::{YouTubeClient, DEFAULT_YOUTUBE_API_BASE};
use crate::AppState;
use anyhow::{Context, Result};
use env_logger::Builder;
use lazy_static::lazy_static;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;
use std::sync::Arc;
use std::time::Duration;

lazy_static! {
    pub static ref YOUTUBE_API_KEY: Option<String> = env::var("YOUTUBE_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    pub static ref YOUTUBE_API_BASE: String =
        env::var("YOUTUBE_API_BASE").unwrap_or_else(|_| DEFAULT_YOUTUBE_API_BASE.to_string());
    pub static ref CHANNEL_CACHE_TTL_HOURS: i64 =
        parse_ttl_hours(env::var("CHANNEL_CACHE_TTL_HOURS").ok().as_deref());
    pub static ref HTTP_TIMEOUT_SECS: u64 = env::var("HTTP_TIMEOUT_SECS")
        .unwrap_or_else(|_| "15".to_string())
        .parse::<u64>()
        .unwrap_or(15);
    pub static ref CORS_ALLOWED_ORIGIN: String =
        env::var("CORS_ALLOWED_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());
}

/// Cache lifetime in hours. Unset, unparseable or non-positive values use the default.
pub fn parse_ttl_hours(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|hours| *hours > 0)
        .unwrap_or(DEFAULT_CHANNEL_TTL_HOURS)
}

pub fn init_logger() {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();
    info!("Starting outlier search backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_youtube_client() -> Result<YouTubeClient> {
    let api_key = YOUTUBE_API_KEY
        .clone()
        .context("YOUTUBE_API_KEY environment variable must be set")?;
    let base_url = &*YOUTUBE_API_BASE;
    info!("Using YouTube Data API at: {base_url}");

    YouTubeClient::new(api_key, base_url, Duration::from_secs(*HTTP_TIMEOUT_SECS))
        .context("Failed to build YouTube HTTP client")
}

pub fn create_app_state() -> Result<AppState> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let provider = Arc::new(create_youtube_client()?);
    let cache = Arc::new(ChannelCache::new(
        chrono::Duration::hours(*CHANNEL_CACHE_TTL_HOURS),
        clock.clone(),
    ));

    let engine = OutlierEngine::new(provider, cache, clock.clone(), ScoringWeights::default());

    Ok(AppState {
        engine,
        earnings: EarningsConfig::default(),
        clock,
    })
}

pub fn create_cors() -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[CORS_ALLOWED_ORIGIN.as_str()]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&[
            "Authorization",
            "Accept",
            "Content-Type",
        ]))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
