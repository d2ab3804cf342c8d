#[macro_use]
extern crate rocket;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use crate::services::clock::Clock;
use crate::services::earnings::EarningsConfig;
use crate::services::outlier_service::OutlierEngine;
use rocket::{Build, Rocket};
use std::sync::Arc;

pub struct AppState {
    pub engine: OutlierEngine,
    pub earnings: EarningsConfig,
    pub clock: Arc<dyn Clock>,
}

/// Mount the API on a Rocket instance managing `state`. CORS is attached by the binary.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .mount(
            "/api",
            routes![
                api::search_videos,
                api::search_with_preset,
                api::list_presets
            ],
        )
        .register(
            "/",
            catchers![api::bad_request, api::unprocessable_entity, api::not_found],
        )
}
