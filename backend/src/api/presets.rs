use crate::services::presets::{FilterPreset, SMART_PRESETS};
use rocket::get;
use rocket::serde::json::Json;

#[get("/presets")]
pub async fn list_presets() -> Json<&'static [FilterPreset]> {
    Json(&SMART_PRESETS[..])
}
