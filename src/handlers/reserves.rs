// src/handlers/reserves.rs
use log::{error, info};
use serde_json::json;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::reserves::{fetch_from_bcra, LoaderParams, BCRA_RESERVES_URL};
use crate::services::trend::day_over_day_change;

pub async fn get_reserves() -> Result<Json, Rejection> {
    info!("Handling request for the BCRA reserves series");

    let series = fetch_from_bcra(BCRA_RESERVES_URL, &LoaderParams::scraped())
        .await
        .map_err(|e| {
            error!("Failed to fetch reserves: {}", e);
            warp::reject::custom(ApiError::from(e))
        })?;

    let trend = day_over_day_change(&series).map_err(|e| {
        error!("Failed to compute reserves trend: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&json!({
        "series": series,
        "trend": trend,
    })))
}
