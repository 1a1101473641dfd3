// src/handlers/dashboard.rs
use chrono::Utc;
use log::{error, info};
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use super::projection::{parse_user_number, ProjectionQuery};
use crate::error::Result as PipelineResult;
use crate::models::DashboardPayload;
use crate::services::classifier::ThreadRngSource;
use crate::services::dashboard::{build_dashboard, DashboardOptions};
use crate::services::reserves::{load_from_path, LoaderParams, DEFAULT_LOCAL_CSV};

pub async fn get_dashboard(query: ProjectionQuery) -> Result<Json, Rejection> {
    info!("Handling dashboard request: {:?}", query);

    let run = || -> PipelineResult<DashboardPayload> {
        let current = parse_user_number(&query.current, "current dollar value")?;
        let daily_rate = parse_user_number(&query.daily_pct, "daily percentage change")? / 100.0;

        let series = load_from_path(DEFAULT_LOCAL_CSV, &LoaderParams::local())?;
        build_dashboard(
            &series,
            current,
            daily_rate,
            Utc::now().date_naive(),
            &DashboardOptions::default(),
            &mut ThreadRngSource,
        )
    };

    let payload = run().map_err(|e| {
        error!("Dashboard pipeline failed: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&payload))
}
