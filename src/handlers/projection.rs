// src/handlers/projection.rs
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::error::{PipelineError, Result as PipelineResult};
use crate::models::{ProjectedSeries, ProjectionInput};
use crate::services::calendar::{business_days_between, target_date};
use crate::services::projection::{project, terminal_value};

/// Query parameters arrive as raw strings and are parsed explicitly, so an
/// unparsable number surfaces as `InvalidUserInput` instead of a generic
/// query-rejection. `daily_pct` is a percentage: 0.5 means 0.5% per day.
#[derive(Debug, Deserialize)]
pub struct ProjectionQuery {
    pub current: String,
    pub daily_pct: String,
}

pub(crate) fn parse_user_number(raw: &str, what: &str) -> PipelineResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        PipelineError::InvalidUserInput(format!("{} must be a number, got '{}'", what, raw))
    })
}

pub async fn get_projection(query: ProjectionQuery) -> Result<Json, Rejection> {
    info!("Handling projection request: {:?}", query);

    let run = || -> PipelineResult<(u32, f64, ProjectedSeries)> {
        let current = parse_user_number(&query.current, "current dollar value")?;
        let daily_rate = parse_user_number(&query.daily_pct, "daily percentage change")? / 100.0;

        let today = Utc::now().date_naive();
        let horizon_days = business_days_between(today, target_date());

        let input = ProjectionInput {
            starting_value: current,
            daily_rate,
            horizon_days,
        };
        let series = project(&input)?;
        let terminal = terminal_value(&series, current);
        Ok((horizon_days, terminal, series))
    };

    let (horizon_days, terminal, series) = run().map_err(|e| {
        error!("Projection failed: {}", e);
        warp::reject::custom(ApiError::from(e))
    })?;

    Ok(warp::reply::json(&json!({
        "horizon_days": horizon_days,
        "terminal_value": terminal,
        "series": series,
    })))
}
