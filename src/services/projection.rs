// src/services/projection.rs
use crate::error::{PipelineError, Result};
use crate::models::{ProjectedPoint, ProjectedSeries, ProjectionInput};

/// Pure geometric compounding: `value[i] = starting_value * (1 + rate)^i`
/// for `i` in `[0, horizon_days)`. A zero horizon yields an empty series.
/// All arithmetic stays in f64; rounding happens only at presentation time.
pub fn project(input: &ProjectionInput) -> Result<ProjectedSeries> {
    if input.starting_value <= 0.0 {
        return Err(PipelineError::InvalidInput(format!(
            "starting value must be positive, got {}",
            input.starting_value
        )));
    }

    let growth = 1.0 + input.daily_rate;
    Ok((0..input.horizon_days)
        .map(|i| ProjectedPoint {
            day_index: i,
            value: input.starting_value * growth.powi(i as i32),
        })
        .collect())
}

/// Last projected value, or the starting value when the horizon is zero.
pub fn terminal_value(series: &[ProjectedPoint], starting_value: f64) -> f64 {
    series.last().map(|p| p.value).unwrap_or(starting_value)
}
