// src/services/trend.rs
use crate::error::{PipelineError, Result};
use crate::models::ReserveRecord;

/// Relative change between the two most recent records of an
/// ascending-sorted series: `(latest - previous) / previous`. A zero
/// previous amount leaves the relative change undefined and is reported as
/// `InsufficientData` rather than propagating an infinity.
pub fn day_over_day_change(series: &[ReserveRecord]) -> Result<f64> {
    if series.len() < 2 {
        return Err(PipelineError::InsufficientData);
    }
    let latest = series[series.len() - 1].amount;
    let previous = series[series.len() - 2].amount;
    if previous == 0.0 {
        return Err(PipelineError::InsufficientData);
    }
    Ok((latest - previous) / previous)
}
