//! Validation functions for API query parameters

use api_types::ErrorResponse;
use chrono::NaiveDate;
use clickhouse_lib::{ApproachFilter, HazardFilter, Range};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Query parameters accepted by the `/approaches` endpoint.
///
/// Every parameter is optional; omitted values fall back to the dashboard
/// defaults of [`ApproachFilter::default`].
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ApproachQuery {
    /// First approach date, `YYYY-MM-DD` (inclusive, default 2000-01-01)
    pub start_date: Option<NaiveDate>,
    /// Last approach date, `YYYY-MM-DD` (inclusive, default today)
    pub end_date: Option<NaiveDate>,
    /// Minimum miss distance in AU
    pub au_min: Option<f64>,
    /// Maximum miss distance in AU
    pub au_max: Option<f64>,
    /// Minimum miss distance in lunar distances
    pub ld_min: Option<f64>,
    /// Maximum miss distance in lunar distances
    pub ld_max: Option<f64>,
    /// Minimum relative velocity in km/h
    pub velocity_min: Option<f64>,
    /// Maximum relative velocity in km/h
    pub velocity_max: Option<f64>,
    /// Minimum of the maximum estimated diameter in km
    pub diameter_min: Option<f64>,
    /// Maximum of the maximum estimated diameter in km
    pub diameter_max: Option<f64>,
    /// Hazard selector: `all`, `yes` or `no`
    pub hazardous: Option<String>,
}

fn merge_range(base: Range, min: Option<f64>, max: Option<f64>) -> Range {
    Range::new(min.unwrap_or(base.min), max.unwrap_or(base.max))
}

/// Build and validate the approach filter described by the query parameters.
pub fn resolve_approach_filter(params: &ApproachQuery) -> Result<ApproachFilter, ErrorResponse> {
    let defaults = ApproachFilter::default();
    let hazardous = match params.hazardous.as_deref() {
        Some(raw) => raw
            .parse::<HazardFilter>()
            .map_err(|e| ErrorResponse::invalid_params(e.to_string()))?,
        None => defaults.hazardous,
    };

    let filter = ApproachFilter {
        start_date: params.start_date.unwrap_or(defaults.start_date),
        end_date: params.end_date.unwrap_or(defaults.end_date),
        astronomical: merge_range(defaults.astronomical, params.au_min, params.au_max),
        lunar: merge_range(defaults.lunar, params.ld_min, params.ld_max),
        velocity: merge_range(defaults.velocity, params.velocity_min, params.velocity_max),
        diameter: merge_range(defaults.diameter, params.diameter_min, params.diameter_max),
        hazardous,
    };

    filter.validate().map_err(|e| {
        tracing::warn!(error = %e, "Rejected approach filter");
        ErrorResponse::invalid_params(e.to_string())
    })?;
    Ok(filter)
}
