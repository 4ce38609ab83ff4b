//! Report Routes
//!
//! - GET /api/v1/report/purchases - Purchase Report view model
//! - GET /api/v1/report/chart - Spending chart geometry

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ChartQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::report::{ChartFrame, ChartLayout, PurchaseReport};

/// Largest accepted chart dimension, in pixels
const MAX_CHART_DIMENSION: f64 = 4096.0;

/// GET /api/v1/report/purchases
pub async fn purchase_report(State(state): State<Arc<AppState>>) -> Json<PurchaseReport> {
    Json(PurchaseReport::build(&state.catalog))
}

/// GET /api/v1/report/chart?width=&height=
///
/// Defaults to 600×300.
pub async fn spending_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> ApiResult<Json<ChartLayout>> {
    let defaults = ChartFrame::default();
    let width = validate_dimension("width", query.width.unwrap_or(defaults.width))?;
    let height = validate_dimension("height", query.height.unwrap_or(defaults.height))?;

    let report = PurchaseReport::build(&state.catalog);
    Ok(Json(report.spending.layout(ChartFrame::sized(width, height))))
}

fn validate_dimension(name: &str, value: f64) -> ApiResult<f64> {
    if value.is_finite() && value > 0.0 && value <= MAX_CHART_DIMENSION {
        Ok(value)
    } else {
        Err(ApiError::Validation(format!(
            "{} must be between 0 and {} pixels",
            name, MAX_CHART_DIMENSION
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimension() {
        assert_eq!(validate_dimension("width", 600.0).unwrap(), 600.0);
        assert!(validate_dimension("width", 0.0).is_err());
        assert!(validate_dimension("height", f64::NAN).is_err());
        assert!(validate_dimension("height", 10_000.0).is_err());
    }
}
