//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::aggregate::filter::MonthFilter;
use crate::aggregate::monthly::MonthlyMetric;

/// Month restriction for the daily and hourly endpoints.
///
/// Both fields arrive as raw strings so that malformed values are reported
/// through [`ErrorResponse`] rather than the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Exact `YYYY-MM` month.
    pub month: Option<String>,
    /// Month number `1..=12`, pooled across years.
    pub calendar_month: Option<String>,
}

impl FilterQuery {
    /// Resolves the query into a filter, falling back to `default` when
    /// neither parameter is present.
    ///
    /// # Errors
    ///
    /// Returns a message describing the rejected parameter.
    pub fn resolve(&self, default: &MonthFilter) -> Result<MonthFilter, String> {
        if self.month.is_none() && self.calendar_month.is_none() {
            return Ok(default.clone());
        }
        let calendar_month = self
            .calendar_month
            .as_deref()
            .map(|raw| {
                raw.trim()
                    .parse::<u8>()
                    .map_err(|_| format!("calendar_month must be in 1..=12, got \"{raw}\""))
            })
            .transpose()?;
        MonthFilter::from_options(self.month.as_deref(), calendar_month).map_err(|e| e.to_string())
    }
}

/// Query parameters for the monthly endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct MonthlyQuery {
    /// Metric name; `total_cost` when absent.
    pub metric: Option<String>,
}

impl MonthlyQuery {
    /// Parses the requested metric.
    ///
    /// # Errors
    ///
    /// Returns a message listing the accepted names.
    pub fn resolve(&self) -> Result<MonthlyMetric, String> {
        self.metric
            .as_deref()
            .map_or(Ok(MonthlyMetric::default()), str::parse)
    }
}

/// A filtered series together with the filter that produced it.
#[derive(Debug, Serialize)]
pub struct FilteredSeries<T> {
    /// Month restriction applied.
    pub filter: MonthFilter,
    /// Series entries in ascending key order.
    pub entries: Vec<T>,
}

/// One monthly series.
#[derive(Debug, Serialize)]
pub struct MonthlySeries<T> {
    /// Metric reduced per month.
    pub metric: MonthlyMetric,
    /// Entries in ascending month order.
    pub entries: Vec<T>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_query(month: Option<&str>, calendar_month: Option<&str>) -> FilterQuery {
        FilterQuery {
            month: month.map(str::to_string),
            calendar_month: calendar_month.map(str::to_string),
        }
    }

    #[test]
    fn empty_query_uses_default_filter() {
        let default = MonthFilter::CalendarMonth(3);
        assert_eq!(make_query(None, None).resolve(&default), Ok(default));
    }

    #[test]
    fn query_overrides_default() {
        let q = make_query(Some("2025-02"), None);
        assert_eq!(
            q.resolve(&MonthFilter::All),
            Ok(MonthFilter::YearMonth("2025-02".to_string()))
        );
        let q = make_query(None, Some("7"));
        assert_eq!(q.resolve(&MonthFilter::All), Ok(MonthFilter::CalendarMonth(7)));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(make_query(Some("2025-13"), None).resolve(&MonthFilter::All).is_err());
        assert!(make_query(None, Some("x")).resolve(&MonthFilter::All).is_err());
        assert!(make_query(None, Some("0")).resolve(&MonthFilter::All).is_err());
        assert!(
            make_query(Some("2025-01"), Some("1"))
                .resolve(&MonthFilter::All)
                .is_err()
        );
    }

    #[test]
    fn monthly_metric_defaults_to_total_cost() {
        assert_eq!(MonthlyQuery::default().resolve(), Ok(MonthlyMetric::TotalCost));
        let q = MonthlyQuery {
            metric: Some("average_cost".to_string()),
        };
        assert_eq!(q.resolve(), Ok(MonthlyMetric::AverageCost));
        let q = MonthlyQuery {
            metric: Some("median".to_string()),
        };
        assert!(q.resolve().is_err());
    }
}
