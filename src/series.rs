use crate::Error;
use chrono::NaiveDate;

/// Container of daily observation data
///
/// Values are samples in chronological order, one per calendar day, the first
/// taken on `start_date`. The series must be densely sampled: no gaps, no
/// missing values. Detectors that need a calendar anchor (like
/// [`annual_ipgp`](crate::annual_ipgp)) interpret index `i` as
/// `start_date + i` days.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    /// Date of the first observation in values
    pub start_date: NaiveDate,
    /// Data points of the timeseries in chronological order, one per day
    pub values: Vec<f32>,
}

impl DailySeries {
    /// Create a new DailySeries starting on an arbitrary date
    pub fn new(start_date: NaiveDate, values: Vec<f32>) -> Self {
        Self { start_date, values }
    }

    /// Create a DailySeries anchored at January 1 of `year`
    ///
    /// This is the anchor used by day-of-year arithmetic in the annual
    /// detectors.
    ///
    /// ## Errors
    ///
    /// - `year` is outside chrono's representable range
    pub fn for_year(year: i32, values: Vec<f32>) -> Result<Self, Error> {
        let start_date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
            Error::InvalidArg(
                "year".to_string(),
                "outside representable date range".to_string(),
            )
        })?;
        Ok(Self { start_date, values })
    }

    /// Number of observations in the series
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series contains no observations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_year_anchors_at_january_first() {
        let series = DailySeries::for_year(2012, vec![1., 2., 3.]).unwrap();
        assert_eq!(
            series.start_date,
            NaiveDate::from_ymd_opt(2012, 1, 1).unwrap()
        );
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }
}
