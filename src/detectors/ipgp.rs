use crate::{util, DailySeries, Error};
use chrono::{Days, NaiveDate};

/// Number of candidate days scanned by [`annual_ipgp`]
///
/// The scan is always 366 days long, whether or not the study year is a leap
/// year. This mirrors the published method, which anchors day-of-year indices
/// at January 1 and scans a fixed range.
pub const IPGP_SCAN_DAYS: usize = 366;

/// Default number of consecutive daily samples per local linear fit
pub const DEFAULT_SLOPE_WINDOW: usize = 5;

/// Result of an IPGP detection
///
/// The intermediate slope curve and its median are exposed alongside the
/// detected day so callers can inspect the detection or render a diagnostic
/// view without rerunning the computation.
#[derive(Debug, Clone, PartialEq)]
pub struct IpgpDetection {
    /// Zero-based day-of-year offset of bloom initiation, in `0..=365`
    pub day_index: usize,
    /// Calendar date of bloom initiation
    pub date: NaiveDate,
    /// Fitted slope of cumulative fluorescence for each candidate day,
    /// always [`IPGP_SCAN_DAYS`] long
    pub slopes: Vec<f32>,
    /// Median of the slope curve, used as the detection threshold
    pub median_slope: f32,
}

impl IpgpDetection {
    /// The detected date formatted as `YYYY/MM/DD`
    pub fn date_string(&self) -> String {
        self.date.format("%Y/%m/%d").to_string()
    }
}

/// Detect the Initiation of the Phytoplankton Growing Period (IPGP) in a one
/// year fluorescence timeseries, as defined in Poppeschi et al. (2022),
/// Biogeosciences.
///
/// The fluorescence values are cumulated, then a linear slope is fitted over
/// a rolling window of `slope_window` days for each of the 366 candidate
/// day-of-year indices. The IPGP is the first day whose slope reaches the
/// median of the slope curve. The median split guarantees a detection; on a
/// seasonal series the qualifying days form one block whose first element is
/// the onset.
///
/// The series must be daily, gapless, and anchored at January 1 of the study
/// year (see [`DailySeries::for_year`]); the date in the returned
/// [`IpgpDetection`] is `start_date + day_index` days.
///
/// ## Errors
///
/// - `slope_window` is less than 2 (the linear fit is underdetermined)
/// - `series` is shorter than `365 + slope_window`, so the fixed 366-day scan
///   would run off the end of the data
/// - `series` contains non-finite values
pub fn annual_ipgp(series: &DailySeries, slope_window: usize) -> Result<IpgpDetection, Error> {
    if slope_window < 2 {
        return Err(Error::InvalidArg(
            "slope_window".to_string(),
            "must be at least 2".to_string(),
        ));
    }

    // the last window fitted starts at index 365
    if series.values.len() < (IPGP_SCAN_DAYS - 1) + slope_window {
        return Err(Error::InvalidInputShape("data".to_string()));
    }

    if !series.values.iter().all(|value| util::is_valid(*value)) {
        return Err(Error::InvalidArg(
            "data".to_string(),
            "contains non-finite values".to_string(),
        ));
    }

    let cumulative = util::cumulative_sum(&series.values);

    let slopes: Vec<f32> = (0..IPGP_SCAN_DAYS)
        .map(|i| util::fit_slope(&cumulative[i..i + slope_window]))
        .collect();

    let median_slope = util::median(&slopes);

    // first crossing of the median. At least half the slopes satisfy the
    // threshold, so this can only come up empty if the cumulative sum
    // overflowed to non-finite values
    let day_index = slopes
        .iter()
        .position(|slope| *slope >= median_slope)
        .ok_or_else(|| {
            Error::InvalidArg(
                "data".to_string(),
                "no slope reached the median threshold".to_string(),
            )
        })?;

    let date = series
        .start_date
        .checked_add_days(Days::new(day_index as u64))
        .ok_or_else(|| {
            Error::InvalidArg(
                "start_date".to_string(),
                "outside representable date range".to_string(),
            )
        })?;

    let detection = IpgpDetection {
        day_index,
        date,
        slopes,
        median_slope,
    };

    log::info!("IPGP julian date : date{}", detection.day_index);
    log::info!("IPGP date : date{}", detection.date_string());

    Ok(detection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn step_series() -> DailySeries {
        // 400 daily values: no fluorescence for 180 days, then a constant
        // bloom signal
        let mut values = vec![0.; 180];
        values.extend(vec![10.; 220]);
        DailySeries::for_year(2012, values).unwrap()
    }

    #[test]
    fn test_constant_signal_detects_day_zero() {
        let series = DailySeries::for_year(2012, vec![1.; 400]).unwrap();
        let detection = annual_ipgp(&series, DEFAULT_SLOPE_WINDOW).unwrap();

        // every window sees the same trend, so the median equals every slope
        // and the first qualifying day is January 1
        assert_eq!(detection.day_index, 0);
        assert_eq!(detection.date_string(), "2012/01/01");
        assert_relative_eq!(detection.median_slope, 1.);
        for slope in &detection.slopes {
            assert_relative_eq!(*slope, 1.);
        }
    }

    #[test]
    fn test_step_signal_detects_onset() {
        let detection = annual_ipgp(&step_series(), DEFAULT_SLOPE_WINDOW).unwrap();

        // the last window fully inside the flat half starts at 175; the
        // first window fully inside the bloom starts at 179, which is where
        // the slope first reaches the median
        assert_eq!(detection.day_index, 179);
        assert_eq!(detection.date_string(), "2012/06/28");
        assert_relative_eq!(detection.median_slope, 10.);
        assert_relative_eq!(detection.slopes[175], 0.);
        assert_relative_eq!(detection.slopes[179], 10.);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let series = step_series();
        let first = annual_ipgp(&series, DEFAULT_SLOPE_WINDOW).unwrap();
        let second = annual_ipgp(&series, DEFAULT_SLOPE_WINDOW).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_slope_curve_length_is_window_independent() {
        let series = step_series();
        for slope_window in [2, 5, 7] {
            let detection = annual_ipgp(&series, slope_window).unwrap();
            assert_eq!(detection.slopes.len(), IPGP_SCAN_DAYS);
            assert!(detection.day_index < IPGP_SCAN_DAYS);
        }
    }

    #[test]
    fn test_day_index_to_date() {
        let series = DailySeries::for_year(2012, vec![1.; 400]).unwrap();
        assert_eq!(
            series
                .start_date
                .checked_add_days(Days::new(45))
                .unwrap()
                .format("%Y/%m/%d")
                .to_string(),
            "2012/02/15"
        );
    }

    #[test]
    fn test_short_series_is_rejected() {
        let series = DailySeries::for_year(2012, vec![1.; 300]).unwrap();
        assert!(matches!(
            annual_ipgp(&series, DEFAULT_SLOPE_WINDOW),
            Err(Error::InvalidInputShape(_))
        ));

        // 369 days is one short of the 365 + 5 needed for a 5 day window
        let series = DailySeries::for_year(2012, vec![1.; 369]).unwrap();
        assert!(matches!(
            annual_ipgp(&series, DEFAULT_SLOPE_WINDOW),
            Err(Error::InvalidInputShape(_))
        ));
        let series = DailySeries::for_year(2012, vec![1.; 370]).unwrap();
        assert!(annual_ipgp(&series, DEFAULT_SLOPE_WINDOW).is_ok());
    }

    #[test]
    fn test_degenerate_window_is_rejected() {
        let series = DailySeries::for_year(2012, vec![1.; 400]).unwrap();
        assert!(matches!(
            annual_ipgp(&series, 1),
            Err(Error::InvalidArg(_, _))
        ));
    }

    #[test]
    fn test_non_finite_data_is_rejected() {
        let mut values = vec![1.; 400];
        values[200] = f32::NAN;
        let series = DailySeries::for_year(2012, values).unwrap();
        assert!(matches!(
            annual_ipgp(&series, DEFAULT_SLOPE_WINDOW),
            Err(Error::InvalidArg(_, _))
        ));
    }
}
