// #![deny(missing_docs)]

use thiserror::Error;

mod detectors;
pub use detectors::ipgp::{annual_ipgp, IpgpDetection, DEFAULT_SLOPE_WINDOW, IPGP_SCAN_DAYS};

mod series;
pub use series::DailySeries;

mod util;

#[cfg(feature = "plot")]
mod plot;
#[cfg(feature = "plot")]
pub use plot::plot_detection;

/// Error type for Nereid
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The shape of an input value is not valid
    #[error("input vector {0} does not have compatible size")]
    InvalidInputShape(String),
    /// An argument has an invalid value
    #[error("argument {0} does not have a valid value: {1}")]
    InvalidArg(String, String),
    /// A diagnostic figure could not be rendered
    #[cfg(feature = "plot")]
    #[error("failed to render figure: {0}")]
    Render(String),
}
