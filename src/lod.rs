//! Limit of detection from calibration statistics.

use crate::error::{LabError, Result};

/// `LOD = 3σ / slope`.
///
/// `sigma` is the standard deviation of the blank and `slope` the
/// calibration sensitivity. A slope that is not strictly positive (including
/// NaN) yields [`LabError::LodNotComputable`].
pub fn compute_lod(sigma: f64, slope: f64) -> Result<f64> {
    if slope > 0.0 {
        Ok(3.0 * sigma / slope)
    } else {
        log::warn!("LOD requested with non-positive slope {slope}");
        Err(LabError::LodNotComputable { slope })
    }
}

/// Molar LOD as shown to the user, e.g. `LOD = 1.500e-02 M`.
///
/// The exponent always carries a sign and at least two digits.
pub fn format_lod(lod: f64) -> String {
    format!("LOD = {} M", scientific(lod))
}

fn scientific(value: f64) -> String {
    let raw = format!("{value:.3e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => raw,
    }
}
