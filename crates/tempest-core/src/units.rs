//! Metric to imperial unit conversions.
//!
//! Every function here is total over `f64` and returns the unrounded
//! result; display rounding belongs to the projector.

/// Miles per hour in one meter per second.
pub const MPH_PER_MPS: f64 = 2.236_94;

/// Millimeters in one inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Inches of mercury in one millibar.
pub const INHG_PER_MBAR: f64 = 0.029_53;

/// Convert degrees Celsius to degrees Fahrenheit.
pub const fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Convert meters per second to miles per hour.
pub const fn mps_to_mph(mps: f64) -> f64 {
    mps * MPH_PER_MPS
}

/// Convert millimeters to inches.
pub const fn mm_to_inches(mm: f64) -> f64 {
    mm / MM_PER_INCH
}

/// Convert millibar to inches of mercury.
pub const fn mbar_to_inhg(mbar: f64) -> f64 {
    mbar * INHG_PER_MBAR
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn fahrenheit_matches_formula_exactly() {
        for c in [-40.0, -17.5, 0.0, 20.0, 22.37, 37.0, 100.0, 1e6] {
            assert_eq!(celsius_to_fahrenheit(c), c * 9.0 / 5.0 + 32.0);
        }
    }

    #[test]
    fn fahrenheit_fixed_points() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(celsius_to_fahrenheit(20.0), 68.0);
    }

    #[test]
    fn wind_speed() {
        assert_eq!(mps_to_mph(0.0), 0.0);
        assert_eq!(mps_to_mph(5.0), 5.0 * 2.236_94);
        assert!((mps_to_mph(5.0) - 11.1847).abs() < 1e-9);
    }

    #[test]
    fn rain_depth() {
        assert_eq!(mm_to_inches(25.4), 1.0);
        assert_eq!(mm_to_inches(0.0), 0.0);
    }

    #[test]
    fn pressure() {
        assert!((mbar_to_inhg(1013.25) - 29.921_272_5).abs() < 1e-9);
    }
}
