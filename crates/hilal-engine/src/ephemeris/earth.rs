//! Earth orientation: nutation, obliquity and sidereal time.

use super::coords::{cos_deg, normalize_degrees, sin_deg};
use super::time::J2000;

/// Nutation in longitude and obliquity, in degrees, from the leading terms.
pub fn nutation(t: f64) -> (f64, f64) {
    let omega = 125.04452 - 1934.136261 * t;
    let l_sun = 280.4665 + 36000.7698 * t;
    let l_moon = 218.3165 + 481267.8813 * t;

    let dpsi = -17.20 * sin_deg(omega) - 1.32 * sin_deg(2.0 * l_sun) - 0.23 * sin_deg(2.0 * l_moon)
        + 0.21 * sin_deg(2.0 * omega);
    let deps = 9.20 * cos_deg(omega) + 0.57 * cos_deg(2.0 * l_sun) + 0.10 * cos_deg(2.0 * l_moon)
        - 0.09 * cos_deg(2.0 * omega);

    (dpsi / 3600.0, deps / 3600.0)
}

/// Mean obliquity of the ecliptic in degrees.
pub fn mean_obliquity(t: f64) -> f64 {
    let seconds = 21.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    23.0 + 26.0 / 60.0 + seconds / 3600.0
}

/// True obliquity (mean plus nutation) in degrees.
pub fn true_obliquity(t: f64) -> f64 {
    mean_obliquity(t) + nutation(t).1
}

/// Apparent local sidereal time in degrees.
///
/// `jd_ut` is the Julian date in UT, `t` the TT centuries used for nutation,
/// `longitude` is east positive.
pub fn local_sidereal_time(jd_ut: f64, t: f64, longitude: f64) -> f64 {
    let d = jd_ut - J2000;
    let tu = d / 36_525.0;
    let gmst = 280.46061837 + 360.98564736629 * d + 0.000387933 * tu * tu
        - tu * tu * tu / 38_710_000.0;
    let (dpsi, _) = nutation(t);
    let gast = gmst + dpsi * cos_deg(true_obliquity(t));
    normalize_degrees(gast + longitude)
}
