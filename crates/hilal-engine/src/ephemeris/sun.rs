//! Apparent geocentric position of the Sun (low-accuracy solar theory, ~0.01°).

use super::coords::{cos_deg, normalize_degrees, sin_deg};
use super::earth::nutation;
use super::EclipticPosition;

const AU_KM: f64 = 149_597_870.7;

/// Apparent ecliptic position of the Sun at `t` TT centuries since J2000.
pub(crate) fn apparent_position(t: f64) -> EclipticPosition {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = 357.52911 + 35999.05029 * t - 0.0001537 * t * t;
    let e = 0.016708634 - 0.000042037 * t - 0.0000001267 * t * t;

    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * sin_deg(m)
        + (0.019993 - 0.000101 * t) * sin_deg(2.0 * m)
        + 0.000289 * sin_deg(3.0 * m);

    let true_lon = l0 + c;
    let anomaly = m + c;
    let radius_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * cos_deg(anomaly));

    let aberration = -20.4898 / 3600.0 / radius_au;
    let (dpsi, _) = nutation(t);

    EclipticPosition {
        longitude: normalize_degrees(true_lon + aberration + dpsi),
        latitude: 0.0,
        distance_km: radius_au * AU_KM,
    }
}
