//! Angle helpers and coordinate transforms between the ecliptic, equatorial
//! and horizontal frames.

/// Equatorial radius of the Earth in km.
const EARTH_RADIUS_KM: f64 = 6378.14;
/// Polar/equatorial axis ratio b/a of the reference ellipsoid.
const EARTH_AXIS_RATIO: f64 = 0.99664719;

pub fn sin_deg(x: f64) -> f64 {
    x.to_radians().sin()
}

pub fn cos_deg(x: f64) -> f64 {
    x.to_radians().cos()
}

/// Reduce an angle to `[0, 360)`.
pub fn normalize_degrees(x: f64) -> f64 {
    x.rem_euclid(360.0)
}

/// Reduce an angle to `[-180, 180)`.
pub fn normalize_pm180(x: f64) -> f64 {
    (x + 180.0).rem_euclid(360.0) - 180.0
}

/// Ecliptic (λ, β) to equatorial (α, δ), all in degrees; `eps` is the obliquity.
pub fn ecliptic_to_equatorial(lon: f64, lat: f64, eps: f64) -> (f64, f64) {
    let ra = (sin_deg(lon) * cos_deg(eps) - lat.to_radians().tan() * sin_deg(eps))
        .atan2(cos_deg(lon))
        .to_degrees();
    let dec = (sin_deg(lat) * cos_deg(eps) + cos_deg(lat) * sin_deg(eps) * sin_deg(lon))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    (normalize_degrees(ra), dec)
}

/// Shift geocentric (α, δ) to the topocentric place of a sea-level observer.
///
/// `lst` is the local sidereal time in degrees. Only the Moon's parallax is
/// large enough to matter here, but the correction is applied to every body.
pub fn topocentric(ra: f64, dec: f64, distance_km: f64, latitude: f64, lst: f64) -> (f64, f64) {
    let u = (EARTH_AXIS_RATIO * latitude.to_radians().tan()).atan();
    let rho_sin = EARTH_AXIS_RATIO * u.sin();
    let rho_cos = u.cos();
    let sin_par = EARTH_RADIUS_KM / distance_km;

    let h = (lst - ra).to_radians();
    let dec_r = dec.to_radians();
    let denom = dec_r.cos() - rho_cos * sin_par * h.cos();
    let d_ra = (-rho_cos * sin_par * h.sin()).atan2(denom);
    let dec_topo = ((dec_r.sin() - rho_sin * sin_par) * d_ra.cos()).atan2(denom);

    (normalize_degrees(ra + d_ra.to_degrees()), dec_topo.to_degrees())
}

/// Equatorial (α, δ) to geometric (altitude, azimuth) in degrees.
///
/// Azimuth is measured from north through east.
pub fn equatorial_to_horizontal(ra: f64, dec: f64, latitude: f64, lst: f64) -> (f64, f64) {
    let h = lst - ra;
    let altitude = (sin_deg(latitude) * sin_deg(dec) + cos_deg(latitude) * cos_deg(dec) * cos_deg(h))
        .clamp(-1.0, 1.0)
        .asin()
        .to_degrees();
    let azimuth = sin_deg(h)
        .atan2(cos_deg(h) * sin_deg(latitude) - dec.to_radians().tan() * cos_deg(latitude))
        .to_degrees();
    (altitude, normalize_degrees(azimuth + 180.0))
}

/// Atmospheric refraction in degrees for a true altitude (Saemundsson).
pub fn refraction(altitude: f64) -> f64 {
    if altitude < -90.0 || altitude > 90.0 {
        return 0.0;
    }
    let h = altitude.max(-1.0);
    let arcmin = 1.02 / (h + 10.3 / (h + 5.11)).to_radians().tan();
    arcmin.max(0.0) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizers() {
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_pm180(350.0), -10.0);
        assert_eq!(normalize_pm180(10.0), 10.0);
    }

    #[test]
    fn pollux_equatorial_coordinates() {
        // λ = 113.215630°, β = 6.684170°, ε = 23.4392911° -> α = 116.328942°, δ = 28.026183°
        let (ra, dec) = ecliptic_to_equatorial(113.215630, 6.684170, 23.4392911);
        assert!((ra - 116.328942).abs() < 1e-4);
        assert!((dec - 28.026183).abs() < 1e-4);
    }

    #[test]
    fn refraction_at_horizon_is_about_half_a_degree() {
        let r = refraction(0.0);
        assert!((0.45..0.50).contains(&r), "r = {r}");
        assert!(refraction(45.0) < 0.02);
    }

    #[test]
    fn body_on_meridian_at_zenith() {
        let (alt, _) = equatorial_to_horizontal(100.0, 9.0, 9.0, 100.0);
        assert!((alt - 90.0).abs() < 1e-6);
    }
}
