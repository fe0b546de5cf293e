//! Pure coordinate math: normalization and great-circle distance.

use crate::models::GeoPoint;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Wrap a longitude into (-180, 180]. Wrap-around, not a clamp: 190 maps
/// to -170, -190 maps to 170.
pub fn normalize_longitude(lon: f64) -> f64 {
    let r = lon.rem_euclid(360.0);
    if r > 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Clamp a latitude to [-90, 90]. Non-finite input stays non-finite.
pub fn normalize_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn longitude_wraps_into_half_open_range() {
        assert_abs_diff_eq!(normalize_longitude(190.0), -170.0);
        assert_abs_diff_eq!(normalize_longitude(-190.0), 170.0);
        assert_abs_diff_eq!(normalize_longitude(360.0), 0.0);
        assert_abs_diff_eq!(normalize_longitude(540.0), 180.0);
        assert_abs_diff_eq!(normalize_longitude(180.0), 180.0);
        assert_abs_diff_eq!(normalize_longitude(-180.0), 180.0);
    }

    #[test]
    fn longitude_stays_congruent_mod_360() {
        for lon in [-720.5, -359.9, -37.6, 0.0, 37.6, 179.9, 360.1, 1000.0] {
            let n = normalize_longitude(lon);
            assert!(n > -180.0 && n <= 180.0, "{} -> {}", lon, n);
            let r = (n - lon).rem_euclid(360.0);
            assert!(r < 1e-6 || (360.0 - r) < 1e-6, "{} -> {} (r = {})", lon, n, r);
        }
    }

    #[test]
    fn latitude_clamps_to_poles() {
        assert_abs_diff_eq!(normalize_latitude(95.0), 90.0);
        assert_abs_diff_eq!(normalize_latitude(-95.0), -90.0);
        assert_abs_diff_eq!(normalize_latitude(55.75), 55.75);
        assert!(normalize_latitude(f64::NAN).is_nan());
    }

    #[test]
    fn distance_to_self_is_zero_and_symmetric() {
        let a = GeoPoint {
            lat: 55.7558,
            lon: 37.6173,
        };
        let b = GeoPoint {
            lat: 59.9343,
            lon: 30.3351,
        };
        assert_abs_diff_eq!(haversine_km(&a, &a), 0.0);
        assert_abs_diff_eq!(haversine_km(&a, &b), haversine_km(&b, &a));
    }

    #[test]
    fn known_distance_moscow_to_petersburg() {
        let moscow = GeoPoint {
            lat: 55.7558,
            lon: 37.6173,
        };
        let petersburg = GeoPoint {
            lat: 59.9343,
            lon: 30.3351,
        };
        let d = haversine_km(&moscow, &petersburg);
        assert!((d - 634.0).abs() < 5.0, "got {}", d);
    }
}
