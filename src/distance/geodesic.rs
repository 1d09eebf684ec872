//! Geodesic distances on the WGS-84 ellipsoid.
//!
//! # Algorithm
//!
//! Vincenty's inverse formula iterates on the longitude difference on the
//! auxiliary sphere until it changes by less than 1e-12 rad. It fails to
//! converge for nearly antipodal points; those fall back to the haversine
//! great-circle distance on a sphere of mean Earth radius.
//!
//! # Reference
//!
//! Vincenty, T. (1975). "Direct and Inverse Solutions of Geodesics on the
//! Ellipsoid with application of nested equations", *Survey Review* 23(176),
//! 88-93.

use crate::models::Location;

/// WGS-84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Mean Earth radius in metres (IUGG).
const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

const MAX_ITERATIONS: usize = 200;
const CONVERGENCE: f64 = 1e-12;

/// Distance in kilometres between two locations on the WGS-84 ellipsoid.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Location;
/// use u_dispatch::distance::geodesic_km;
///
/// let a = Location::new(0.0, 0.0).unwrap();
/// let b = Location::new(0.0, 1.0).unwrap();
/// // one degree of longitude along the equator
/// assert!((geodesic_km(&a, &b) - 111.319_49).abs() < 1e-4);
/// ```
pub fn geodesic_km(a: &Location, b: &Location) -> f64 {
    vincenty_m(a, b).unwrap_or_else(|| haversine_m(a, b)) / 1000.0
}

/// Great-circle distance in kilometres on a sphere of mean Earth radius.
pub fn great_circle_km(a: &Location, b: &Location) -> f64 {
    haversine_m(a, b) / 1000.0
}

/// Rounds a distance in kilometres to three decimals (whole metres).
pub fn round_km(km: f64) -> f64 {
    (km * 1000.0).round() / 1000.0
}

fn haversine_m(a: &Location, b: &Location) -> f64 {
    let phi1 = a.latitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let d_phi = phi2 - phi1;
    let d_lambda = (b.longitude() - a.longitude()).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * MEAN_EARTH_RADIUS * h.sqrt().min(1.0).asin()
}

/// Returns `None` when the iteration does not converge.
fn vincenty_m(a: &Location, b: &Location) -> Option<f64> {
    if a == b {
        return Some(0.0);
    }

    let f = WGS84_F;
    let major = WGS84_A;
    let minor = (1.0 - f) * major;

    let l = (b.longitude() - a.longitude()).to_radians();
    let u1 = ((1.0 - f) * a.latitude().to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.latitude().to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // distinct points on the auxiliary sphere's antipode
            return None;
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < CONVERGENCE {
            let u_sq = cos_sq_alpha * (major * major - minor * minor) / (minor * minor);
            let big_a =
                1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + big_b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Some(minor * big_a * (sigma - delta_sigma));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(lat: f64, lon: f64) -> Location {
        Location::new(lat, lon).expect("valid coordinates")
    }

    #[test]
    fn test_same_point() {
        let a = loc(52.52, 13.405);
        assert_eq!(geodesic_km(&a, &a), 0.0);
    }

    #[test]
    fn test_equator_degree() {
        let d = geodesic_km(&loc(0.0, 0.0), &loc(0.0, 1.0));
        assert!((d - 111.319_490_793).abs() < 1e-6);
    }

    #[test]
    fn test_meridian_degree() {
        // one degree of latitude at the equator is shorter than along it
        let d = geodesic_km(&loc(0.0, 0.0), &loc(1.0, 0.0));
        assert!((d - 110.574).abs() < 1e-3);
    }

    #[test]
    fn test_symmetric() {
        let a = loc(40.7128, -74.006);
        let b = loc(51.5074, -0.1278);
        assert!((geodesic_km(&a, &b) - geodesic_km(&b, &a)).abs() < 1e-6);
    }

    #[test]
    fn test_close_to_great_circle() {
        let a = loc(40.7128, -74.006);
        let b = loc(51.5074, -0.1278);
        let ellipsoid = geodesic_km(&a, &b);
        let sphere = great_circle_km(&a, &b);
        // spherical model error stays well under 0.5%
        assert!((ellipsoid - sphere).abs() / ellipsoid < 0.005);
    }

    #[test]
    fn test_antipodal_falls_back() {
        let d = geodesic_km(&loc(0.0, 0.0), &loc(0.0, 180.0));
        let half_circumference = std::f64::consts::PI * MEAN_EARTH_RADIUS / 1000.0;
        assert!((d - half_circumference).abs() < 1e-6);
    }

    #[test]
    fn test_round_km() {
        assert_eq!(round_km(1.23456), 1.235);
        assert_eq!(round_km(0.0004), 0.0);
    }
}
