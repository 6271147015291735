//! Great-circle distances and coordinate projection for feeder geometry.
//!
//! [`distance_feet`] is the canonical source of overhead-line lengths during
//! model synthesis. The projection helpers estimate where a feature might
//! sit given a start point and a distance; [`next_coordinate_legacy`]
//! reproduces the historical estimator bit-for-bit while
//! [`next_coordinate`] is the geometrically sound variant.

use rand::Rng;

use crate::GeoPoint;

/// Feet per kilometer, the conversion used for all line lengths.
pub const FEET_PER_KM: f64 = 3280.84;

/// Latitude shift per foot of ground distance.
/// 1 deg latitude = 111.32 km, 1 ft = 0.0003048 km.
pub const LAT_DEG_PER_FOOT: f64 = 2.7380524e-6;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Great-circle distance between two points, floored to whole feet.
pub fn distance_feet(a: GeoPoint, b: GeoPoint) -> f64 {
    (haversine_km(a, b) * FEET_PER_KM).floor()
}

/// Flat-earth projection as shipped in earlier releases of the estimator.
///
/// Two quirks are preserved on purpose: the bearing is passed to
/// `sin`/`cos` in degrees, and the longitude shift stays in feet rather
/// than degrees. Existing datasets were produced with this arithmetic, so
/// it is kept as a separately named variant instead of being corrected in
/// place. Use [`next_coordinate`] for the sound projection.
pub fn next_coordinate_legacy(origin: GeoPoint, distance_ft: f64, bearing_deg: f64) -> GeoPoint {
    let east_ft = distance_ft * bearing_deg.cos();
    let north_ft = distance_ft * bearing_deg.sin();
    let lat = origin.lat + LAT_DEG_PER_FOOT * north_ft;
    let lon = origin.lon + east_ft / lat.to_radians().cos();
    GeoPoint::new(lat, lon)
}

/// Flat-earth projection with the bearing in true degrees and both axes
/// converted to degrees, the east component scaled by the cosine of the
/// destination latitude.
pub fn next_coordinate(origin: GeoPoint, distance_ft: f64, bearing_deg: f64) -> GeoPoint {
    let theta = bearing_deg.to_radians();
    let east_ft = distance_ft * theta.cos();
    let north_ft = distance_ft * theta.sin();
    let lat = origin.lat + LAT_DEG_PER_FOOT * north_ft;
    let lon = origin.lon + LAT_DEG_PER_FOOT * east_ft / lat.to_radians().cos();
    GeoPoint::new(lat, lon)
}

/// Random guess of where a feature `distance_ft` away from `origin` might
/// sit: a uniform whole-degree bearing in [0, 359) fed to the legacy
/// projection, matching the historical call path.
pub fn random_next_coordinate<R: Rng>(origin: GeoPoint, distance_ft: f64, rng: &mut R) -> GeoPoint {
    let bearing = rng.gen_range(0..359) as f64;
    next_coordinate_legacy(origin, distance_ft, bearing)
}
