// crates/centremap-core/src/geo.rs

//! Great-circle distance plus the two-click measurement tool.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two `(lat, lon)` points.
pub fn haversine_m(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lon1) = a;
    let (lat2, lon2) = b;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// The two-click distance-measurement tool, renderer-agnostic.
///
/// Feed map clicks into [`DistanceMeasure::record`]; once two points are set,
/// [`DistanceMeasure::distance_m`] yields the measurement. A click after a
/// completed measurement starts a fresh one.
#[derive(Clone, Debug, Default)]
pub struct DistanceMeasure {
    first: Option<(f64, f64)>,
    second: Option<(f64, f64)>,
}

impl DistanceMeasure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a clicked `(lat, lon)` point.
    pub fn record(&mut self, point: (f64, f64)) {
        match (self.first, self.second) {
            (None, _) => self.first = Some(point),
            (Some(_), None) => self.second = Some(point),
            (Some(_), Some(_)) => {
                self.first = Some(point);
                self.second = None;
            }
        }
    }

    pub fn first(&self) -> Option<(f64, f64)> {
        self.first
    }

    pub fn second(&self) -> Option<(f64, f64)> {
        self.second
    }

    pub fn is_complete(&self) -> bool {
        self.second.is_some()
    }

    /// Meters between the two recorded points, once both are set.
    pub fn distance_m(&self) -> Option<f64> {
        match (self.first, self.second) {
            (Some(a), Some(b)) => Some(haversine_m(a, b)),
            _ => None,
        }
    }

    /// Clear the selection.
    pub fn reset(&mut self) {
        self.first = None;
        self.second = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: (f64, f64) = (48.8566, 2.3522);
    const LYON: (f64, f64) = (45.7640, 4.8357);

    #[test]
    fn paris_lyon_is_about_392_km() {
        let d = haversine_m(PARIS, LYON);
        assert!((d - 392_000.0).abs() < 5_000.0, "got {d}");
    }

    #[test]
    fn zero_distance_for_same_point() {
        assert_eq!(haversine_m(PARIS, PARIS), 0.0);
    }

    #[test]
    fn symmetric() {
        let ab = haversine_m(PARIS, LYON);
        let ba = haversine_m(LYON, PARIS);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn measure_needs_two_points() {
        let mut m = DistanceMeasure::new();
        assert!(m.distance_m().is_none());
        m.record(PARIS);
        assert!(!m.is_complete());
        assert!(m.distance_m().is_none());
        m.record(LYON);
        assert!(m.is_complete());
        let d = m.distance_m().unwrap();
        assert!(d > 300_000.0);
    }

    #[test]
    fn third_click_starts_over() {
        let mut m = DistanceMeasure::new();
        m.record(PARIS);
        m.record(LYON);
        m.record((43.2965, 5.3698)); // Marseille
        assert_eq!(m.first(), Some((43.2965, 5.3698)));
        assert!(m.second().is_none());
        assert!(m.distance_m().is_none());
    }

    #[test]
    fn reset_clears_selection() {
        let mut m = DistanceMeasure::new();
        m.record(PARIS);
        m.reset();
        assert!(m.first().is_none());
    }
}
