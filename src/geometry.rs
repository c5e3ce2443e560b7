//! Distance and elevation aggregates over ordered point sequences.

use crate::gpx_types::{DistanceElement, ElevationElement, GpxPoint, SectionElement};

/// Mean earth radius in meters used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Most decimals an f64 can meaningfully carry.
pub const MAX_PRECISION: u32 = 17;

/// Great-circle (haversine) distance in meters between two points.
pub fn distance_between(p1: &GpxPoint, p2: &GpxPoint) -> f64 {
    let rad = std::f64::consts::PI / 180.0;
    let lat1 = p1.lat * rad;
    let lat2 = p2.lat * rad;
    let sin_dlat = ((p2.lat - p1.lat) * rad / 2.0).sin();
    let sin_dlon = ((p2.lon - p1.lon) * rad / 2.0).sin();
    let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Running distance along `points`.
///
/// The last entry repeats the one before it, so `cumul` always has one entry
/// per point: `[]` for no points and `[0.0]` for a single point.
pub fn cumulative_distance(points: &[GpxPoint]) -> DistanceElement {
    let mut total = 0.0;
    let mut cumul = Vec::with_capacity(points.len());

    for pair in points.windows(2) {
        total += distance_between(&pair[0], &pair[1]);
        cumul.push(total);
    }
    if !points.is_empty() {
        cumul.push(total);
    }

    DistanceElement { total, cumul }
}

/// Elevation statistics over `points`. An empty sequence yields all zeros.
pub fn elevation_stats(points: &[GpxPoint]) -> ElevationElement {
    if points.is_empty() {
        return ElevationElement::default();
    }

    let mut climb = 0.0;
    let mut descent = 0.0;
    for pair in points.windows(2) {
        let diff = pair[1].elevation() - pair[0].elevation();
        if diff < 0.0 {
            descent += diff;
        } else if diff > 0.0 {
            climb += diff;
        }
    }

    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;
    let mut sum = 0.0;
    for ele in points.iter().map(GpxPoint::elevation) {
        max = max.max(ele);
        min = min.min(ele);
        sum += ele;
    }

    let net = climb + descent;
    let total = cumulative_distance(points).total;
    let slope = if total > 0.0 { 100.0 * net / total } else { 0.0 };

    ElevationElement {
        max,
        min,
        pos: climb.abs(),
        neg: descent.abs(),
        avg: sum / points.len() as f64,
        abs: net,
        slope,
    }
}

/// Greedily split `points` into sections of at least `section_length` meters.
///
/// Points are buffered in order; once the buffered distance reaches the
/// threshold the buffer becomes a section and a new one starts. Only indices
/// `0..n-1` are visited, and whatever is still buffered at the end is dropped,
/// so the final point never belongs to a section.
pub fn sectionize(points: &[GpxPoint], section_length: f64) -> Vec<SectionElement> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut buffered = 0.0;

    for i in 0..points.len().saturating_sub(1) {
        if i > start && buffered >= section_length {
            let section = &points[start..i];
            let distance = cumulative_distance(section);
            tracing::trace!(
                first = start,
                len = section.len(),
                total = distance.total,
                "section closed"
            );
            sections.push(SectionElement {
                distance,
                elevation: elevation_stats(section),
            });
            start = i;
            buffered = 0.0;
        }
        if i > start {
            buffered += distance_between(&points[i - 1], &points[i]);
        }
    }

    sections
}

/// Round `value` half away from zero to `digits` decimals.
/// Requests beyond [`MAX_PRECISION`] digits leave `value` untouched.
pub fn round_to(value: f64, digits: u32) -> f64 {
    if digits > MAX_PRECISION {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    let scaled = (value * factor).round() / factor;
    if scaled.is_finite() { scaled } else { value }
}

impl DistanceElement {
    pub fn with_precision(self, precision: Option<u32>) -> Self {
        let Some(digits) = precision else {
            return self;
        };
        Self {
            total: round_to(self.total, digits),
            cumul: self.cumul.into_iter().map(|d| round_to(d, digits)).collect(),
        }
    }
}

impl ElevationElement {
    pub fn with_precision(self, precision: Option<u32>) -> Self {
        let Some(digits) = precision else {
            return self;
        };
        Self {
            max: round_to(self.max, digits),
            min: round_to(self.min, digits),
            pos: round_to(self.pos, digits),
            neg: round_to(self.neg, digits),
            avg: round_to(self.avg, digits),
            abs: round_to(self.abs, digits),
            slope: round_to(self.slope, digits),
        }
    }
}

impl SectionElement {
    pub fn with_precision(self, precision: Option<u32>) -> Self {
        Self {
            distance: self.distance.with_precision(precision),
            elevation: self.elevation.with_precision(precision),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lon: f64, ele: f64) -> GpxPoint {
        GpxPoint {
            ele: Some(ele),
            ..GpxPoint::new(lat, lon)
        }
    }

    /// Points along the equator, 0.001° of longitude (~111.19 m) apart.
    fn equator(n: usize) -> Vec<GpxPoint> {
        (0..n).map(|i| pt(0.0, i as f64 * 0.001, 0.0)).collect()
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = pt(47.253146555709, -1.5153741828293, 35.0);
        assert_eq!(distance_between(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = pt(47.253146555709, -1.5153741828293, 35.0);
        let b = pt(47.235331031612, -1.5482325613225, 20.0);
        assert_eq!(distance_between(&a, &b), distance_between(&b, &a));
    }

    #[test]
    fn test_distance_known_value() {
        let a = pt(47.253146555709, -1.5153741828293, 35.0);
        let b = pt(47.235331031612, -1.5482325613225, 20.0);
        let d = distance_between(&a, &b);
        assert!((d - 3174.3815).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn test_distance_one_degree_on_equator() {
        let d = distance_between(&pt(0.0, 0.0, 0.0), &pt(0.0, 1.0, 0.0));
        assert!((d - 111_194.9266).abs() < 1e-3, "got {d}");
    }

    #[test]
    fn test_cumulative_distance() {
        let points = equator(4);
        let dist = cumulative_distance(&points);
        assert_eq!(dist.cumul.len(), 4);
        assert!(dist.cumul.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(dist.cumul[2], dist.cumul[3]);
        assert_eq!(dist.total, dist.cumul[3]);

        let expected: f64 = points
            .windows(2)
            .map(|w| distance_between(&w[0], &w[1]))
            .sum();
        assert!((dist.total - expected).abs() < 1e-9);
        assert!((dist.cumul[0] - 111.1949).abs() < 1e-3);
    }

    #[test]
    fn test_cumulative_distance_degenerate() {
        let empty = cumulative_distance(&[]);
        assert_eq!(empty.total, 0.0);
        assert!(empty.cumul.is_empty());

        let single = cumulative_distance(&equator(1));
        assert_eq!(single.total, 0.0);
        assert_eq!(single.cumul, vec![0.0]);
    }

    #[test]
    fn test_elevation_stats() {
        let points = vec![
            pt(0.0, 0.0, 10.0),
            pt(0.0, 0.001, 15.0),
            pt(0.0, 0.002, 12.0),
            pt(0.0, 0.003, 20.0),
        ];
        let ele = elevation_stats(&points);
        assert_eq!(ele.max, 20.0);
        assert_eq!(ele.min, 10.0);
        assert_eq!(ele.pos, 13.0);
        assert_eq!(ele.neg, 3.0);
        assert_eq!(ele.abs, 10.0);
        assert_eq!(ele.avg, 14.25);

        let total = cumulative_distance(&points).total;
        assert!((ele.slope - 100.0 * 10.0 / total).abs() < 1e-12);
    }

    #[test]
    fn test_elevation_monotonic_climb() {
        let points = vec![
            pt(0.0, 0.0, 1.0),
            pt(0.0, 0.001, 2.0),
            pt(0.0, 0.002, 4.0),
            pt(0.0, 0.003, 7.0),
        ];
        let ele = elevation_stats(&points);
        assert_eq!(ele.neg, 0.0);
        assert_eq!(ele.pos, ele.max - ele.min);
    }

    #[test]
    fn test_elevation_missing_counts_as_zero() {
        let points = vec![GpxPoint::new(0.0, 0.0), pt(0.0, 0.001, 4.0)];
        let ele = elevation_stats(&points);
        assert_eq!(ele.min, 0.0);
        assert_eq!(ele.pos, 4.0);
        assert_eq!(ele.avg, 2.0);
    }

    #[test]
    fn test_elevation_degenerate() {
        assert_eq!(elevation_stats(&[]), ElevationElement::default());

        let single = elevation_stats(&[pt(1.0, 1.0, 42.0)]);
        assert_eq!(single.max, 42.0);
        assert_eq!(single.min, 42.0);
        assert_eq!(single.avg, 42.0);
        assert_eq!(single.slope, 0.0);
    }

    #[test]
    fn test_sectionize_drops_trailing_buffer() {
        // 6 points: one section of points 0..=2, then [3, 4] is left over and point 5 is never visited
        let sections = sectionize(&equator(6), 200.0);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].distance.cumul.len(), 3);
        assert!(sections[0].distance.total >= 200.0);
    }

    #[test]
    fn test_sectionize_multiple() {
        let sections = sectionize(&equator(8), 200.0);
        assert_eq!(sections.len(), 2);
        for s in &sections {
            assert!(s.distance.total >= 200.0);
            assert_eq!(s.distance.cumul.len(), 3);
        }
    }

    #[test]
    fn test_sectionize_threshold_reached_exactly() {
        let points = equator(5);
        let step = distance_between(&points[0], &points[1]);
        // buffer [0, 1] measures exactly `step` and closes on the next visit
        let sections = sectionize(&points, step);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].distance.cumul.len(), 2);
    }

    #[test]
    fn test_sectionize_nothing_reaches_threshold() {
        assert!(sectionize(&equator(10), 10_000.0).is_empty());
        assert!(sectionize(&[], 100.0).is_empty());
        assert!(sectionize(&equator(1), 100.0).is_empty());
    }

    #[test]
    fn test_sectionize_zero_threshold_never_emits_empty() {
        let sections = sectionize(&equator(4), 0.0);
        assert!(sections.iter().all(|s| !s.distance.cumul.is_empty()));
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(14.148731707317081, 2), 14.15);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.0, 0), 1.0);
    }

    #[test]
    fn test_round_to_huge_precision_is_identity() {
        assert_eq!(round_to(1234.5678, u32::MAX), 1234.5678);
        assert_eq!(round_to(0.1 + 0.2, 40), 0.1 + 0.2);
    }

    #[test]
    fn test_with_precision() {
        let dist = DistanceElement {
            total: 222.389853,
            cumul: vec![111.194926, 222.389853, 222.389853],
        }
        .with_precision(Some(1));
        assert_eq!(dist.total, 222.4);
        assert_eq!(dist.cumul, vec![111.2, 222.4, 222.4]);

        let unchanged = ElevationElement {
            avg: 1.23456,
            ..Default::default()
        }
        .with_precision(None);
        assert_eq!(unchanged.avg, 1.23456);
    }
}
