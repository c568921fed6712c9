use crate::{traits::ShapeClassifier, types::{Polygon, ShapeKind}};

/// `4π·area / perimeter²`: 1.0 for a perfect circle, smaller for anything less compact.
///
/// Returns 0.0 for a non-positive perimeter.
pub fn circularity(area: f64, perimeter: f64) -> f64 {
    if perimeter <= 0.0 {
        return 0.0;
    }
    4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
}

/// Vertex-count, aspect-ratio and circularity rules, checked in that order.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    /// Square iff `1 - tol <= width / height <= 1 + tol`
    pub square_aspect_tolerance: f64,
    /// Circle iff circularity is strictly greater than this
    pub circularity_threshold: f64,
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self {
            square_aspect_tolerance: 0.10,
            circularity_threshold: 0.70,
        }
    }
}

impl ShapeClassifier for HeuristicClassifier {
    fn classify(&self, polygon: &Polygon, area: f64, perimeter: f64) -> ShapeKind {
        match polygon.vertex_count() {
            3 => ShapeKind::Triangle,
            4 => {
                let ar = polygon.aspect_ratio();
                let band = (1.0 - self.square_aspect_tolerance)..=(1.0 + self.square_aspect_tolerance);
                if band.contains(&ar) {
                    ShapeKind::Square
                } else {
                    ShapeKind::Rectangle
                }
            }
            _ if circularity(area, perimeter) > self.circularity_threshold => ShapeKind::Circle,
            _ => ShapeKind::Star,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad(width: i32, height: i32) -> Polygon {
        Polygon::new(vec![[0, 0], [width - 1, 0], [width - 1, height - 1], [0, height - 1]])
    }

    fn octagon() -> Polygon {
        Polygon::new(vec![[30, 0], [70, 0], [100, 30], [100, 70], [70, 100], [30, 100], [0, 70], [0, 30]])
    }

    #[test]
    fn test_three_vertices_is_triangle() {
        let classifier = HeuristicClassifier::default();
        let triangle = Polygon::new(vec![[0, 0], [10, 0], [5, 8]]);
        // Area and perimeter are irrelevant once the vertex count decides
        assert_eq!(classifier.classify(&triangle, 40.0, 1e6), ShapeKind::Triangle);
    }

    #[test]
    fn test_square_tolerance_band() {
        let classifier = HeuristicClassifier::default();
        assert_eq!(classifier.classify(&quad(150, 150), 22500.0, 600.0), ShapeKind::Square);
        assert_eq!(classifier.classify(&quad(110, 100), 11000.0, 420.0), ShapeKind::Square);
        assert_eq!(classifier.classify(&quad(100, 110), 11000.0, 420.0), ShapeKind::Square);
        assert_eq!(classifier.classify(&quad(112, 100), 11200.0, 424.0), ShapeKind::Rectangle);
        assert_eq!(classifier.classify(&quad(200, 100), 20000.0, 600.0), ShapeKind::Rectangle);
    }

    #[test]
    fn test_tighter_tolerance_is_respected() {
        let classifier = HeuristicClassifier { square_aspect_tolerance: 0.05, ..Default::default() };
        assert_eq!(classifier.classify(&quad(108, 100), 10800.0, 416.0), ShapeKind::Rectangle);
        assert_eq!(classifier.classify(&quad(104, 100), 10400.0, 408.0), ShapeKind::Square);
    }

    #[test]
    fn test_round_polygon_is_circle() {
        let classifier = HeuristicClassifier::default();
        // Circle of radius 100 measured on its contour
        let area = std::f64::consts::PI * 100.0 * 100.0;
        let perimeter = std::f64::consts::TAU * 100.0;
        assert_eq!(classifier.classify(&octagon(), area, perimeter), ShapeKind::Circle);
    }

    #[test]
    fn test_irregular_polygon_is_star() {
        let classifier = HeuristicClassifier::default();
        // Five-pointed star: long boundary for its area
        assert_eq!(classifier.classify(&octagon(), 17634.0, 848.0), ShapeKind::Star);
    }

    #[test]
    fn test_circularity_threshold_is_strict() {
        let perimeter = 100.0;
        let area = 0.7 * perimeter * perimeter / (4.0 * std::f64::consts::PI);
        let classifier = HeuristicClassifier { circularity_threshold: circularity(area, perimeter), ..Default::default() };
        assert_eq!(classifier.classify(&octagon(), area, perimeter), ShapeKind::Star);
    }

    #[test]
    fn test_circularity_values() {
        let r = 50.0;
        let c = circularity(std::f64::consts::PI * r * r, std::f64::consts::TAU * r);
        assert!((c - 1.0).abs() < 1e-12);
        assert_eq!(circularity(100.0, 0.0), 0.0);
        // Unit square: π/4
        assert!((circularity(1.0, 4.0) - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }
}
