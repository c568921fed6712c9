use geo_types::{Coord, LineString};
use crate::{traits::PolygonSimplifier, types::{Contour, Polygon}};

/// Douglas-Peucker simplifier using geo crate's implementation.
///
/// The tolerance scales with the contour's own perimeter, so a given outline simplifies to
/// the same vertex count regardless of its size.
#[derive(Debug, Clone)]
pub struct DouglasPeuckerSimplifier {
    pub tolerance_fraction: f64,
}

impl Default for DouglasPeuckerSimplifier {
    fn default() -> Self {
        Self { tolerance_fraction: 0.04 }
    }
}

impl PolygonSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, contour: &Contour) -> Option<Polygon> {
        use geo::Simplify;

        if contour.len() < 3 {
            return None;
        }

        let perimeter = contour.perimeter();
        if perimeter <= 0.0 {
            return None;
        }
        let tolerance = self.tolerance_fraction * perimeter;

        // Close the ring explicitly; the first point is the fixed anchor of the recursion
        let mut coords: Vec<Coord<f64>> = contour.points
            .iter()
            .map(|&[x, y]| Coord { x: x as f64, y: y as f64 })
            .collect();
        coords.push(coords[0]);

        let simplified = LineString::new(coords).simplify(&tolerance);
        let mut vertices: Vec<[i32; 2]> = simplified.coords()
            .map(|coord| [coord.x.round() as i32, coord.y.round() as i32])
            .collect();
        vertices.pop();

        if vertices.len() < 3 {
            return None;
        }

        Some(Polygon::new(vertices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense boundary of an axis-aligned rectangle, one point per pixel step
    fn dense_rectangle(x0: i32, y0: i32, x1: i32, y1: i32) -> Contour {
        let mut points = Vec::new();
        points.extend((x0..x1).map(|x| [x, y0]));
        points.extend((y0..y1).map(|y| [x1, y]));
        points.extend((x0 + 1..=x1).rev().map(|x| [x, y1]));
        points.extend((y0 + 1..=y1).rev().map(|y| [x0, y]));
        Contour::new(points)
    }

    fn dense_circle(cx: f64, cy: f64, radius: f64, samples: usize) -> Contour {
        let points = (0..samples)
            .map(|i| {
                let theta = std::f64::consts::TAU * i as f64 / samples as f64;
                [(cx + radius * theta.sin()).round() as i32, (cy - radius * theta.cos()).round() as i32]
            })
            .collect();
        Contour::new(points)
    }

    #[test]
    fn test_rectangle_reduces_to_four_corners() {
        let polygon = DouglasPeuckerSimplifier::default()
            .simplify(&dense_rectangle(10, 20, 110, 70))
            .expect("Rectangle should simplify");
        assert_eq!(polygon.vertices, vec![[10, 20], [110, 20], [110, 70], [10, 70]]);
    }

    #[test]
    fn test_small_bumps_are_removed() {
        let mut contour = dense_rectangle(0, 0, 100, 100);
        // 2 px notch on the top edge, far below 4% of a 400 px perimeter
        for point in contour.points.iter_mut().filter(|p| p[1] == 0 && (40..45).contains(&p[0])) {
            point[1] = 2;
        }
        let polygon = DouglasPeuckerSimplifier::default()
            .simplify(&contour)
            .expect("Rectangle should simplify");
        assert_eq!(polygon.vertex_count(), 4);
    }

    #[test]
    fn test_circle_keeps_many_vertices() {
        let polygon = DouglasPeuckerSimplifier::default()
            .simplify(&dense_circle(200.0, 200.0, 100.0, 720))
            .expect("Circle should simplify");
        assert!(polygon.vertex_count() >= 6, "got {} vertices", polygon.vertex_count());
    }

    #[test]
    fn test_vertex_count_is_scale_invariant() {
        let simplifier = DouglasPeuckerSimplifier::default();
        let small = simplifier.simplify(&dense_rectangle(0, 0, 60, 30)).expect("Should simplify");
        let large = simplifier.simplify(&dense_rectangle(0, 0, 600, 300)).expect("Should simplify");
        assert_eq!(small.vertex_count(), large.vertex_count());
    }

    #[test]
    fn test_degenerate_contours_are_dropped() {
        let simplifier = DouglasPeuckerSimplifier::default();
        assert!(simplifier.simplify(&Contour::new(vec![[5, 5]])).is_none());
        assert!(simplifier.simplify(&Contour::new(vec![[5, 5], [6, 5]])).is_none());
        // Three identical points: zero perimeter
        assert!(simplifier.simplify(&Contour::new(vec![[5, 5], [5, 5], [5, 5]])).is_none());
        // Flat out-and-back run collapses below three vertices
        assert!(simplifier.simplify(&Contour::new(vec![[0, 0], [5, 0], [10, 0], [5, 0]])).is_none());
    }
}
