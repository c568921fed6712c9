use image::GrayImage;
use imageproc::contours::BorderType;
use crate::{traits::ContourExtractor, types::Contour};

/// Border-following extractor that keeps only outermost region boundaries.
///
/// Contours are returned in raster discovery order (by the first pixel of each border met
/// scanning rows top to bottom, left to right). Hole borders and regions nested inside holes
/// are dropped.
#[derive(Debug, Clone)]
pub struct ExternalContourExtractor {
    /// Replace straight runs of boundary pixels by their end points
    pub compress: bool,
}

impl Default for ExternalContourExtractor {
    fn default() -> Self {
        Self { compress: true }
    }
}

impl ContourExtractor for ExternalContourExtractor {
    fn extract_contours(&self, mask: &GrayImage) -> Vec<Contour> {
        imageproc::contours::find_contours::<i32>(mask)
            .into_iter()
            .filter(|contour| contour.border_type == BorderType::Outer && contour.parent.is_none())
            .map(|contour| {
                let points: Vec<[i32; 2]> = contour.points.iter().map(|p| [p.x, p.y]).collect();
                if self.compress {
                    Contour::new(compress_runs(&points))
                } else {
                    Contour::new(points)
                }
            })
            .collect()
    }
}

/// Drop every point whose incoming and outgoing steps point the same way.
///
/// Border points are 8-connected, so equal steps mean the point lies inside a straight run.
fn compress_runs(points: &[[i32; 2]]) -> Vec<[i32; 2]> {
    let n = points.len();
    if n < 3 {
        return points.to_vec();
    }

    let compressed: Vec<[i32; 2]> = (0..n)
        .filter(|&i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];
            let incoming = [curr[0] - prev[0], curr[1] - prev[1]];
            let outgoing = [next[0] - curr[0], next[1] - curr[1]];
            incoming != outgoing
        })
        .map(|i| points[i])
        .collect();

    // Only reachable when every step is identical
    if compressed.is_empty() {
        points.to_vec()
    } else {
        compressed
    }
}
