use std::collections::BTreeMap;

use geo_types::{Coord, LineString, Polygon as GeoPolygon};
use image::RgbImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::Result;

/// Closed outer boundary of one foreground region, in pixel coordinates.
///
/// Straight runs may be compressed to their end points; the loop is implicitly closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Contour {
    pub points: Vec<[i32; 2]>,
}

impl Contour {
    pub fn new(points: Vec<[i32; 2]>) -> Self {
        Self { points }
    }

    /// Convert to geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> GeoPolygon<f64> {
        to_geo_polygon(&self.points)
    }

    /// Enclosed area (shoelace formula over the closed loop)
    pub fn area(&self) -> f64 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Length of the closed loop, including the segment back to the first point
    pub fn perimeter(&self) -> f64 {
        use geo::EuclideanLength;
        self.to_geo_polygon().exterior().euclidean_length()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Simplified outline of a contour. Always at least three vertices, implicitly closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Polygon {
    pub vertices: Vec<[i32; 2]>,
}

impl Polygon {
    pub fn new(vertices: Vec<[i32; 2]>) -> Self {
        Self { vertices }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Axis-aligned bounding box with inclusive pixel extents
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;

        for &[x, y] in &self.vertices {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        if self.vertices.is_empty() {
            return BoundingBox { x: 0, y: 0, width: 0, height: 0 };
        }

        BoundingBox {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        }
    }

    /// Width over height of the bounding box
    pub fn aspect_ratio(&self) -> f64 {
        self.bounding_box().aspect_ratio()
    }

    pub fn first_vertex(&self) -> Option<[i32; 2]> {
        self.vertices.first().copied()
    }
}

/// Bounding box in the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f64 / self.height as f64
    }
}

/// The closed set of labels the classifier can assign.
#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
    PartialEq, Eq, PartialOrd, Ord, Hash
)]
pub enum ShapeKind {
    Triangle,
    Square,
    Rectangle,
    Circle,
    /// Anything with five or more vertices that is not round enough to be a circle
    Star,
}

/// One accepted and labelled object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectedObject {
    /// 1-based, in the order objects were accepted
    pub index: usize,
    pub shape: ShapeKind,
    /// Contour area in px²
    pub area: f64,
    /// Contour perimeter in px
    pub perimeter: f64,
    /// `4π·area / perimeter²`
    pub circularity: f64,
    pub bounding_box: BoundingBox,
    pub polygon: Polygon,
}

/// Output of one pipeline run over one image.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub objects: Vec<DetectedObject>,
    /// Copy of the source with every accepted object outlined and labelled
    #[serde(skip)]
    pub annotated: RgbImage,
    pub image_width: u32,
    pub image_height: u32,
}

impl Report {
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of objects per label, in label order
    pub fn count_by_shape(&self) -> BTreeMap<ShapeKind, usize> {
        let mut counts = BTreeMap::new();
        for object in &self.objects {
            *counts.entry(object.shape).or_insert(0) += 1;
        }
        counts
    }

    /// Objects and image dimensions as pretty JSON; the annotated image is not included
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn to_geo_polygon(points: &[[i32; 2]]) -> GeoPolygon<f64> {
    let coords: Vec<Coord<f64>> = points
        .iter()
        .map(|&[x, y]| Coord { x: x as f64, y: y as f64 })
        .collect();

    GeoPolygon::new(LineString::new(coords), vec![])
}
