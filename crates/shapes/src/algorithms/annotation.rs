use ab_glyph::{FontRef, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_line_segment_mut, draw_text_mut, text_size};
use crate::{
    config::AnnotationStyle,
    error::{Result, ShapeError},
    types::{Polygon, ShapeKind},
};

static LABEL_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Draws simplified outlines and their labels onto an RGB canvas
pub struct Annotator {
    style: AnnotationStyle,
    font: FontRef<'static>,
}

impl Annotator {
    pub fn new(style: AnnotationStyle) -> Result<Self> {
        let font = FontRef::try_from_slice(LABEL_FONT)
            .map_err(|e| ShapeError::Font(e.to_string()))?;
        Ok(Self { style, font })
    }

    /// Outline `polygon` and write `shape` with its baseline at the first vertex
    pub fn annotate(&self, canvas: &mut RgbImage, polygon: &Polygon, shape: ShapeKind) {
        self.draw_outline(canvas, polygon);
        if let Some(anchor) = polygon.first_vertex() {
            let label: &'static str = shape.into();
            self.draw_label(canvas, anchor, label);
        }
    }

    fn draw_outline(&self, canvas: &mut RgbImage, polygon: &Polygon) {
        let color = Rgb(self.style.outline_color);
        let thickness = self.style.outline_thickness.max(1) as i32;
        // Square brush: offsets cover `thickness` pixels in each axis
        let offsets = -(thickness - 1) / 2..=thickness / 2;

        let vertices = &polygon.vertices;
        for (i, &[x0, y0]) in vertices.iter().enumerate() {
            let [x1, y1] = vertices[(i + 1) % vertices.len()];
            for dy in offsets.clone() {
                for dx in offsets.clone() {
                    draw_line_segment_mut(
                        canvas,
                        ((x0 + dx) as f32, (y0 + dy) as f32),
                        ((x1 + dx) as f32, (y1 + dy) as f32),
                        color,
                    );
                }
            }
        }
    }

    fn draw_label(&self, canvas: &mut RgbImage, [x, y]: [i32; 2], text: &str) {
        let scale = PxScale::from(self.style.label_scale);
        let (text_width, text_height) = text_size(scale, &self.font, text);

        let max_x = (canvas.width() as i32 - text_width as i32).max(0);
        let max_y = (canvas.height() as i32 - text_height as i32).max(0);
        let x = x.clamp(0, max_x);
        let y = (y - text_height as i32).clamp(0, max_y);

        draw_text_mut(canvas, Rgb(self.style.label_color), x, y, scale, &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotator() -> Annotator {
        Annotator::new(AnnotationStyle::default()).expect("Embedded font should load")
    }

    #[test]
    fn test_outline_is_drawn_with_thickness() {
        let mut canvas = RgbImage::new(100, 100);
        let polygon = Polygon::new(vec![[20, 40], [80, 40], [80, 90], [20, 90]]);
        annotator().annotate(&mut canvas, &polygon, ShapeKind::Rectangle);

        let outline = Rgb([0, 255, 255]);
        // Bottom edge, two pixels thick
        assert_eq!(*canvas.get_pixel(50, 90), outline);
        assert_eq!(*canvas.get_pixel(50, 91), outline);
        // Right edge
        assert_eq!(*canvas.get_pixel(80, 70), outline);
        // Interior untouched
        assert_eq!(*canvas.get_pixel(50, 70), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_label_is_drawn_above_first_vertex() {
        let mut canvas = RgbImage::new(200, 200);
        let polygon = Polygon::new(vec![[40, 100], [160, 100], [100, 180]]);
        annotator().annotate(&mut canvas, &polygon, ShapeKind::Triangle);

        let label_pixels = (40..160)
            .flat_map(|x| (70..100).map(move |y| (x, y)))
            .filter(|&(x, y)| {
                let p = canvas.get_pixel(x, y);
                p[0] > 0 && p[0] == p[1] && p[1] == p[2]
            })
            .count();
        assert!(label_pixels > 0, "Label text should be drawn above the anchor");
    }

    #[test]
    fn test_label_near_border_stays_on_canvas() {
        let mut canvas = RgbImage::new(60, 60);
        let polygon = Polygon::new(vec![[55, 2], [58, 50], [30, 50]]);
        // Must not panic and must draw something
        annotator().annotate(&mut canvas, &polygon, ShapeKind::Triangle);
        assert!(canvas.pixels().any(|p| *p == Rgb([255, 255, 255]) || p[0] > 0));
    }
}
