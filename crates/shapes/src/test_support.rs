//! Synthetic scenes for tests: dark filled shapes on a white background.

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;

pub const INK: Rgb<u8> = Rgb([0, 0, 0]);
pub const PAPER: Rgb<u8> = Rgb([255, 255, 255]);

pub fn blank(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, PAPER)
}

/// Equilateral triangle, apex up, with the apex at `(apex_x, apex_y)`
pub fn draw_triangle(canvas: &mut RgbImage, apex_x: i32, apex_y: i32, side: i32) {
    let height = (side as f64 * 3f64.sqrt() / 2.0).round() as i32;
    let points = [
        Point::new(apex_x, apex_y),
        Point::new(apex_x + side / 2, apex_y + height),
        Point::new(apex_x - side / 2, apex_y + height),
    ];
    draw_polygon_mut(canvas, &points, INK);
}

pub fn draw_rect(canvas: &mut RgbImage, x: i32, y: i32, width: u32, height: u32) {
    draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(width, height), INK);
}

pub fn draw_circle(canvas: &mut RgbImage, cx: i32, cy: i32, radius: i32) {
    draw_filled_circle_mut(canvas, (cx, cy), radius, INK);
}

/// Five-pointed star centred at `(cx, cy)`
pub fn draw_star(canvas: &mut RgbImage, cx: i32, cy: i32, outer: f64, inner: f64) {
    let points: Vec<Point<i32>> = (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let theta = std::f64::consts::PI * i as f64 / 5.0;
            Point::new(
                cx + (radius * theta.sin()).round() as i32,
                cy - (radius * theta.cos()).round() as i32,
            )
        })
        .collect();
    draw_polygon_mut(canvas, &points, INK);
}

pub fn triangle_scene() -> DynamicImage {
    let mut canvas = blank(400, 400);
    draw_triangle(&mut canvas, 200, 100, 200);
    DynamicImage::ImageRgb8(canvas)
}

pub fn circle_scene() -> DynamicImage {
    let mut canvas = blank(400, 400);
    draw_circle(&mut canvas, 200, 200, 100);
    DynamicImage::ImageRgb8(canvas)
}

pub fn square_scene() -> DynamicImage {
    let mut canvas = blank(400, 400);
    draw_rect(&mut canvas, 125, 125, 150, 150);
    DynamicImage::ImageRgb8(canvas)
}

pub fn star_scene() -> DynamicImage {
    let mut canvas = blank(400, 400);
    draw_star(&mut canvas, 200, 200, 120.0, 50.0);
    DynamicImage::ImageRgb8(canvas)
}

/// Dark square and circle on a background that brightens from left to right
pub fn gradient_scene() -> DynamicImage {
    let mut canvas = RgbImage::from_fn(400, 300, |x, _| {
        let level = (120 + x / 4) as u8;
        Rgb([level, level, level])
    });
    draw_rect(&mut canvas, 60, 90, 120, 120);
    draw_circle(&mut canvas, 290, 150, 80);
    DynamicImage::ImageRgb8(canvas)
}

/// Triangle on the left, 200 x 100 rectangle on the right, rectangle lower down
pub fn two_shape_scene() -> DynamicImage {
    let mut canvas = blank(700, 400);
    draw_triangle(&mut canvas, 170, 60, 200);
    draw_rect(&mut canvas, 400, 150, 200, 100);
    DynamicImage::ImageRgb8(canvas)
}
