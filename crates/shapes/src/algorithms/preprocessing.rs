use image::{DynamicImage, GrayImage, Luma, Rgb};
use imageproc::distance_transform::Norm;
use imageproc::integral_image::{integral_image, sum_image_pixels};
use crate::{config::gaussian_sigma_for_kernel, traits::MaskPreprocessor};

/// Collapse a color image to one intensity channel using BT.601 luma weights
pub fn to_intensity(image: &DynamicImage) -> GrayImage {
    let rgb = image.to_rgb8();
    imageproc::map::map_colors(&rgb, |Rgb([r, g, b])| {
        let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
        Luma([luma.round().clamp(0.0, 255.0) as u8])
    })
}

/// Gaussian blur with an explicit kernel size
#[derive(Debug, Clone)]
pub struct GaussianBlurPreprocessor {
    pub kernel_size: u32,
    pub sigma: f32,
}

impl GaussianBlurPreprocessor {
    /// Kernel of the given size with the conventional sigma for that size
    pub fn with_kernel(kernel_size: u32) -> Self {
        Self {
            kernel_size,
            sigma: gaussian_sigma_for_kernel(kernel_size),
        }
    }

    fn kernel(&self) -> Vec<f32> {
        let radius = (self.kernel_size / 2) as i32;
        let two_sigma_sq = 2.0 * self.sigma * self.sigma;
        let mut weights: Vec<f32> = (-radius..=radius)
            .map(|i| (-((i * i) as f32) / two_sigma_sq).exp())
            .collect();
        let sum: f32 = weights.iter().sum();
        weights.iter_mut().for_each(|w| *w /= sum);
        weights
    }
}

impl Default for GaussianBlurPreprocessor {
    fn default() -> Self {
        Self::with_kernel(7)
    }
}

impl MaskPreprocessor for GaussianBlurPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> GrayImage {
        if self.kernel_size <= 1 || self.sigma <= 0.0 {
            return image.clone();
        }
        imageproc::filter::separable_filter_equal(image, &self.kernel())
    }
}

/// Inverted mean-adaptive threshold: a pixel becomes foreground (255) when it is at least
/// `bias` darker than the mean of its `block_size` x `block_size` neighbourhood.
#[derive(Debug, Clone)]
pub struct AdaptiveThresholdPreprocessor {
    pub block_size: u32,
    pub bias: f64,
}

impl Default for AdaptiveThresholdPreprocessor {
    fn default() -> Self {
        Self {
            block_size: 11,
            bias: 2.0,
        }
    }
}

impl MaskPreprocessor for AdaptiveThresholdPreprocessor {
    fn preprocess(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        let mut out = GrayImage::new(width, height);
        if width == 0 || height == 0 {
            return out;
        }

        let radius = self.block_size / 2;
        let integral = integral_image::<_, u32>(image);

        for y in 0..height {
            let top = y.saturating_sub(radius);
            let bottom = (y + radius).min(height - 1);
            for x in 0..width {
                // Window is clipped at the borders
                let left = x.saturating_sub(radius);
                let right = (x + radius).min(width - 1);
                let count = (right - left + 1) * (bottom - top + 1);
                let sum = sum_image_pixels(&integral, left, top, right, bottom)[0];
                let mean = sum as f64 / count as f64;

                if image.get_pixel(x, y)[0] as f64 <= mean - self.bias {
                    out.put_pixel(x, y, Luma([255u8]));
                }
            }
        }

        out
    }
}

/// Morphological closing with a square structuring element, repeated `iterations` times
#[derive(Debug, Clone)]
pub struct MorphologicalClosePreprocessor {
    pub kernel_size: u32,
    pub iterations: u32,
}

impl Default for MorphologicalClosePreprocessor {
    fn default() -> Self {
        Self {
            kernel_size: 3,
            iterations: 2,
        }
    }
}

impl MaskPreprocessor for MorphologicalClosePreprocessor {
    fn preprocess(&self, image: &GrayImage) -> GrayImage {
        // n dilations by a (2r+1) square equal one dilation by a (2nr+1) square
        let radius = (self.kernel_size / 2).saturating_mul(self.iterations).min(u8::MAX as u32) as u8;
        if radius == 0 {
            return image.clone();
        }
        imageproc::morphology::close(image, Norm::LInf, radius)
    }
}
