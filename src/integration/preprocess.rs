//! Color preprocessing: blur, HSV range threshold and binary morphology.
//!
//! Images are RGB8 [`ImageBuffer`]s; masks are [`GrayImage`]s where
//! [`FOREGROUND`] marks a pixel inside the color range.

use std::fmt;
use std::ops::Deref;

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::filter::box_filter;
use imageproc::map::map_colors;
use imageproc::morphology;

use crate::config::PreprocessConfig;

pub const FOREGROUND: Luma<u8> = Luma([255]);
pub const BACKGROUND: Luma<u8> = Luma([0]);

/// Inclusive HSV range on the 8-bit scale: H in `0..=180`, S and V in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvRange {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Default for HsvRange {
    fn default() -> Self {
        let config = PreprocessConfig::default();
        Self::new(config.hsv_min, config.hsv_max)
    }
}

impl HsvRange {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, rgb: [u8; 3]) -> bool {
        let hsv = rgb_to_hsv(rgb);
        (0..3).all(|i| self.min[i] <= hsv[i] && hsv[i] <= self.max[i])
    }
}

impl fmt::Display for HsvRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hue range: {}-{}\tSaturation range: {}-{}\tValue range: {}-{}",
            self.min[0], self.max[0], self.min[1], self.max[1], self.min[2], self.max[2]
        )
    }
}

/// Convert one RGB pixel to 8-bit-scale HSV (hue halved to fit `0..180`).
///
/// Neither `image` nor `imageproc` ships an HSV conversion.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [f32; 3] {
    let [r, g, b] = rgb.map(f32::from);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { diff / v * 255.0 } else { 0.0 };

    let mut h = if diff == 0.0 {
        0.0
    } else if v == r {
        60.0 * (g - b) / diff
    } else if v == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }

    [h / 2.0, s, v]
}

/// Radius of the square window `imageproc` uses for a kernel of size `k`.
#[inline]
fn radius(k: usize) -> u32 {
    u32::try_from(k / 2).unwrap_or(u32::MAX)
}

#[inline]
fn morph_radius(k: usize) -> u8 {
    u8::try_from(k / 2).unwrap_or(u8::MAX)
}

/// `k x k` mean filter applied per channel. Samples beyond the border
/// replicate the edge pixel.
pub fn box_blur<C>(image: &ImageBuffer<Rgb<u8>, C>, k: usize) -> RgbImage
where
    C: Deref<Target = [u8]>,
{
    let (width, height) = image.dimensions();
    let r = radius(k);

    let planes: Vec<GrayImage> = (0..3)
        .map(|c| {
            let plane = GrayImage::from_fn(width, height, |x, y| Luma([image.get_pixel(x, y)[c]]));
            if r == 0 || width == 0 || height == 0 {
                plane
            } else {
                box_filter(&plane, r, r)
            }
        })
        .collect();

    RgbImage::from_fn(width, height, |x, y| {
        Rgb([0, 1, 2].map(|c| planes[c].get_pixel(x, y)[0]))
    })
}

/// Mark every pixel whose color falls inside `range`.
pub fn threshold(image: &RgbImage, range: &HsvRange) -> GrayImage {
    map_colors(image, |pixel| {
        if range.contains(pixel.0) {
            FOREGROUND
        } else {
            BACKGROUND
        }
    })
}

/// Binary erosion with a square of side `k` (rounded up to odd).
/// Out-of-image samples are ignored.
pub fn erode(mask: &GrayImage, k: usize) -> GrayImage {
    morphology::erode(mask, Norm::LInf, morph_radius(k))
}

/// Binary dilation with a square of side `k` (rounded up to odd).
pub fn dilate(mask: &GrayImage, k: usize) -> GrayImage {
    morphology::dilate(mask, Norm::LInf, morph_radius(k))
}

/// Blur, threshold, then open the mask with repeated erode/dilate passes.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    range: HsvRange,
    blur_kernel: usize,
    erode_kernel: usize,
    dilate_kernel: usize,
    iterations: usize,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(&PreprocessConfig::default())
    }
}

impl Preprocessor {
    pub fn new(config: &PreprocessConfig) -> Self {
        Self {
            range: HsvRange::new(config.hsv_min, config.hsv_max),
            blur_kernel: config.blur_kernel,
            erode_kernel: config.erode_kernel,
            dilate_kernel: config.dilate_kernel,
            iterations: config.iterations,
        }
    }

    pub fn range(&self) -> &HsvRange {
        &self.range
    }

    pub fn run<C>(&self, image: &ImageBuffer<Rgb<u8>, C>) -> GrayImage
    where
        C: Deref<Target = [u8]>,
    {
        let blurred = box_blur(image, self.blur_kernel);
        let mut mask = threshold(&blurred, &self.range);

        for _ in 0..self.iterations {
            mask = erode(&mask, self.erode_kernel);
        }
        for _ in 0..self.iterations {
            mask = dilate(&mask, self.dilate_kernel);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(mask: &mut GrayImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) {
        for y in ys {
            for x in xs.clone() {
                mask.put_pixel(x, y, FOREGROUND);
            }
        }
    }

    #[test]
    fn test_rgb_to_hsv() {
        assert_eq!(rgb_to_hsv([255, 0, 0]), [0.0, 255.0, 255.0]);
        assert_eq!(rgb_to_hsv([0, 255, 0]), [60.0, 255.0, 255.0]);
        assert_eq!(rgb_to_hsv([0, 0, 255]), [120.0, 255.0, 255.0]);
        assert_eq!(rgb_to_hsv([30, 30, 30]), [0.0, 0.0, 30.0]);
        assert_eq!(rgb_to_hsv([0, 0, 0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_default_range() {
        let range = HsvRange::default();
        assert!(range.contains([0, 0, 255]));
        assert!(range.contains([255, 0, 255]));
        assert!(!range.contains([0, 255, 0]));
        assert!(!range.contains([20, 20, 20]));
        assert_eq!(
            range.to_string(),
            "Hue range: 84.19-180\tSaturation range: 113.1-255\tValue range: 141-255"
        );
    }

    #[test]
    fn test_box_blur_uniform_and_edges() {
        let image = RgbImage::from_pixel(5, 5, Rgb([90, 40, 10]));
        assert_eq!(box_blur(&image, 3), image);

        let step = RgbImage::from_fn(6, 1, |x, _| if x < 3 { Rgb([0; 3]) } else { Rgb([90; 3]) });
        let blurred = box_blur(&step, 3);
        let red: Vec<u8> = blurred.pixels().map(|p| p[0]).collect();
        assert_eq!(red, vec![0, 0, 30, 60, 90, 90]);
    }

    #[test]
    fn test_threshold_marks_range() {
        let image = RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgb([0, 0, 255]) } else { Rgb([20, 20, 20]) }
        });
        let mask = threshold(&image, &HsvRange::default());
        assert_eq!(*mask.get_pixel(0, 0), FOREGROUND);
        assert_eq!(*mask.get_pixel(1, 0), BACKGROUND);
    }

    #[test]
    fn test_erode_removes_specks() {
        let mut mask = GrayImage::new(10, 10);
        mask.put_pixel(5, 5, FOREGROUND);
        block(&mut mask, 0..4, 0..4);

        let eroded = erode(&mask, 3);
        assert_eq!(*eroded.get_pixel(5, 5), BACKGROUND);
        assert_eq!(*eroded.get_pixel(2, 2), FOREGROUND);
        assert_eq!(*eroded.get_pixel(3, 3), BACKGROUND);
    }

    #[test]
    fn test_dilate_grows_region() {
        let mut mask = GrayImage::new(7, 7);
        mask.put_pixel(3, 3, FOREGROUND);

        let dilated = dilate(&mask, 3);
        let set = dilated.pixels().filter(|p| **p == FOREGROUND).count();
        assert_eq!(set, 9);
        assert_eq!(*dilated.get_pixel(4, 2), FOREGROUND);
        assert_eq!(*dilated.get_pixel(3, 1), BACKGROUND);
    }

    #[test]
    fn test_preprocessor_isolates_blob() {
        let image = RgbImage::from_fn(80, 60, |x, y| {
            if (20..60).contains(&x) && (10..40).contains(&y) {
                Rgb([20, 20, 255])
            } else {
                Rgb([20, 20, 20])
            }
        });

        let pre = Preprocessor::new(&PreprocessConfig {
            blur_kernel: 3,
            erode_kernel: 3,
            dilate_kernel: 3,
            iterations: 1,
            ..Default::default()
        });
        let mask = pre.run(&image);

        assert_eq!(*mask.get_pixel(40, 25), FOREGROUND);
        assert_eq!(*mask.get_pixel(5, 50), BACKGROUND);
        assert_eq!(*mask.get_pixel(40, 5), BACKGROUND);
    }
}
