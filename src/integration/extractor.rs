//! Candidate region extraction.

use std::collections::HashMap;

use image::{GrayImage, Luma};
use imageproc::region_labelling::{Connectivity, connected_components};

use crate::config::PreprocessConfig;
use crate::error::ExtractError;
use crate::integration::frame::rgb_view;
use crate::integration::preprocess::Preprocessor;
use crate::tracker::BoundingBox;

/// Anything that turns a raw frame into candidate regions.
///
/// Implement this trait to plug a different vision backend in front of the
/// tracker. The returned order matters: only the first candidate is ever
/// considered by the tracker.
///
/// # Example
///
/// ```ignore
/// use colortrack_rs::{BoundingBox, RegionSource};
///
/// struct FixedRegions(Vec<BoundingBox>);
///
/// impl RegionSource for FixedRegions {
///     type Error = std::convert::Infallible;
///
///     fn regions(&mut self, _input: &[u8], _width: u32, _height: u32) -> Result<Vec<BoundingBox>, Self::Error> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait RegionSource {
    /// Error type for extraction failures.
    type Error;

    /// Extract candidate regions from an interleaved RGB8 image.
    ///
    /// An empty vector is a valid answer and means the target is lost.
    fn regions(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<BoundingBox>, Self::Error>;
}

/// Bounding boxes of the 8-connected foreground components of `mask`.
///
/// Any non-zero pixel is foreground. Components are ordered by the raster
/// position (row-major) of their first pixel, not by size.
pub fn extract_regions(mask: &GrayImage) -> Vec<BoundingBox> {
    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    // Label -> index into `extents`, in order of first appearance.
    let mut index: HashMap<u32, usize> = HashMap::new();
    let mut extents: Vec<[u32; 4]> = Vec::new();

    for (x, y, label) in labels.enumerate_pixels() {
        let label = label[0];
        if label == 0 {
            continue;
        }
        let i = *index.entry(label).or_insert_with(|| {
            extents.push([x, y, x, y]);
            extents.len() - 1
        });
        let [x1, y1, x2, y2] = &mut extents[i];
        *x1 = (*x1).min(x);
        *y1 = (*y1).min(y);
        *x2 = (*x2).max(x);
        *y2 = (*y2).max(y);
    }

    extents
        .into_iter()
        .map(|[x1, y1, x2, y2]| {
            BoundingBox::from_extents(x1 as i32, y1 as i32, x2 as i32, y2 as i32)
        })
        .collect()
}

/// Color-threshold region source: preprocess, then label components.
#[derive(Debug, Clone, Default)]
pub struct ColorRegionSource {
    preprocessor: Preprocessor,
}

impl ColorRegionSource {
    pub fn new(config: &PreprocessConfig) -> Self {
        Self {
            preprocessor: Preprocessor::new(config),
        }
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }
}

impl RegionSource for ColorRegionSource {
    type Error = ExtractError;

    fn regions(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<BoundingBox>, Self::Error> {
        let image = rgb_view(input, width, height)?;
        if width == 0 || height == 0 {
            return Ok(Vec::new());
        }

        let mask = self.preprocessor.run(&image);
        Ok(extract_regions(&mask))
    }
}
