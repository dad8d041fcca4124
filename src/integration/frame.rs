use std::time::Duration;

use image::{ImageBuffer, Rgb};

use crate::error::ExtractError;

/// One captured video frame, interleaved RGB8.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub timestamp: Duration,
    pub frame_number: u64,
}

impl Frame {
    pub const CHANNELS: u32 = 3;

    pub fn new(
        width: u32,
        height: u32,
        data: Vec<u8>,
        timestamp_ms: u64,
        frame_number: u64,
    ) -> Self {
        Self {
            width,
            height,
            data,
            timestamp: Duration::from_millis(timestamp_ms),
            frame_number,
        }
    }

    /// A frame filled with a single color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3], frame_number: u64) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take((width * height * Self::CHANNELS) as usize)
            .collect();
        Self::new(width, height, data, 0, frame_number)
    }

    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Borrow the pixels as an RGB image.
    pub fn image(&self) -> Result<RgbView<'_>, ExtractError> {
        rgb_view(&self.data, self.width, self.height)
    }

    pub fn image_mut(&mut self) -> Result<RgbViewMut<'_>, ExtractError> {
        let (len, width, height) = (self.data.len(), self.width, self.height);
        check_len(len, width, height)?;
        ImageBuffer::from_raw(width, height, &mut self.data[..])
            .ok_or_else(|| dimension_error(len, width, height))
    }
}

pub type RgbView<'a> = ImageBuffer<Rgb<u8>, &'a [u8]>;
pub type RgbViewMut<'a> = ImageBuffer<Rgb<u8>, &'a mut [u8]>;

/// View an interleaved RGB8 buffer as an image without copying.
///
/// The buffer must hold exactly `width * height * 3` bytes.
pub fn rgb_view(data: &[u8], width: u32, height: u32) -> Result<RgbView<'_>, ExtractError> {
    check_len(data.len(), width, height)?;
    ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| dimension_error(data.len(), width, height))
}

fn check_len(len: usize, width: u32, height: u32) -> Result<(), ExtractError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(Frame::CHANNELS as usize));
    if expected == Some(len) {
        Ok(())
    } else {
        Err(dimension_error(len, width, height))
    }
}

fn dimension_error(len: usize, width: u32, height: u32) -> ExtractError {
    ExtractError::InvalidInputDimensions {
        expected: (width, height, Frame::CHANNELS),
        got: len,
    }
}
