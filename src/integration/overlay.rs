//! Drawing the accepted region onto the display frame.

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use tracing::warn;

use crate::integration::frame::Frame;
use crate::tracker::BoundingBox;

/// Receives the accepted box for a frame, only when one passed the filter.
pub trait OverlayRenderer {
    fn render(&mut self, frame: &mut Frame, accepted: &BoundingBox);
}

impl<F> OverlayRenderer for F
where
    F: FnMut(&mut Frame, &BoundingBox),
{
    fn render(&mut self, frame: &mut Frame, accepted: &BoundingBox) {
        self(frame, accepted)
    }
}

/// Draws a rectangle outline, clipped to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineRenderer {
    pub color: [u8; 3],
    pub thickness: u32,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 1,
        }
    }
}

impl OverlayRenderer for OutlineRenderer {
    fn render(&mut self, frame: &mut Frame, accepted: &BoundingBox) {
        let mut image = match frame.image_mut() {
            Ok(image) => image,
            Err(err) => {
                warn!(%err, "skipping overlay on malformed frame");
                return;
            }
        };
        let color = Rgb(self.color);

        // Thicker outlines are nested one-pixel rectangles drawn inwards.
        for inset in 0..self.thickness.max(1) as i32 {
            let width = accepted.width - 2 * inset;
            let height = accepted.height - 2 * inset;
            if width <= 0 || height <= 0 {
                break;
            }
            let rect = Rect::at(accepted.x + inset, accepted.y + inset)
                .of_size(width as u32, height as u32);
            draw_hollow_rect_mut(&mut image, rect, color);
        }
    }
}
