//! Frame compositor: centers a screenshot inside a frame, rounds its
//! corners, and draws the frame over it.
//!
//! The frame acts as a bezel. Its transparent window lets the clipped
//! screenshot show through while opaque regions cover it.

use image::{imageops, GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use shotframe_common::error::{ShotframeError, ShotframeResult};

const MASK_INSIDE: Luma<u8> = Luma([255]);

/// Top-left position of a screenshot on the frame canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

/// Offset that centers a `shot`-sized image inside a `frame`-sized canvas.
///
/// Division truncates toward zero, so an odd leftover pixel goes to the
/// right/bottom margin. Oversized screenshots produce negative offsets.
pub fn centering_offset(frame: (u32, u32), shot: (u32, u32)) -> Offset {
    Offset {
        x: (frame.0 as i64 - shot.0 as i64) / 2,
        y: (frame.1 as i64 - shot.1 as i64) / 2,
    }
}

/// Subpixel grid per axis used to anti-alias the clip mask edges.
const MASK_SUPERSAMPLE: u32 = 4;

/// Build a `width`x`height` coverage mask shaped like a rounded rectangle.
///
/// Each value is the fraction of the pixel inside the shape, scaled to
/// `0..=255`: 255 inside, 0 in the cut-away corners, and partial values
/// along the arcs. The radius is clamped to half the shorter side.
pub fn rounded_rect_mask(width: u32, height: u32, radius: u32) -> GrayImage {
    let s = MASK_SUPERSAMPLE;
    let hires = binary_rounded_rect(width * s, height * s, radius.saturating_mul(s));
    let samples = s * s;

    GrayImage::from_fn(width, height, |x, y| {
        let mut covered = 0u32;
        for dy in 0..s {
            for dx in 0..s {
                if hires.get_pixel(x * s + dx, y * s + dy)[0] != 0 {
                    covered += 1;
                }
            }
        }
        Luma([(covered * 255 / samples) as u8])
    })
}

/// Rounded rectangle with hard edges: 255 inside, 0 outside.
fn binary_rounded_rect(width: u32, height: u32, radius: u32) -> GrayImage {
    let r = radius.min(width / 2).min(height / 2);
    if r == 0 {
        return GrayImage::from_pixel(width, height, MASK_INSIDE);
    }

    let mut mask = GrayImage::new(width, height);

    // Cross made of two bands, then one circle per corner.
    if height > 2 * r {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(0, r as i32).of_size(width, height - 2 * r),
            MASK_INSIDE,
        );
    }
    if width > 2 * r {
        draw_filled_rect_mut(
            &mut mask,
            Rect::at(r as i32, 0).of_size(width - 2 * r, height),
            MASK_INSIDE,
        );
    }

    let (left, top) = (r as i32, r as i32);
    let right = (width - 1 - r) as i32;
    let bottom = (height - 1 - r) as i32;
    for center in [(left, top), (right, top), (left, bottom), (right, bottom)] {
        draw_filled_circle_mut(&mut mask, center, r as i32, MASK_INSIDE);
    }

    mask
}

/// Scale `pixel`'s alpha by mask `coverage`, i.e. draw it over a transparent
/// pixel through the clip.
fn apply_coverage(mut pixel: Rgba<u8>, coverage: u8) -> Rgba<u8> {
    pixel[3] = ((pixel[3] as u32 * coverage as u32 + 127) / 255) as u8;
    pixel
}

/// Composites screenshots onto a single shared frame.
#[derive(Debug, Clone)]
pub struct Compositor {
    frame: RgbaImage,
    corner_radius: u32,
}

impl Compositor {
    pub fn new(frame: RgbaImage, corner_radius: u32) -> Self {
        Self {
            frame,
            corner_radius,
        }
    }

    /// Compose `screenshot` into a new image with the frame's dimensions.
    ///
    /// Screenshots larger than the frame on either axis are rejected with
    /// [`ShotframeError::ScreenshotTooLarge`]; the path is left empty for
    /// the caller to fill in.
    pub fn compose(&self, screenshot: &RgbaImage) -> ShotframeResult<RgbaImage> {
        let frame_dims = self.frame.dimensions();
        let shot_dims = screenshot.dimensions();

        if shot_dims.0 > frame_dims.0 || shot_dims.1 > frame_dims.1 {
            return Err(ShotframeError::ScreenshotTooLarge {
                path: Default::default(),
                shot_width: shot_dims.0,
                shot_height: shot_dims.1,
                frame_width: frame_dims.0,
                frame_height: frame_dims.1,
            });
        }

        let offset = centering_offset(frame_dims, shot_dims);
        let mask = rounded_rect_mask(shot_dims.0, shot_dims.1, self.corner_radius);
        tracing::debug!(
            offset_x = offset.x,
            offset_y = offset.y,
            width = shot_dims.0,
            height = shot_dims.1,
            "Placing screenshot"
        );

        // Offsets are non-negative once the size check has passed.
        let (ox, oy) = (offset.x as u32, offset.y as u32);
        let mut canvas = RgbaImage::new(frame_dims.0, frame_dims.1);
        for (x, y, pixel) in screenshot.enumerate_pixels() {
            let coverage = mask.get_pixel(x, y)[0];
            if coverage != 0 {
                canvas.put_pixel(ox + x, oy + y, apply_coverage(*pixel, coverage));
            }
        }

        imageops::overlay(&mut canvas, &self.frame, 0, 0);
        Ok(canvas)
    }
}
