//! Monochrome frame buffer for the watch screen.
//!
//! Pixels are packed eight to a byte, row by row, most significant bit first,
//! which is the layout small monochrome panels expect. The buffer implements
//! `embedded_graphics::DrawTarget`, so anything embedded-graphics can draw
//! lands here; pixels outside the screen are silently dropped, which is what
//! lets slots slide in and out across the edges.

use crate::WatchError;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

pub struct FrameBuffer {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, WatchError> {
        if width == 0 || height == 0 {
            return Err(WatchError::Display(format!(
                "cannot create a {}x{} frame",
                width, height
            )));
        }
        // Each row has (width+7)/8 bytes
        let len = width.div_ceil(8).checked_mul(height).ok_or_else(|| {
            WatchError::Display(format!("a {}x{} frame is too large", width, height))
        })?;
        Ok(Self {
            width,
            height,
            bits: vec![0x00; len as usize],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw packed rows.
    pub fn bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let (index, mask) = self.locate(x, y);
        if on {
            self.bits[index] |= mask;
        } else {
            self.bits[index] &= !mask;
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (index, mask) = self.locate(x, y);
        self.bits[index] & mask != 0
    }

    /// Number of lit pixels.
    pub fn lit_pixels(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    /// Whether any pixel in columns `x0..x1` of rows `y0..y1` is lit.
    pub fn any_lit_in(&self, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
        (y0..y1.min(self.height)).any(|y| (x0..x1.min(self.width)).any(|x| self.pixel(x, y)))
    }

    /// One text row per pixel row, `#` for lit and space for dark.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.pixel(x, y) { '#' } else { ' ' });
            }
            out.push('\n');
        }
        out
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        let bytes_per_row = self.width.div_ceil(8) as usize;
        let index = y as usize * bytes_per_row + (x / 8) as usize;
        (index, 0x80 >> (x % 8))
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            self.set_pixel(point.x as u32, point.y as u32, color.is_on());
        }
        Ok(())
    }
}
