//! Graphics support via embedded-graphics
//!
//! This module provides [`FrameBuffer`], a logical frame in the layout
//! [`Panel::draw`](crate::Panel::draw) consumes, implementing the
//! [`DrawTarget`] trait from the embedded-graphics ecosystem.
//!
//! The frame is page-major: byte `(y / 8) * width + x` holds pixel `(x, y)` in
//! bit `y % 8`. A landscape frame (256x128) goes to the controller as is; a
//! portrait frame (128x256) is what the swapped-axis remap expects.
//!
//! ## Example
//!
//! ```rust,ignore
//! use st75256::{FrameBuffer, Panel};
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle},
//! };
//!
//! let mut frame = FrameBuffer::new(display.geometry());
//!
//! Circle::new(Point::new(20, 20), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
//!     .draw(&mut frame)?;
//!
//! frame.flush(&mut display)?;
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::config::Geometry;
use crate::panel::Panel;
use crate::transform::LogicalRect;

/// Bytes in a full 256x128 frame, either way round
pub const FRAME_BUFFER_SIZE: usize = 256 * 128 / 8;

/// Full logical frame at 1 bpp
pub struct FrameBuffer {
    geometry: Geometry,
    buffer: [u8; FRAME_BUFFER_SIZE],
}

impl FrameBuffer {
    /// Create a cleared frame for a panel geometry
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            buffer: [0; FRAME_BUFFER_SIZE],
        }
    }

    /// Raw page-major bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Draw the whole frame through a panel
    ///
    /// # Errors
    ///
    /// Returns whatever [`Panel::draw`] returns.
    pub fn flush<P: Panel + ?Sized>(&self, panel: &mut P) -> Result<(), P::Error> {
        let rect = LogicalRect::new(
            0,
            0,
            i32::from(self.geometry.width),
            i32::from(self.geometry.height),
        );
        panel.draw(rect, &self.buffer)
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: BinaryColor) {
        let index = (y / 8) as usize * usize::from(self.geometry.width) + x as usize;
        let bit = 1 << (y % 8);

        let Some(byte) = self.buffer.get_mut(index) else {
            return;
        };
        match color {
            BinaryColor::On => *byte |= bit,
            BinaryColor::Off => *byte &= !bit,
        }
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 {
                let x = x as u32;
                let y = y as u32;
                if x < sz.width && y < sz.height {
                    self.set_pixel(x, y, color);
                }
            }
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = match color {
            BinaryColor::On => 0xFF,
            BinaryColor::Off => 0x00,
        };
        self.buffer.fill(fill);
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(
            u32::from(self.geometry.width),
            u32::from(self.geometry.height),
        )
    }
}

impl From<Rectangle> for LogicalRect {
    fn from(rect: Rectangle) -> Self {
        let width = i32::try_from(rect.size.width).unwrap_or(i32::MAX);
        let height = i32::try_from(rect.size.height).unwrap_or(i32::MAX);
        LogicalRect::new(
            rect.top_left.x,
            rect.top_left.y,
            rect.top_left.x.saturating_add(width),
            rect.top_left.y.saturating_add(height),
        )
    }
}
