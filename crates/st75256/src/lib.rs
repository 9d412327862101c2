//! Driver for the Sitronix ST75256 monochrome LCD controller, for use with
//! embedded-hal v1.0
//!
//! The controller addresses its RAM by column and 8-row page and splits its
//! commands over two selectable command sets. This crate turns rectangles of a
//! 1 bpp logical frame into column/page windows, transposes the frame when the
//! panel is mounted with swapped axes, and handles the Y mirror and viewport
//! offset.
//!
//! ## Example
//!
//! ```rust,ignore
//! use st75256::{Builder, Display, I2cInterface, LogicalRect, NoResetPin, Orientation, Panel};
//!
//! let config = Builder::new()
//!     .orientation(Orientation::Landscape)
//!     .build()?;
//! let mut display = Display::new(I2cInterface::new(i2c), None::<NoResetPin>, delay, config);
//!
//! display.reset()?;
//! display.init()?;
//! display.power(true)?;
//!
//! display.draw(LogicalRect::new(0, 0, 256, 128), &frame)?;
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod command;
mod config;
mod display;
mod error;
#[cfg(feature = "graphics")]
mod graphics;
mod interface;
mod panel;
mod protocol;
pub mod remap;
pub mod transform;

pub use config::{
    Builder, BuilderError, Config, Geometry, MAX_COLUMNS, MAX_PAGES, Orientation, ResetLevel,
};
pub use display::Display;
pub use error::Error;
#[cfg(feature = "graphics")]
pub use graphics::{FRAME_BUFFER_SIZE, FrameBuffer};
pub use interface::{
    DEFAULT_I2C_ADDRESS, DisplayInterface, I2cInterface, InterfaceError, NoResetPin, SpiInterface,
};
pub use panel::Panel;
pub use remap::{REMAP_BUFFER_SIZE, RemapBuffer};
pub use transform::{AxisState, Gap, InvalidWindow, LogicalRect, PhysicalWindow};
