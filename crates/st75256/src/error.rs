//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and panel operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during panel operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level transport errors
//!
//! Every panel operation stops at the first failure and returns it. Nothing is
//! rolled back: state mutated before the failing transfer stays mutated, and the
//! controller may be left in either command set. Recover with
//! [`Panel::init`](crate::Panel::init) or [`Panel::reset`](crate::Panel::reset).
//!
//! ## Example
//!
//! ```
//! use st75256::{Builder, BuilderError, Orientation};
//!
//! let result = Builder::new().bits_per_pixel(2).build();
//! assert!(matches!(result, Err(BuilderError::UnsupportedBitsPerPixel(2))));
//!
//! let result = Orientation::try_from(3u8);
//! assert!(matches!(result, Err(BuilderError::InvalidOrientation(3))));
//! ```

use crate::interface::DisplayInterface;
use crate::transform::InvalidWindow;

/// Number of addressable columns (segment outputs)
pub const MAX_COLUMNS: u16 = 256;

/// Number of addressable pages (8 rows each) in display RAM
pub const MAX_PAGES: u8 = 21;

/// Errors that can occur when driving the panel
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Transport error, passed through unchanged
    Interface(I::Error),
    /// Draw window is empty or outside the controller's address range
    InvalidWindow(InvalidWindow),
    /// The pixel source holds fewer bytes than the window needs
    BufferTooSmall {
        /// Bytes the window transfers
        required: usize,
        /// Bytes available
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::InvalidWindow(InvalidWindow {
                x_start,
                y_start,
                x_end,
                y_end,
            }) => write!(
                f,
                "Invalid window: ({x_start}, {y_start}) -> ({x_end}, {y_end}) (max {MAX_COLUMNS} columns, {MAX_PAGES} pages)"
            ),
            Error::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

impl<I: DisplayInterface> From<InvalidWindow> for Error<I> {
    fn from(window: InvalidWindow) -> Self {
        Error::InvalidWindow(window)
    }
}

/// Errors that can occur when building configuration
///
/// These errors occur before the driver exists, so no transport or GPIO
/// activity has taken place.
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Only 1 bit per pixel is supported
    UnsupportedBitsPerPixel(u8),
    /// Orientation code other than 0 (256x128) or 1 (128x256)
    InvalidOrientation(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::UnsupportedBitsPerPixel(bpp) => {
                write!(f, "Unsupported bits per pixel {bpp} (must be 1)")
            }
            BuilderError::InvalidOrientation(code) => {
                write!(f, "Invalid orientation {code} (0 = 256x128, 1 = 128x256)")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
