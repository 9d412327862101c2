//! Operation set a host graphics layer drives a panel through

use crate::transform::LogicalRect;

/// Panel operations exposed to the host
///
/// [`Display`](crate::display::Display) is the implementation; hosts can hold
/// it generically or as `&mut dyn Panel<Error = E>`. Every operation returns
/// the first transport failure and leaves already-updated state as it is.
///
/// Teardown is [`Display::destroy`](crate::display::Display::destroy), not a
/// trait method: it consumes the driver and hands back its concrete channel,
/// reset line and delay, which a trait object cannot name without widening
/// `dyn Panel` to a parts type.
pub trait Panel {
    /// Error returned by transport-facing operations
    type Error;

    /// Pulse the reset line, if one is configured
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Run the power-up sequence and clear display RAM
    ///
    /// The display stays off until [`power`](Self::power) turns it on.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Write `pixels` to the region `rect` of the logical frame
    fn draw(&mut self, rect: LogicalRect, pixels: &[u8]) -> Result<(), Self::Error>;

    /// Invert or restore pixel polarity
    fn invert(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Set the scan mirror bits
    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), Self::Error>;

    /// Swap logical X and Y relative to the physical scan
    fn swap_xy(&mut self, swap: bool) -> Result<(), Self::Error>;

    /// Offset applied to every later draw
    fn set_gap(&mut self, x: i32, y: i32);

    /// Turn the display on or off
    fn power(&mut self, on: bool) -> Result<(), Self::Error>;
}
