//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait, the command channel the
//! driver talks through, and two implementations:
//!
//! - [`SpiInterface`]: 4-wire SPI with an A0 (data/command) pin
//! - [`I2cInterface`]: I2C with a control byte in front of every transfer
//!
//! The reset line is not part of the channel. It is optional and handed to
//! [`Display`](crate::display::Display) separately; [`NoResetPin`] names the
//! "no reset line" case.
//!
//! ## Example
//!
//! ```rust,ignore
//! use st75256::{I2cInterface, DisplayInterface};
//!
//! let mut interface = I2cInterface::new(i2c_bus);
//!
//! interface.send_command(0x30)?; // command set 1
//! interface.send_data(&[0x1E, 0x05])?;
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

/// Default 7-bit I2C address of the ST75256
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Control byte announcing a command byte (I2C)
const I2C_CONTROL_COMMAND: u8 = 0x00;

/// Control byte announcing a data stream (I2C)
const I2C_CONTROL_DATA: u8 = 0x40;

/// Data bytes per I2C write, excluding the control byte
const I2C_DATA_CHUNK: usize = 32;

/// Command channel to the ST75256 controller
///
/// Implementations must not buffer: every call is one observable transfer,
/// and the first failure is returned as is.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or a control pin fails.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send parameter or pixel bytes to the controller
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or a control pin fails.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Errors that can occur at the interface level
#[derive(Debug)]
pub enum InterfaceError<BusErr, PinErr> {
    /// SPI or I2C communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Bus(e) => write!(f, "Bus error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

/// SPI interface for ST75256
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - A0 pin implementing [`OutputPin`] (low = command, high = data)
pub struct SpiInterface<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Create a new SPI interface
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Give back the SPI device and A0 pin
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin,
{
    type Error = InterfaceError<SPI::Error, DC::Error>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)
    }
}

/// I2C interface for ST75256
///
/// Commands go out as `[0x00, command]`, data as `[0x40, bytes...]` split into
/// writes of at most 32 data bytes so no heap buffer is needed.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C>
where
    I2C: I2c,
{
    /// Create a new I2C interface at the default address (0x3C)
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_I2C_ADDRESS)
    }

    /// Create a new I2C interface at a custom 7-bit address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Give back the I2C bus
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DisplayInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = InterfaceError<I2C::Error, Infallible>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.i2c
            .write(self.address, &[I2C_CONTROL_COMMAND, command])
            .map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        let mut frame = [0u8; I2C_DATA_CHUNK + 1];
        frame[0] = I2C_CONTROL_DATA;
        for chunk in data.chunks(I2C_DATA_CHUNK) {
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c
                .write(self.address, &frame[..=chunk.len()])
                .map_err(InterfaceError::Bus)?;
        }
        Ok(())
    }
}

/// Stand-in reset pin for boards without a reset line
///
/// Use as the `RST` type when passing `None` as the reset pin.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn spi_frames_command_then_data() {
        let spi = SpiMock::new(&[
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x81]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x1E, 0x05]),
            SpiTransaction::transaction_end(),
        ]);
        let dc = PinMock::new(&[
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]);

        let mut interface = SpiInterface::new(spi, dc);
        interface.send_command(0x81).unwrap();
        interface.send_data(&[0x1E, 0x05]).unwrap();

        let (mut spi, mut dc) = interface.release();
        spi.done();
        dc.done();
    }

    #[test]
    fn i2c_prefixes_control_bytes() {
        let i2c = I2cMock::new(&[
            I2cTransaction::write(DEFAULT_I2C_ADDRESS, vec![0x00, 0x30]),
            I2cTransaction::write(DEFAULT_I2C_ADDRESS, vec![0x40, 0x1E, 0x05]),
        ]);

        let mut interface = I2cInterface::new(i2c);
        interface.send_command(0x30).unwrap();
        interface.send_data(&[0x1E, 0x05]).unwrap();

        interface.release().done();
    }

    #[test]
    fn i2c_splits_long_data() {
        let data: Vec<u8> = (0..40).collect();
        let mut first = vec![0x40];
        first.extend_from_slice(&data[..32]);
        let mut second = vec![0x40];
        second.extend_from_slice(&data[32..]);

        let i2c = I2cMock::new(&[
            I2cTransaction::write(0x3F, first),
            I2cTransaction::write(0x3F, second),
        ]);

        let mut interface = I2cInterface::with_address(i2c, 0x3F);
        interface.send_data(&data).unwrap();

        interface.release().done();
    }

    #[test]
    fn no_reset_pin_never_fails() {
        let mut pin = NoResetPin;
        assert!(pin.set_low().is_ok());
        assert!(pin.set_high().is_ok());
    }
}
