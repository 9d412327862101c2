//! Command-set aware framing on top of a [`DisplayInterface`]
//!
//! The sequencer never remembers which command set is active. Callers select
//! the set right before each command that depends on it, since any other
//! operation in between may have switched it.

use crate::command::CommandSet;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Frames commands and parameters onto a command channel
pub struct Protocol<I> {
    interface: I,
}

impl<I> Protocol<I>
where
    I: DisplayInterface,
{
    pub fn new(interface: I) -> Self {
        Self { interface }
    }

    /// Select command set 1 or 2
    pub fn enter_set(&mut self, set: CommandSet) -> Result<(), Error<I>> {
        self.interface
            .send_command(set.selector())
            .map_err(Error::Interface)
    }

    /// Send a command byte followed by its parameters, if any
    pub fn send(&mut self, command: u8, params: &[u8]) -> Result<(), Error<I>> {
        self.interface
            .send_command(command)
            .map_err(Error::Interface)?;
        if !params.is_empty() {
            self.stream(params)?;
        }
        Ok(())
    }

    /// Send raw bytes through the data path
    pub fn stream(&mut self, data: &[u8]) -> Result<(), Error<I>> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    pub fn into_inner(self) -> I {
        self.interface
    }
}
