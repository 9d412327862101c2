//! Core panel state machine

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, info, warn};

use crate::command::*;
use crate::config::{Config, Geometry, Orientation, ResetLevel};
use crate::error::{Error, MAX_PAGES};
use crate::interface::DisplayInterface;
use crate::panel::Panel;
use crate::protocol::Protocol;
use crate::remap::{DEST_PAGES, RemapBuffer, SOURCE_COLUMNS};
use crate::transform::{
    AxisState, Gap, LogicalRect, PAGE_HEIGHT, PhysicalWindow, to_physical,
};

/// Time the reset line is held active
const RESET_PULSE_MS: u32 = 10;

/// Settling time after reset is released before the controller accepts commands
const RESET_SETTLE_MS: u32 = 120;

/// Settling time after display on
const POWER_ON_SETTLE_MS: u32 = 10;

/// One page row of cleared RAM
const ZERO_PAGE: [u8; 256] = [0; 256];

/// Driver for one ST75256 panel
///
/// Holds the orientation, mirror and gap state and implements [`Panel`].
///
/// ## Type Parameters
///
/// * `I` - Command channel implementing [`DisplayInterface`]
/// * `RST` - Reset line; use [`NoResetPin`](crate::NoResetPin) with `None`
/// * `D` - Delay provider for the reset and power-on timings
pub struct Display<I, RST, D>
where
    I: DisplayInterface,
{
    protocol: Protocol<I>,
    reset_pin: Option<RST>,
    delay: D,
    config: Config,
    axes: AxisState,
    gap: Gap,
    /// Last scan direction code sent
    scan_direction: u8,
    is_display_on: bool,
    scratch: RemapBuffer,
}

impl<I, RST, D> Display<I, RST, D>
where
    I: DisplayInterface,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create a new driver
    ///
    /// No transport or GPIO activity happens here. Portrait orientation starts
    /// with swapped axes.
    pub fn new(interface: I, reset_pin: Option<RST>, delay: D, config: Config) -> Self {
        let swap_axes = config.orientation == Orientation::Portrait;
        let geometry = config.geometry();
        debug!(
            "new st75256 panel, {}x{}",
            geometry.width, geometry.height
        );
        Self {
            protocol: Protocol::new(interface),
            reset_pin,
            delay,
            config,
            axes: AxisState {
                swap_axes,
                y_mirror: false,
            },
            gap: Gap::default(),
            scan_direction: scan_direction(swap_axes, false, false),
            is_display_on: false,
            scratch: RemapBuffer::new(),
        }
    }

    /// Tear down the driver and hand back the channel, reset pin and delay
    pub fn destroy(self) -> (I, Option<RST>, D) {
        debug!("del st75256 panel");
        (self.protocol.into_inner(), self.reset_pin, self.delay)
    }

    /// Physical panel size
    pub fn geometry(&self) -> Geometry {
        self.config.geometry()
    }

    /// Current swap and mirror state
    pub fn axis_state(&self) -> AxisState {
        self.axes
    }

    /// Current viewport offset
    pub fn gap(&self) -> Gap {
        self.gap
    }

    /// Last scan direction code sent, or the configured base before any
    pub fn scan_direction(&self) -> u8 {
        self.scan_direction
    }

    pub fn is_display_on(&self) -> bool {
        self.is_display_on
    }

    /// Access the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn set_scan_direction(&mut self, code: u8) -> Result<(), Error<I>> {
        self.protocol.enter_set(CommandSet::One)?;
        self.protocol.send(SCAN_DIRECTION, &[code])?;
        self.scan_direction = code;
        Ok(())
    }

    /// Zero all 21 pages of display RAM
    fn clear_ram(&mut self) -> Result<(), Error<I>> {
        self.protocol.enter_set(CommandSet::One)?;
        self.protocol.send(SET_COLUMN_RANGE, &[0x00, 0xFF])?;
        self.protocol.send(SET_PAGE_RANGE, &[0x00, MAX_PAGES - 1])?;
        self.protocol.send(WRITE_RAM, &[])?;
        for _ in 0..MAX_PAGES {
            self.protocol.stream(&ZERO_PAGE)?;
        }
        Ok(())
    }
}

impl<I, RST, D> Panel for Display<I, RST, D>
where
    I: DisplayInterface,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = Error<I>;

    fn reset(&mut self) -> Result<(), Error<I>> {
        let Some(pin) = self.reset_pin.as_mut() else {
            return Ok(());
        };
        let level = self.config.reset_active_level;

        drive_reset(pin, level, true);
        self.delay.delay_ms(RESET_PULSE_MS);
        drive_reset(pin, level, false);
        self.delay.delay_ms(RESET_SETTLE_MS);

        info!("st75256 reset done");
        Ok(())
    }

    fn init(&mut self) -> Result<(), Error<I>> {
        info!("initializing st75256");
        let p = &mut self.protocol;

        p.enter_set(CommandSet::One)?;
        p.send(DISPLAY_OFF, &[])?;
        self.is_display_on = false;
        p.send(POWER_SAVE_OFF, &[])?;
        p.send(DATA_MSB_FIRST, &[])?;

        p.enter_set(CommandSet::Two)?;
        p.send(DISABLE_AUTO_READ, &[AUTO_READ_DISABLED])?;
        p.send(ANALOG_CIRCUIT, &self.config.analog_circuit)?;
        p.send(SET_GRAYSCALE_TABLE, &GRAYSCALE_TABLE)?;

        p.enter_set(CommandSet::One)?;
        p.send(SET_CONTRAST, &self.config.contrast)?;
        p.send(POWER_CONTROL, &[self.config.power_control])?;
        p.send(DISPLAY_CONTROL, &self.config.display_control)?;
        p.send(DISPLAY_MODE, &[DISPLAY_MODE_MONOCHROME])?;
        p.send(INVERT_OFF, &[])?;

        self.clear_ram()?;

        info!("st75256 initialized, display off");
        Ok(())
    }

    fn draw(&mut self, rect: LogicalRect, pixels: &[u8]) -> Result<(), Error<I>> {
        debug!(
            "draw bitmap: input rect = ({}, {}) -> ({}, {})",
            rect.x_start, rect.y_start, rect.x_end, rect.y_end
        );

        let window = to_physical(rect, self.axes, self.gap)?;

        if !self.axes.swap_axes {
            let required = window.byte_count();
            let data = pixels.get(..required).ok_or(Error::BufferTooSmall {
                required,
                provided: pixels.len(),
            })?;
            select_window(&mut self.protocol, &window)?;
            return self.protocol.send(WRITE_RAM, data);
        }

        let required = swapped_source_len(rect);
        if pixels.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: pixels.len(),
            });
        }
        let scratch = self.scratch.remap(pixels);
        select_window(&mut self.protocol, &window)?;
        write_swapped(&mut self.protocol, scratch, rect, &window)
    }

    fn invert(&mut self, on: bool) -> Result<(), Error<I>> {
        self.protocol.enter_set(CommandSet::One)?;
        self.protocol
            .send(if on { INVERT_ON } else { INVERT_OFF }, &[])
    }

    fn mirror(&mut self, mirror_x: bool, mirror_y: bool) -> Result<(), Error<I>> {
        let code = scan_direction(self.axes.swap_axes, mirror_x, mirror_y);
        self.axes.y_mirror = mirror_y;

        // Bit order follows the Y mirror so each page byte stays top-down
        let bit_order = if mirror_y {
            DATA_MSB_FIRST
        } else {
            DATA_LSB_FIRST
        };
        self.protocol.enter_set(CommandSet::One)?;
        self.protocol.send(bit_order, &[])?;

        self.set_scan_direction(code)
    }

    fn swap_xy(&mut self, swap: bool) -> Result<(), Error<I>> {
        self.axes.swap_axes = swap;
        // Mirror bits are not carried over
        self.set_scan_direction(scan_direction(swap, false, false))
    }

    fn set_gap(&mut self, x: i32, y: i32) {
        self.gap = Gap { x, y };
    }

    fn power(&mut self, on: bool) -> Result<(), Error<I>> {
        self.protocol.enter_set(CommandSet::One)?;
        self.protocol
            .send(if on { DISPLAY_ON } else { DISPLAY_OFF }, &[])?;
        self.is_display_on = on;
        if on {
            self.delay.delay_ms(POWER_ON_SETTLE_MS);
        }
        Ok(())
    }
}

/// Assert or release the reset line; pin failures are logged, not returned
fn drive_reset<RST: OutputPin>(pin: &mut RST, level: ResetLevel, asserted: bool) {
    let high = match level {
        ResetLevel::High => asserted,
        ResetLevel::Low => !asserted,
    };
    let result = if high { pin.set_high() } else { pin.set_low() };
    if result.is_err() {
        warn!("reset line did not switch (asserted={asserted})");
    }
}

/// Source bytes a swapped draw of `rect` reads: every page up to its last row
fn swapped_source_len(rect: LogicalRect) -> usize {
    let rows = rect.y_end.clamp(0, 256) as usize;
    rows.div_ceil(PAGE_HEIGHT as usize) * SOURCE_COLUMNS
}

fn select_window<I: DisplayInterface>(
    protocol: &mut Protocol<I>,
    window: &PhysicalWindow,
) -> Result<(), Error<I>> {
    protocol.enter_set(CommandSet::One)?;
    protocol.send(SET_COLUMN_RANGE, &[window.column_start, window.column_end])?;
    protocol.send(SET_PAGE_RANGE, &[window.page_start, window.page_end])
}

/// Send the remapped bytes that belong to `window`
///
/// Window column `c` carries logical row `rect.y_start + (c - column_start)`,
/// and its pages start at the logical page holding `rect.x_start`. Pages the
/// scratch does not cover go out as zero.
fn write_swapped<I: DisplayInterface>(
    protocol: &mut Protocol<I>,
    scratch: &[u8],
    rect: LogicalRect,
    window: &PhysicalWindow,
) -> Result<(), Error<I>> {
    let first_row = rect.y_start;
    let first_page = rect.x_start.div_euclid(PAGE_HEIGHT);
    let columns = window.columns();
    let pages = window.pages();

    // Whole scratch columns are contiguous
    if first_page == 0 && pages == DEST_PAGES {
        let run = usize::try_from(first_row)
            .ok()
            .and_then(|row| row.checked_mul(DEST_PAGES))
            .and_then(|start| scratch.get(start..)?.get(..columns * DEST_PAGES));
        if let Some(run) = run {
            return protocol.send(WRITE_RAM, run);
        }
    }

    protocol.send(WRITE_RAM, &[])?;
    let mut column = [0u8; MAX_PAGES as usize];
    for offset in 0..columns as i32 {
        let row = first_row.saturating_add(offset);
        for (index, byte) in column[..pages].iter_mut().enumerate() {
            *byte = scratch_byte(scratch, row, first_page.saturating_add(index as i32));
        }
        protocol.stream(&column[..pages])?;
    }
    Ok(())
}

fn scratch_byte(scratch: &[u8], row: i32, page: i32) -> u8 {
    let (Ok(row), Ok(page)) = (usize::try_from(row), usize::try_from(page)) else {
        return 0;
    };
    if page >= DEST_PAGES {
        return 0;
    }
    row.checked_mul(DEST_PAGES)
        .and_then(|base| scratch.get(base + page))
        .copied()
        .unwrap_or(0)
}
