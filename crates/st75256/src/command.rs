// ST75256 command definitions
//
// The controller exposes two command namespaces. The same byte means different
// things depending on which set is selected, so every constant below lives in
// exactly one set.

/// Selectable command namespace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandSet {
    /// Extension command set 1 (addressing, display control, power)
    One,
    /// Extension command set 2 (analog setup, grayscale table, OTP)
    Two,
}

impl CommandSet {
    /// Selector byte that switches the controller into this set
    pub const fn selector(self) -> u8 {
        match self {
            CommandSet::One => SELECT_SET_1,
            CommandSet::Two => SELECT_SET_2,
        }
    }
}

// Command set selectors
pub const SELECT_SET_1: u8 = 0x30;
pub const SELECT_SET_2: u8 = 0x31;

// Set 1: addressing and RAM
pub const SET_COLUMN_RANGE: u8 = 0x15; // start, end
pub const SET_PAGE_RANGE: u8 = 0x75; // start, end
pub const WRITE_RAM: u8 = 0x5C; // followed by pixel data

// Set 1: display control
pub const DISPLAY_OFF: u8 = 0xAE;
pub const DISPLAY_ON: u8 = 0xAF;
pub const INVERT_OFF: u8 = 0xA6;
pub const INVERT_ON: u8 = 0xA7;
pub const ALL_PIXELS_OFF: u8 = 0x22;
pub const ALL_PIXELS_ON: u8 = 0x23;
pub const DISPLAY_CONTROL: u8 = 0xCA; // CL divider, duty, frame period
pub const DISPLAY_MODE: u8 = 0xF0; // 1 byte
pub const SCAN_DIRECTION: u8 = 0xBC; // 1 byte, 0x00..=0x07

// Set 1: data bit order
pub const DATA_MSB_FIRST: u8 = 0x08;
pub const DATA_LSB_FIRST: u8 = 0x0C;

// Set 1: power
pub const POWER_SAVE_ON: u8 = 0x95;
pub const POWER_SAVE_OFF: u8 = 0x94;
pub const SET_CONTRAST: u8 = 0x81; // 2 bytes
pub const POWER_CONTROL: u8 = 0x20; // 1 byte

// Set 2
pub const SET_GRAYSCALE_TABLE: u8 = 0x20; // 16 bytes
pub const DISABLE_AUTO_READ: u8 = 0xD7; // 1 byte
pub const ANALOG_CIRCUIT: u8 = 0x32; // 3 bytes

// Parameter values
pub const AUTO_READ_DISABLED: u8 = 0x9F;
pub const DISPLAY_MODE_MONOCHROME: u8 = 0x10;
pub const DISPLAY_MODE_GRAYSCALE: u8 = 0x11;

// Scan direction code bits
pub const SCAN_SWAPPED_BASE: u8 = 0x04;
pub const SCAN_MIRROR_X: u8 = 0x02;
pub const SCAN_MIRROR_Y: u8 = 0x01;

/// 16-level grayscale table, loaded at init even though only 1 bpp is driven
pub const GRAYSCALE_TABLE: [u8; 16] = [
    0x01, 0x03, 0x05, 0x07, 0x09, 0x0B, 0x0D, 0x10, 0x11, 0x13, 0x15, 0x17, 0x19, 0x1B, 0x1D, 0x1F,
];

/// Scan direction code for the given swap state and mirror flags
pub const fn scan_direction(swap_axes: bool, mirror_x: bool, mirror_y: bool) -> u8 {
    let mut code = if swap_axes { SCAN_SWAPPED_BASE } else { 0x00 };
    if mirror_x {
        code |= SCAN_MIRROR_X;
    }
    if mirror_y {
        code |= SCAN_MIRROR_Y;
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_table_is_increasing_five_bit() {
        assert!(GRAYSCALE_TABLE.windows(2).all(|w| w[0] < w[1]));
        assert!(GRAYSCALE_TABLE.iter().all(|&v| v <= 0x1F));
    }

    #[test]
    fn scan_direction_bits() {
        assert_eq!(scan_direction(false, false, false), 0x00);
        assert_eq!(scan_direction(true, false, false), 0x04);
        assert_eq!(scan_direction(true, true, true), 0x07);
        assert_eq!(scan_direction(false, false, true), 0x01);
    }
}
