//! Panel configuration types and builder

pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_PAGES};

/// Physical mounting of the 256x128 glass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// 256 columns x 128 rows (code 0)
    #[default]
    Landscape,
    /// 128 columns x 256 rows (code 1), drawn with swapped axes
    Portrait,
}

impl TryFrom<u8> for Orientation {
    type Error = BuilderError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Orientation::Landscape),
            1 => Ok(Orientation::Portrait),
            other => Err(BuilderError::InvalidOrientation(other)),
        }
    }
}

/// Physical panel size, fixed at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
}

impl Geometry {
    /// Geometry for an orientation: (256, 128) or (128, 256)
    pub const fn for_orientation(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Landscape => Geometry {
                width: 256,
                height: 128,
            },
            Orientation::Portrait => Geometry {
                width: 128,
                height: 256,
            },
        }
    }

    /// Bytes in one full frame at 1 bpp
    pub const fn buffer_size(&self) -> usize {
        (self.width as usize * self.height as usize) / 8
    }
}

/// Level that holds the controller in reset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetLevel {
    /// Reset asserted while the line is high
    High,
    /// Reset asserted while the line is low
    #[default]
    Low,
}

/// Panel configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Physical mounting
    pub orientation: Orientation,
    /// Reset line polarity
    pub reset_active_level: ResetLevel,
    /// Contrast (0x81) parameters
    pub contrast: [u8; 2],
    /// Power control (0x20) parameter
    pub power_control: u8,
    /// Display control (0xCA) parameters: CL divider, duty, frame period
    pub display_control: [u8; 3],
    /// Analog circuit (set 2, 0x32) parameters
    pub analog_circuit: [u8; 3],
}

impl Config {
    /// Physical geometry selected by the orientation
    pub fn geometry(&self) -> Geometry {
        Geometry::for_orientation(self.orientation)
    }
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```
/// use st75256::{Builder, Orientation, ResetLevel};
///
/// let config = Builder::new()
///     .orientation(Orientation::Portrait)
///     .bits_per_pixel(1)
///     .reset_active_level(ResetLevel::Low)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.geometry().width, 128);
/// ```
pub struct Builder {
    orientation: Orientation,
    bits_per_pixel: u8,
    reset_active_level: ResetLevel,
    contrast: [u8; 2],
    power_control: u8,
    display_control: [u8; 3],
    analog_circuit: [u8; 3],
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            orientation: Orientation::Landscape,
            bits_per_pixel: 1,
            reset_active_level: ResetLevel::Low,
            contrast: [0x1E, 0x05],
            // Booster and regulators on
            power_control: 0x0B,
            // CL divider 0, duty 1/128, frame period 0x20
            display_control: [0x00, 0x7F, 0x20],
            analog_circuit: [0x00, 0x01, 0x00],
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set physical mounting
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set color depth, only 1 is accepted by [`build`](Self::build)
    pub fn bits_per_pixel(mut self, bpp: u8) -> Self {
        self.bits_per_pixel = bpp;
        self
    }

    /// Set reset line polarity
    pub fn reset_active_level(mut self, level: ResetLevel) -> Self {
        self.reset_active_level = level;
        self
    }

    /// Set contrast parameters
    pub fn contrast(mut self, values: [u8; 2]) -> Self {
        self.contrast = values;
        self
    }

    /// Set power control parameter
    pub fn power_control(mut self, value: u8) -> Self {
        self.power_control = value;
        self
    }

    /// Set display control parameters
    pub fn display_control(mut self, values: [u8; 3]) -> Self {
        self.display_control = values;
        self
    }

    /// Set analog circuit parameters
    pub fn analog_circuit(mut self, values: [u8; 3]) -> Self {
        self.analog_circuit = values;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::UnsupportedBitsPerPixel` for any depth but 1
    pub fn build(self) -> Result<Config, BuilderError> {
        if self.bits_per_pixel != 1 {
            return Err(BuilderError::UnsupportedBitsPerPixel(self.bits_per_pixel));
        }
        Ok(Config {
            orientation: self.orientation,
            reset_active_level: self.reset_active_level,
            contrast: self.contrast,
            power_control: self.power_control,
            display_control: self.display_control,
            analog_circuit: self.analog_circuit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_landscape_one_bpp() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(
            config.geometry(),
            Geometry {
                width: 256,
                height: 128
            }
        );
        assert_eq!(config.reset_active_level, ResetLevel::Low);
    }

    #[test]
    fn portrait_swaps_geometry() {
        let config = Builder::new()
            .orientation(Orientation::Portrait)
            .build()
            .unwrap();
        assert_eq!(config.geometry().width, 128);
        assert_eq!(config.geometry().height, 256);
        assert_eq!(config.geometry().buffer_size(), 4096);
    }

    #[test]
    fn rejects_other_depths() {
        for bpp in [0, 2, 4, 8, 16] {
            assert_eq!(
                Builder::new().bits_per_pixel(bpp).build().unwrap_err(),
                BuilderError::UnsupportedBitsPerPixel(bpp)
            );
        }
    }

    #[test]
    fn orientation_codes() {
        assert_eq!(Orientation::try_from(0), Ok(Orientation::Landscape));
        assert_eq!(Orientation::try_from(1), Ok(Orientation::Portrait));
        assert_eq!(
            Orientation::try_from(2),
            Err(BuilderError::InvalidOrientation(2))
        );
    }

    #[test]
    fn overrides_are_kept() {
        let config = Builder::new()
            .contrast([0x20, 0x04])
            .power_control(0x0A)
            .display_control([0x00, 0x3F, 0x10])
            .analog_circuit([0x00, 0x02, 0x00])
            .build()
            .unwrap();
        assert_eq!(config.contrast, [0x20, 0x04]);
        assert_eq!(config.power_control, 0x0A);
        assert_eq!(config.display_control, [0x00, 0x3F, 0x10]);
        assert_eq!(config.analog_circuit, [0x00, 0x02, 0x00]);
    }
}
