//! Display configuration types and builder

pub use crate::error::{BuilderError, MAX_HEIGHT, MAX_WIDTH};

use crate::command::{MADCTL_DEFAULT, MADCTL_MV};

/// Minimum time the reset line is held in each phase of the reset pulse
pub const MIN_RESET_HOLD_MS: u32 = 50;
/// Minimum wait after a software reset before the next command
pub const MIN_SWRESET_DELAY_MS: u32 = 150;
/// Minimum wait after leaving sleep mode
pub const MIN_SLPOUT_DELAY_MS: u32 = 10;
/// Minimum wait after switching the display on
pub const MIN_DISPON_DELAY_MS: u32 = 10;

/// Display dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns
    pub width: u16,
    /// Number of rows
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width == 0 or width > MAX_WIDTH
    /// - height == 0 or height > MAX_HEIGHT
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_WIDTH || height == 0 || height > MAX_HEIGHT {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels on screen
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// What a drawing operation does when a bus transfer fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransferPolicy {
    /// Abort on the first failed transfer and return the error
    #[default]
    Propagate,
    /// Log and count the failure, then keep going
    ///
    /// Failures stay observable through
    /// [`Display::dropped_transfers`](crate::display::Display::dropped_transfers).
    BestEffort,
}

/// Display configuration
///
/// This struct holds all configurable parameters for the ST7789 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// Memory data access control byte written at init (orientation)
    ///
    /// The exchange bit ([`MADCTL_MV`]) must stay clear.
    pub madctl: u8,
    /// Time the reset line is held low, then high
    pub reset_hold_ms: u32,
    /// Wait after the software reset command
    pub swreset_delay_ms: u32,
    /// Wait after the sleep out command
    pub slpout_delay_ms: u32,
    /// Wait after the display on command
    pub dispon_delay_ms: u32,
    /// Transport failure handling
    pub transfer_policy: TransferPolicy,
}

impl Config {
    /// Configuration for the common 240x240 panel with default timings
    pub fn default_240x240() -> Self {
        let builder = Builder::new();
        Self {
            dimensions: Dimensions {
                width: 240,
                height: 240,
            },
            madctl: builder.madctl,
            reset_hold_ms: builder.reset_hold_ms,
            swreset_delay_ms: builder.swreset_delay_ms,
            slpout_delay_ms: builder.slpout_delay_ms,
            dispon_delay_ms: builder.dispon_delay_ms,
            transfer_policy: builder.transfer_policy,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use st7789_spi::{Builder, Dimensions, TransferPolicy};
///
/// let dims = match Dimensions::new(240, 320) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .transfer_policy(TransferPolicy::BestEffort)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Memory data access control byte
    madctl: u8,
    /// Reset pulse hold time
    reset_hold_ms: u32,
    /// Wait after software reset
    swreset_delay_ms: u32,
    /// Wait after sleep out
    slpout_delay_ms: u32,
    /// Wait after display on
    dispon_delay_ms: u32,
    /// Transport failure handling
    transfer_policy: TransferPolicy,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            // Default: top-to-bottom, left-to-right, RGB
            madctl: MADCTL_DEFAULT,
            reset_hold_ms: MIN_RESET_HOLD_MS,
            swreset_delay_ms: MIN_SWRESET_DELAY_MS,
            slpout_delay_ms: MIN_SLPOUT_DELAY_MS,
            dispon_delay_ms: MIN_DISPON_DELAY_MS,
            transfer_policy: TransferPolicy::Propagate,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the MADCTL byte written at init
    ///
    /// Mirroring (MX, MY) and BGR order may be set freely. The row/column
    /// exchange bit ([`MADCTL_MV`]) is rejected by [`build`](Self::build).
    pub fn madctl(mut self, value: u8) -> Self {
        self.madctl = value;
        self
    }

    /// Set how long the reset line is held in each phase
    pub fn reset_hold_ms(mut self, ms: u32) -> Self {
        self.reset_hold_ms = ms;
        self
    }

    /// Set the wait after the software reset command
    pub fn swreset_delay_ms(mut self, ms: u32) -> Self {
        self.swreset_delay_ms = ms;
        self
    }

    /// Set the wait after the sleep out command
    pub fn slpout_delay_ms(mut self, ms: u32) -> Self {
        self.slpout_delay_ms = ms;
        self
    }

    /// Set the wait after the display on command
    pub fn dispon_delay_ms(mut self, ms: u32) -> Self {
        self.dispon_delay_ms = ms;
        self
    }

    /// Set transport failure handling
    pub fn transfer_policy(mut self, policy: TransferPolicy) -> Self {
        self.transfer_policy = policy;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set, or
    /// `BuilderError::DelayTooShort` if a wait is below the controller minimum,
    /// or `BuilderError::SwappedAxes` if the MADCTL byte exchanges rows and
    /// columns.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        if self.madctl & MADCTL_MV != 0 {
            return Err(BuilderError::SwappedAxes { madctl: self.madctl });
        }
        check_delay("reset", MIN_RESET_HOLD_MS, self.reset_hold_ms)?;
        check_delay("software reset", MIN_SWRESET_DELAY_MS, self.swreset_delay_ms)?;
        check_delay("sleep out", MIN_SLPOUT_DELAY_MS, self.slpout_delay_ms)?;
        check_delay("display on", MIN_DISPON_DELAY_MS, self.dispon_delay_ms)?;
        Ok(Config {
            dimensions,
            madctl: self.madctl,
            reset_hold_ms: self.reset_hold_ms,
            swreset_delay_ms: self.swreset_delay_ms,
            slpout_delay_ms: self.slpout_delay_ms,
            dispon_delay_ms: self.dispon_delay_ms,
            transfer_policy: self.transfer_policy,
        })
    }
}

fn check_delay(step: &'static str, min_ms: u32, ms: u32) -> Result<(), BuilderError> {
    if ms < min_ms {
        return Err(BuilderError::DelayTooShort { step, min_ms, ms });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_bounds() {
        assert!(Dimensions::new(240, 240).is_ok());
        assert!(Dimensions::new(240, 320).is_ok());
        assert!(Dimensions::new(135, 240).is_ok());
        assert_eq!(
            Dimensions::new(0, 240),
            Err(BuilderError::InvalidDimensions {
                width: 0,
                height: 240
            })
        );
        assert!(Dimensions::new(241, 240).is_err());
        assert!(Dimensions::new(240, 0).is_err());
        assert!(Dimensions::new(240, 321).is_err());
    }

    #[test]
    fn test_pixel_count() {
        assert_eq!(Dimensions::new(240, 240).unwrap().pixel_count(), 57_600);
    }

    #[test]
    fn test_build_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_build_defaults_match_default_240x240() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 240).unwrap())
            .build()
            .unwrap();
        assert_eq!(config, Config::default_240x240());
        assert_eq!(config.madctl, 0x00);
        assert_eq!(config.swreset_delay_ms, 150);
        assert_eq!(config.transfer_policy, TransferPolicy::Propagate);
    }

    #[test]
    fn test_build_rejects_short_delays() {
        let dims = Dimensions::new(240, 240).unwrap();
        let result = Builder::new().dimensions(dims).swreset_delay_ms(100).build();
        assert_eq!(
            result,
            Err(BuilderError::DelayTooShort {
                step: "software reset",
                min_ms: 150,
                ms: 100
            })
        );
        assert!(Builder::new().dimensions(dims).reset_hold_ms(10).build().is_err());
        assert!(Builder::new().dimensions(dims).slpout_delay_ms(5).build().is_err());
        assert!(Builder::new().dimensions(dims).dispon_delay_ms(0).build().is_err());
    }

    #[test]
    fn test_build_rejects_row_column_exchange() {
        let dims = Dimensions::new(240, 320).unwrap();
        assert_eq!(
            Builder::new().dimensions(dims).madctl(0x60).build(),
            Err(BuilderError::SwappedAxes { madctl: 0x60 })
        );
        let config = Builder::new().dimensions(dims).madctl(0xC8).build().unwrap();
        assert_eq!(config.madctl, 0xC8);
    }

    #[test]
    fn test_build_accepts_longer_delays() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 240).unwrap())
            .reset_hold_ms(100)
            .swreset_delay_ms(200)
            .madctl(0xC0)
            .build()
            .unwrap();
        assert_eq!(config.reset_hold_ms, 100);
        assert_eq!(config.swreset_delay_ms, 200);
        assert_eq!(config.madctl, 0xC0);
    }
}
