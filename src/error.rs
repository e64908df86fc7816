//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! ## Example
//!
//! ```
//! use st7789_spi::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(320, 240); // Too wide
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum column count addressable by the ST7789 frame memory
pub const MAX_WIDTH: u16 = 240;

/// Maximum row count addressable by the ST7789 frame memory
pub const MAX_HEIGHT: u16 = 320;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    /// A failed transfer may leave the controller mid-window; draw again (or
    /// re-run `init`) before trusting the screen contents.
    Interface(I::Error),
    /// Addressing window outside the screen or with inverted corners
    ///
    /// Windows are inclusive and must satisfy `x0 <= x1 < width` and
    /// `y0 <= y1 < height`.
    InvalidWindow {
        /// Start column
        x0: u16,
        /// Start row
        y0: u16,
        /// End column (inclusive)
        x1: u16,
        /// End row (inclusive)
        y1: u16,
    },
    /// Rectangle is empty or extends past the screen edge
    InvalidRect {
        /// X coordinate
        x: u16,
        /// Y coordinate
        y: u16,
        /// Width
        w: u16,
        /// Height
        h: u16,
    },
    /// Pixel slice length does not match the window area
    BufferSizeMismatch {
        /// Number of pixels the window holds
        expected: usize,
        /// Number of pixels provided
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::InvalidWindow { x0, y0, x1, y1 } => {
                write!(f, "Invalid window: ({x0},{y0})-({x1},{y1})")
            }
            Self::InvalidRect { x, y, w, h } => {
                write!(f, "Invalid rectangle: x={x}, y={y}, w={w}, h={h}")
            }
            Self::BufferSizeMismatch { expected, provided } => {
                write!(
                    f,
                    "Pixel buffer size mismatch: expected {expected} pixels, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Width in pixels requested
        width: u16,
        /// Height in pixels requested
        height: u16,
    },
    /// An initialization delay was configured below the controller minimum
    DelayTooShort {
        /// Which wait was shortened
        step: &'static str,
        /// Minimum the controller tolerates, in milliseconds
        min_ms: u32,
        /// Value requested, in milliseconds
        ms: u32,
    },
    /// MADCTL byte has the row/column exchange bit set
    ///
    /// Windows are always addressed with columns along the width, so a
    /// swapped scan would point them at rows the panel does not have.
    SwappedAxes {
        /// MADCTL byte requested
        madctl: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_WIDTH}x{MAX_HEIGHT}, both non-zero)"
            ),
            Self::DelayTooShort { step, min_ms, ms } => {
                write!(f, "{step} delay of {ms}ms is below the {min_ms}ms minimum")
            }
            Self::SwappedAxes { madctl } => {
                write!(f, "MADCTL {madctl:#04x} exchanges rows and columns")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
