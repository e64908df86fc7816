//! ST7789 TFT LCD Driver
//!
//! A minimal blocking driver for the ST7789 TFT controller over a 4-wire SPI
//! bus, supporting panels up to 240x320 pixels in 16-bit RGB565.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Optional DC, CS, reset and backlight lines
//! - Windowed pixel writes and solid fills streamed row by row
//! - Placeholder block text
//! - Configurable transfer failure policy
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use st7789_spi::{Builder, Dimensions, Display, Interface, Rgb565};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let (dc, cs, rst, bl) = (MockPin, MockPin, MockPin, MockPin);
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi)
//!     .with_dc(dc)
//!     .with_cs(cs)
//!     .with_reset(rst)
//!     .with_backlight(bl);
//! let dims = match Dimensions::new(240, 240) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//! let _ = display.set_backlight(true);
//! let _ = display.fill(Rgb565::BLUE);
//! let _ = display.draw_text("Hello", 10, 10, Rgb565::BLUE.inverted());
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// RGB565 color type
pub mod color;
/// ST7789 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod test_support;

pub use color::Rgb565;
pub use config::{Builder, Config, Dimensions, TransferPolicy};
pub use display::{CHAR_HEIGHT, CHAR_WIDTH, Display, Window};
pub use error::{BuilderError, Error, MAX_HEIGHT, MAX_WIDTH};
pub use interface::{DisplayInterface, Interface, InterfaceError, NoPin};
