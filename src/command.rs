//! ST7789 command definitions
//!
//! Command bytes used to drive the ST7789 TFT controller. Commands are sent
//! over SPI with the DC pin low; their parameters follow as a separate data
//! transfer with DC high.
//!
//! ## Transfer Structure
//!
//! Every transfer (a command byte, or one data payload) follows the pattern:
//! 1. Set DC low (command) or high (data)
//! 2. Assert CS (Chip Select)
//! 3. Send the bytes
//! 4. Deassert CS
//!
//! ## Example
//!
//! ```rust,no_run
//! use st7789_spi::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::spi::SpiBus;
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiBus for MockSpi {
//! #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = Interface::new(MockSpi);
//!
//! // Select 16 bits per pixel
//! let _ = interface.send_command(command::COLMOD);
//! let _ = interface.send_data(&[command::COLMOD_16BPP]);
//! ```

// System control commands

/// Software reset command (0x01)
///
/// Resets the controller registers to their defaults. The controller needs
/// 150ms before it reliably accepts the next command.
pub const SWRESET: u8 = 0x01;

/// Sleep out command (0x11)
///
/// Leaves sleep mode. Wait at least 10ms before the next command.
pub const SLPOUT: u8 = 0x11;

/// Display on command (0x29)
pub const DISPON: u8 = 0x29;

// Addressing and memory commands

/// Column address set command (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const CASET: u8 = 0x2A;

/// Row address set command (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const RASET: u8 = 0x2B;

/// Memory write command (0x2C)
///
/// Every data transfer after this command is written into the current
/// window, row-major, until the next command is issued.
pub const RAMWR: u8 = 0x2C;

/// Memory data access control command (0x36)
///
/// Requires 1 byte selecting scan direction and RGB/BGR order.
pub const MADCTL: u8 = 0x36;

/// Interface pixel format command (0x3A)
///
/// Requires 1 byte; see [`COLMOD_16BPP`].
pub const COLMOD: u8 = 0x3A;

/// COLMOD parameter selecting 16 bits per pixel (RGB565)
pub const COLMOD_16BPP: u8 = 0x05;

/// Default MADCTL parameter: top-to-bottom, left-to-right, RGB order
pub const MADCTL_DEFAULT: u8 = 0x00;

/// MADCTL row/column exchange bit (MV)
///
/// Swaps the roles of `CASET` and `RASET`. Not supported by this driver,
/// which always addresses columns along the width.
pub const MADCTL_MV: u8 = 0x20;
