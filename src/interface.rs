//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the ST7789 controller over a 4-wire SPI bus.
//!
//! ## Hardware Requirements
//!
//! The ST7789 uses:
//! - SPI bus (MOSI + SCK), driven through [`SpiBus`]; the driver frames
//!   chip-select itself
//! - up to 4 output lines, each optional:
//!   - **DC**: Data/Command select (low=command, high=data)
//!   - **CS**: Chip select (active low)
//!   - **RST**: Reset (active low)
//!   - **BL**: Backlight enable (active high)
//!
//! A line that is not wired is left as [`NoPin`]. A missing CS means the
//! controller is always selected; a missing RST skips the hardware reset.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::SpiBus;
//! use st7789_spi::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! // Create interface with SPI bus and control lines
//! let mut interface = Interface::new(MockSpi)
//!     .with_dc(MockPin)
//!     .with_cs(MockPin)
//!     .with_reset(MockPin);
//!
//! // Pulse reset
//! let _ = interface.hard_reset(&mut delay, 50);
//!
//! // Send command
//! let _ = interface.send_command(0x01); // Software reset
//!
//! // Send data
//! let _ = interface.send_data(&[0xF8, 0x00]);
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, ErrorKind, OutputPin, PinState};
use embedded_hal::spi::SpiBus;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for hardware interface to the ST7789 controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., a parallel bus or inverted pin polarities),
/// implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC low (command mode)
    /// 2. Assert CS, send the byte, deassert CS
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send one contiguous data payload to the controller
    ///
    /// The implementation must:
    /// 1. Set DC high (data mode)
    /// 2. Assert CS, send all bytes, deassert CS
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform a hardware reset pulse
    ///
    /// Drives RST low, waits `hold_ms`, drives RST high, waits `hold_ms`.
    /// The release and both waits happen even if an earlier step failed.
    /// Does nothing if no reset line is wired.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset line cannot be driven.
    fn hard_reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        hold_ms: u32,
    ) -> InterfaceResult<(), Self::Error>;

    /// Switch the backlight on or off
    ///
    /// Does nothing if no backlight line is wired.
    ///
    /// # Errors
    ///
    /// Returns an error if the backlight line cannot be driven.
    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over the SPI error type. Pin errors are reduced to their
/// [`ErrorKind`] since every control line may be a different pin type.
#[derive(Debug, PartialEq)]
pub enum InterfaceError<SpiErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(ErrorKind),
}

impl<SpiErr: Debug> core::fmt::Display for InterfaceError<SpiErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug> core::error::Error for InterfaceError<SpiErr> {}

/// Placeholder for a control line that is not wired
///
/// `NoPin` has no values, so an `Option<NoPin>` is always `None`.
#[derive(Debug)]
pub enum NoPin {}

impl embedded_hal::digital::ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        match *self {}
    }
}

/// Hardware interface implementation for ST7789
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI bus and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI bus implementing [`SpiBus`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `CS` - Chip-select pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BL` - Backlight pin implementing [`OutputPin`]
///
/// Each pin defaults to [`NoPin`] until attached with one of the `with_*`
/// methods.
///
/// ## Example
///
/// ```rust,no_run
/// use st7789_spi::{Config, Display, Interface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::OutputPin;
/// # use embedded_hal::spi::SpiBus;
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiBus for MockSpi {
/// #     fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> { Ok(()) }
/// #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// // Reset and chip-select not wired
/// let interface = Interface::new(MockSpi)
///     .with_dc(MockPin)
///     .with_backlight(MockPin);
///
/// let _display = Display::new(interface, Config::default_240x240());
/// ```
#[derive(Debug)]
pub struct Interface<SPI, DC = NoPin, CS = NoPin, RST = NoPin, BL = NoPin> {
    /// SPI bus for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: Option<DC>,
    /// Chip-select pin (active low)
    cs: Option<CS>,
    /// Reset pin (active low)
    rst: Option<RST>,
    /// Backlight enable pin (active high)
    bl: Option<BL>,
}

impl<SPI: SpiBus> Interface<SPI> {
    /// Create a new Interface with no control lines attached
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            dc: None,
            cs: None,
            rst: None,
            bl: None,
        }
    }
}

impl<SPI, DC, CS, RST, BL> Interface<SPI, DC, CS, RST, BL>
where
    SPI: SpiBus,
{
    /// Attach the data/command select line
    pub fn with_dc<P: OutputPin>(self, dc: P) -> Interface<SPI, P, CS, RST, BL> {
        Interface {
            spi: self.spi,
            dc: Some(dc),
            cs: self.cs,
            rst: self.rst,
            bl: self.bl,
        }
    }

    /// Attach the chip-select line
    pub fn with_cs<P: OutputPin>(self, cs: P) -> Interface<SPI, DC, P, RST, BL> {
        Interface {
            spi: self.spi,
            dc: self.dc,
            cs: Some(cs),
            rst: self.rst,
            bl: self.bl,
        }
    }

    /// Attach the reset line
    pub fn with_reset<P: OutputPin>(self, rst: P) -> Interface<SPI, DC, CS, P, BL> {
        Interface {
            spi: self.spi,
            dc: self.dc,
            cs: self.cs,
            rst: Some(rst),
            bl: self.bl,
        }
    }

    /// Attach the backlight enable line
    pub fn with_backlight<P: OutputPin>(self, bl: P) -> Interface<SPI, DC, CS, RST, P> {
        Interface {
            spi: self.spi,
            dc: self.dc,
            cs: self.cs,
            rst: self.rst,
            bl: Some(bl),
        }
    }

    /// Whether a chip-select line is attached
    pub fn has_cs(&self) -> bool {
        self.cs.is_some()
    }

    /// Whether a reset line is attached
    pub fn has_reset(&self) -> bool {
        self.rst.is_some()
    }

    /// Consume the interface and hand back the bus and lines
    pub fn release(self) -> (SPI, Option<DC>, Option<CS>, Option<RST>, Option<BL>) {
        (self.spi, self.dc, self.cs, self.rst, self.bl)
    }
}

/// Drive an optional line, treating an absent line as already in place
fn drive<P, SpiErr>(
    pin: Option<&mut P>,
    state: PinState,
) -> InterfaceResult<(), InterfaceError<SpiErr>>
where
    P: OutputPin,
{
    match pin {
        Some(pin) => pin
            .set_state(state)
            .map_err(|e| InterfaceError::Pin(e.kind())),
        None => Ok(()),
    }
}

impl<SPI, DC, CS, RST, BL> Interface<SPI, DC, CS, RST, BL>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    /// One CS-framed transfer with DC settled beforehand
    fn transfer(
        &mut self,
        dc: PinState,
        bytes: &[u8],
    ) -> InterfaceResult<(), InterfaceError<SPI::Error>> {
        drive(self.dc.as_mut(), dc)?;
        drive(self.cs.as_mut(), PinState::Low)?;
        let written = self
            .spi
            .write(bytes)
            .and_then(|()| self.spi.flush())
            .map_err(InterfaceError::Spi);
        // CS is released even when the write failed
        let released = drive(self.cs.as_mut(), PinState::High);
        written?;
        released
    }
}

impl<SPI, DC, CS, RST, BL> DisplayInterface for Interface<SPI, DC, CS, RST, BL>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    BL: OutputPin,
{
    type Error = InterfaceError<SPI::Error>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.transfer(PinState::Low, &[command])
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.transfer(PinState::High, data)
    }

    fn hard_reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        hold_ms: u32,
    ) -> InterfaceResult<(), Self::Error> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(());
        };
        // Reset sequence: LOW -> wait -> HIGH -> wait
        // RST is always driven back high and both waits always run
        let asserted = drive::<_, SPI::Error>(Some(&mut *rst), PinState::Low);
        delay.delay_ms(hold_ms);
        let released = drive::<_, SPI::Error>(Some(rst), PinState::High);
        delay.delay_ms(hold_ms);
        asserted.and(released)
    }

    fn set_backlight(&mut self, on: bool) -> InterfaceResult<(), Self::Error> {
        drive(self.bl.as_mut(), PinState::from(on))
    }
}
