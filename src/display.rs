//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace, warn};

use crate::color::Rgb565;
use crate::command::{CASET, COLMOD, COLMOD_16BPP, DISPON, MADCTL, RAMWR, RASET, SLPOUT, SWRESET};
use crate::config::{
    Config, Dimensions, MIN_DISPON_DELAY_MS, MIN_RESET_HOLD_MS, MIN_SLPOUT_DELAY_MS,
    MIN_SWRESET_DELAY_MS, TransferPolicy,
};
use crate::error::{Error, MAX_HEIGHT, MAX_WIDTH};
use crate::interface::DisplayInterface;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Width of one placeholder text cell in pixels
pub const CHAR_WIDTH: u16 = 8;
/// Height of one placeholder text cell in pixels
pub const CHAR_HEIGHT: u16 = 8;

/// Bytes in the largest possible row of RGB565 pixels
const ROW_BUFFER_LEN: usize = MAX_WIDTH as usize * 2;

/// Inclusive addressing window in pixel coordinates
///
/// Pixel data written after [`Display::set_window`] fills the window
/// row-major starting at `(x0, y0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// Start column
    pub x0: u16,
    /// Start row
    pub y0: u16,
    /// End column (inclusive)
    pub x1: u16,
    /// End row (inclusive)
    pub y1: u16,
}

impl Window {
    /// Create a window from its inclusive corners
    pub fn new(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Window covering the whole screen
    pub fn full_screen(dimensions: Dimensions) -> Self {
        Self::new(
            0,
            0,
            dimensions.width.saturating_sub(1),
            dimensions.height.saturating_sub(1),
        )
    }

    /// Columns covered (0 if the corners are inverted)
    pub fn width(&self) -> u16 {
        self.x1.saturating_add(1).saturating_sub(self.x0)
    }

    /// Rows covered (0 if the corners are inverted)
    pub fn height(&self) -> u16 {
        self.y1.saturating_add(1).saturating_sub(self.y0)
    }

    /// Number of pixels the window holds
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Whether the window is well-formed and lies inside `dimensions`
    ///
    /// The window must also stay inside the controller's frame memory, even
    /// when `dimensions` was built by hand with larger values.
    pub fn fits(&self, dimensions: Dimensions) -> bool {
        let width = dimensions.width.min(MAX_WIDTH);
        let height = dimensions.height.min(MAX_HEIGHT);
        self.x0 <= self.x1 && self.y0 <= self.y1 && self.x1 < width && self.y1 < height
    }
}

/// Core display driver for ST7789
///
/// This struct sequences controller commands over a [`DisplayInterface`].
/// Every operation blocks until its transfers (and any mandated delays)
/// have completed. For embedded-graphics support, see the `graphics` feature.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Transfers that failed under [`TransferPolicy::BestEffort`]
    dropped_transfers: u32,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init) is called.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            dropped_transfers: 0,
        }
    }

    /// Reset and initialize the controller
    ///
    /// Sequence:
    /// 1. hardware reset pulse (skipped without a reset line)
    /// 2. `SWRESET`, wait
    /// 3. `SLPOUT`, wait
    /// 4. `COLMOD` = 16 bits per pixel
    /// 5. `MADCTL` = configured orientation byte
    /// 6. `DISPON`, wait
    ///
    /// The controller never answers, so there is nothing to check between steps.
    /// Configured waits shorter than the controller minimum are raised to it.
    ///
    /// # Errors
    ///
    /// A failed reset pulse is always returned, whatever the transfer policy:
    /// a controller left in reset ignores the rest of the sequence.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!(
            "st7789: init {}x{}, madctl={:#04x}",
            self.config.dimensions.width, self.config.dimensions.height, self.config.madctl
        );

        let reset_hold_ms = self.config.reset_hold_ms.max(MIN_RESET_HOLD_MS);
        self.interface
            .hard_reset(delay, reset_hold_ms)
            .map_err(Error::Interface)?;

        self.send_command(SWRESET)?;
        delay.delay_ms(self.config.swreset_delay_ms.max(MIN_SWRESET_DELAY_MS));

        self.send_command(SLPOUT)?;
        delay.delay_ms(self.config.slpout_delay_ms.max(MIN_SLPOUT_DELAY_MS));

        self.send_command(COLMOD)?;
        self.send_data(&[COLMOD_16BPP])?;

        self.send_command(MADCTL)?;
        self.send_data(&[self.config.madctl])?;

        self.send_command(DISPON)?;
        delay.delay_ms(self.config.dispon_delay_ms.max(MIN_DISPON_DELAY_MS));

        Ok(())
    }

    /// Address a window and open frame memory for writing
    ///
    /// Sends `CASET` and `RASET` with big-endian start/end pairs, then `RAMWR`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` (before anything is sent) if the window
    /// is inverted or extends past the screen.
    pub fn set_window(&mut self, window: Window) -> DisplayResult<I> {
        if !window.fits(self.config.dimensions) {
            return Err(Error::InvalidWindow {
                x0: window.x0,
                y0: window.y0,
                x1: window.x1,
                y1: window.y1,
            });
        }
        trace!(
            "st7789: window ({},{})-({},{})",
            window.x0, window.y0, window.x1, window.y1
        );

        let [x0_hi, x0_lo] = window.x0.to_be_bytes();
        let [x1_hi, x1_lo] = window.x1.to_be_bytes();
        self.send_command(CASET)?;
        self.send_data(&[x0_hi, x0_lo, x1_hi, x1_lo])?;

        let [y0_hi, y0_lo] = window.y0.to_be_bytes();
        let [y1_hi, y1_lo] = window.y1.to_be_bytes();
        self.send_command(RASET)?;
        self.send_data(&[y0_hi, y0_lo, y1_hi, y1_lo])?;

        self.send_command(RAMWR)
    }

    /// Fill the whole screen with one color
    ///
    /// Sends one data transfer per row.
    pub fn fill(&mut self, color: Rgb565) -> DisplayResult<I> {
        debug!("st7789: fill {:#06x}", color.raw());
        let Dimensions { width, height } = self.config.dimensions;
        self.fill_rect(0, 0, width, height, color)
    }

    /// Fill a `w` x `h` rectangle at `(x, y)` with one color
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRect` (before anything is sent) if the rectangle
    /// is empty or does not fit on screen.
    #[allow(clippy::many_single_char_names)]
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Rgb565,
    ) -> DisplayResult<I> {
        let dims = self.config.dimensions;
        if w == 0
            || h == 0
            || w > MAX_WIDTH
            || u32::from(x) + u32::from(w) > u32::from(dims.width)
            || u32::from(y) + u32::from(h) > u32::from(dims.height)
        {
            return Err(Error::InvalidRect { x, y, w, h });
        }

        self.set_window(Window::new(x, y, x + w - 1, y + h - 1))?;

        let mut row = [0u8; ROW_BUFFER_LEN];
        let len = w as usize * 2;
        for pixel in row[..len].chunks_exact_mut(2) {
            pixel.copy_from_slice(&color.to_be_bytes());
        }
        for _ in 0..h {
            self.send_data(&row[..len])?;
        }
        Ok(())
    }

    /// Stream caller-provided pixels into a window
    ///
    /// `pixels` is row-major and must hold exactly one pixel per window cell.
    /// Sends one data transfer per window row.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` or `Error::BufferSizeMismatch` before
    /// anything is sent.
    pub fn write_pixels(&mut self, window: Window, pixels: &[Rgb565]) -> DisplayResult<I> {
        if !window.fits(self.config.dimensions) || window.width() > MAX_WIDTH {
            return Err(Error::InvalidWindow {
                x0: window.x0,
                y0: window.y0,
                x1: window.x1,
                y1: window.y1,
            });
        }
        if pixels.len() != window.pixel_count() {
            return Err(Error::BufferSizeMismatch {
                expected: window.pixel_count(),
                provided: pixels.len(),
            });
        }

        self.set_window(window)?;

        let mut row = [0u8; ROW_BUFFER_LEN];
        for line in pixels.chunks_exact(window.width() as usize) {
            let len = line.len() * 2;
            for (bytes, pixel) in row[..len].chunks_exact_mut(2).zip(line) {
                bytes.copy_from_slice(&pixel.to_be_bytes());
            }
            self.send_data(&row[..len])?;
        }
        Ok(())
    }

    /// Draw placeholder text
    ///
    /// Each character becomes a solid `CHAR_WIDTH` x `CHAR_HEIGHT` block of
    /// `color`, laid out left to right from `(x, y)`. There are no glyphs.
    /// Drawing stops silently at the first cell that would cross the right
    /// edge; the text does not wrap.
    ///
    /// Returns the number of cells drawn.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRect` if a cell would cross the bottom edge.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: u16,
        y: u16,
        color: Rgb565,
    ) -> Result<usize, Error<I>> {
        let width = u32::from(self.config.dimensions.width);
        let mut drawn = 0;
        for (index, _) in text.chars().enumerate() {
            let cell_x = u32::from(x) + index as u32 * u32::from(CHAR_WIDTH);
            if cell_x + u32::from(CHAR_WIDTH) > width {
                break;
            }
            self.fill_rect(cell_x as u16, y, CHAR_WIDTH, CHAR_HEIGHT, color)?;
            drawn += 1;
        }
        trace!(
            "st7789: text {} of {} cells at ({},{})",
            drawn,
            text.chars().count(),
            x,
            y
        );
        Ok(drawn)
    }

    /// Switch the backlight on or off
    pub fn set_backlight(&mut self, on: bool) -> DisplayResult<I> {
        let result = self.interface.set_backlight(on);
        self.settle(result)
    }

    /// Blank the screen and switch the backlight off
    ///
    /// The backlight is switched off even if blanking fails; the first error
    /// is returned. The controller itself stays awake; call
    /// [`init`](Self::init) before drawing again after a host-side power
    /// cycle.
    pub fn shutdown(&mut self) -> DisplayResult<I> {
        debug!("st7789: shutdown");
        let blanked = self.fill(Rgb565::BLACK);
        let dimmed = self.set_backlight(false);
        blanked?;
        dimmed
    }

    /// Number of transfers dropped under [`TransferPolicy::BestEffort`]
    pub fn dropped_transfers(&self) -> u32 {
        self.dropped_transfers
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the driver and return the interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        let result = self.interface.send_command(cmd);
        self.settle(result)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        let result = self.interface.send_data(data);
        self.settle(result)
    }

    /// Apply the transfer policy to one interface result
    fn settle(&mut self, result: Result<(), I::Error>) -> DisplayResult<I> {
        match (result, self.config.transfer_policy) {
            (Ok(()), _) => Ok(()),
            (Err(e), TransferPolicy::Propagate) => Err(Error::Interface(e)),
            (Err(e), TransferPolicy::BestEffort) => {
                self.dropped_transfers = self.dropped_transfers.saturating_add(1);
                warn!("st7789: transfer dropped: {:?}", e);
                Ok(())
            }
        }
    }
}
