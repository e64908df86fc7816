//! Graphics support via embedded-graphics
//!
//! With the `graphics` feature, [`Display`] implements the
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) trait from
//! the embedded-graphics ecosystem. There is no frame buffer: every draw call
//! goes straight to the controller through windowed writes.
//!
//! - single pixels become 1x1 windows
//! - solid fills become one window plus one transfer per row
//! - `clear` is a full-screen [`Display::fill`]
//!
//! Anything drawn off screen is clipped.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use st7789_spi::{Config, Display, Interface, Rgb565};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
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
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let interface = Interface::new(MockSpi).with_dc(MockPin).with_cs(MockPin);
//! let mut display = Display::new(interface, Config::default_240x240());
//!
//! let _ = display.clear(Rgb565::BLACK);
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb565::YELLOW))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Rgb565;
use crate::display::{Display, Window};
use crate::error::Error;
use crate::interface::DisplayInterface;

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = Rgb565;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            let (x, y) = (x as u16, y as u16);
            self.write_pixels(Window::new(x, y, x, y), &[color])?;
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let screen = Rectangle::new(Point::zero(), self.size());
        let area = area.intersection(&screen);
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }

        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color,
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color)
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        let dims = self.dimensions();
        Size::new(dims.width as u32, dims.height as u32)
    }
}
