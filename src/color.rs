//! RGB565 color type
//!
//! The ST7789 is configured for 16 bits per pixel. Each pixel is packed as
//! 5 bits red, 6 bits green and 5 bits blue, and travels over SPI high byte
//! first.
//!
//! | Bits  | 15..11 | 10..5 | 4..0 |
//! |-------|--------|-------|------|
//! | Field | red    | green | blue |
//!
//! ## Example
//!
//! ```
//! use st7789_spi::Rgb565;
//!
//! let red = Rgb565::from_rgb(31, 0, 0);
//! assert_eq!(red, Rgb565::RED);
//! assert_eq!(red.to_be_bytes(), [0xF8, 0x00]);
//! assert_eq!(red.inverted(), Rgb565::CYAN);
//! ```

/// A 16-bit RGB565 color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    /// Black (0x0000)
    pub const BLACK: Self = Self(0x0000);
    /// White (0xFFFF)
    pub const WHITE: Self = Self(0xFFFF);
    /// Red (0xF800)
    pub const RED: Self = Self(0xF800);
    /// Green (0x07E0)
    pub const GREEN: Self = Self(0x07E0);
    /// Blue (0x001F)
    pub const BLUE: Self = Self(0x001F);
    /// Yellow (0xFFE0)
    pub const YELLOW: Self = Self(0xFFE0);
    /// Magenta (0xF81F)
    pub const MAGENTA: Self = Self(0xF81F);
    /// Cyan (0x07FF)
    pub const CYAN: Self = Self(0x07FF);

    /// Pack 5-bit red, 6-bit green and 5-bit blue channels
    ///
    /// Channel values wider than their field are masked.
    ///
    /// ```
    /// use st7789_spi::Rgb565;
    ///
    /// assert_eq!(Rgb565::from_rgb(0, 63, 0), Rgb565::GREEN);
    /// assert_eq!(Rgb565::from_rgb(0xFF, 0xFF, 0xFF), Rgb565::WHITE);
    /// ```
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r & 0x1F) as u16;
        let g = (g & 0x3F) as u16;
        let b = (b & 0x1F) as u16;
        Self((r << 11) | (g << 5) | b)
    }

    /// Raw 16-bit value
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Red channel (0..=31)
    pub const fn r(self) -> u8 {
        (self.0 >> 11) as u8 & 0x1F
    }

    /// Green channel (0..=63)
    pub const fn g(self) -> u8 {
        (self.0 >> 5) as u8 & 0x3F
    }

    /// Blue channel (0..=31)
    pub const fn b(self) -> u8 {
        self.0 as u8 & 0x1F
    }

    /// Wire encoding, high byte first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Bitwise inverse of this color
    ///
    /// Handy for text that must contrast with a freshly filled background.
    pub const fn inverted(self) -> Self {
        Self(self.0 ^ 0xFFFF)
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Rgb565 {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU16;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Rgb565 {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::IntoStorage;
        Self(color.into_storage())
    }
}

#[cfg(feature = "graphics")]
impl From<Rgb565> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::new(color.r(), color.g(), color.b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_matches_channel_packing() {
        assert_eq!(Rgb565::from_rgb(31, 0, 0), Rgb565::RED);
        assert_eq!(Rgb565::from_rgb(0, 63, 0), Rgb565::GREEN);
        assert_eq!(Rgb565::from_rgb(0, 0, 31), Rgb565::BLUE);
        assert_eq!(Rgb565::from_rgb(31, 63, 0), Rgb565::YELLOW);
        assert_eq!(Rgb565::from_rgb(31, 0, 31), Rgb565::MAGENTA);
        assert_eq!(Rgb565::from_rgb(0, 63, 31), Rgb565::CYAN);
        assert_eq!(Rgb565::from_rgb(31, 63, 31), Rgb565::WHITE);
    }

    #[test]
    fn test_channels() {
        let color = Rgb565::from_rgb(17, 42, 5);
        assert_eq!(color.r(), 17);
        assert_eq!(color.g(), 42);
        assert_eq!(color.b(), 5);
    }

    #[test]
    fn test_wire_bytes_are_big_endian() {
        assert_eq!(Rgb565(0x1234).to_be_bytes(), [0x12, 0x34]);
        assert_eq!(Rgb565::BLUE.to_be_bytes(), [0x00, 0x1F]);
    }

    #[test]
    fn test_inverted() {
        assert_eq!(Rgb565::RED.inverted(), Rgb565::CYAN);
        assert_eq!(Rgb565::BLACK.inverted(), Rgb565::WHITE);
        assert_eq!(Rgb565::YELLOW.inverted(), Rgb565::BLUE);
    }

    #[test]
    fn test_u16_conversions() {
        let color: Rgb565 = 0xF81F.into();
        assert_eq!(color, Rgb565::MAGENTA);
        assert_eq!(u16::from(color), 0xF81F);
    }

    #[cfg(feature = "graphics")]
    #[test]
    fn test_embedded_graphics_conversion() {
        use embedded_graphics_core::pixelcolor::Rgb565 as EgRgb565;
        use embedded_graphics_core::pixelcolor::RgbColor;

        assert_eq!(Rgb565::from(EgRgb565::RED), Rgb565::RED);
        assert_eq!(Rgb565::from(EgRgb565::new(17, 42, 5)), Rgb565::from_rgb(17, 42, 5));
        assert_eq!(EgRgb565::from(Rgb565::CYAN), EgRgb565::CYAN);
    }
}
