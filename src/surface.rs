//! Frame-buffer display surface
//!
//! The AXS15231B on this board only accepts whole frames over QSPI, so all
//! drawing goes to an RGB565 canvas in RAM and [`Surface::flush`] pushes
//! it out. The canvas is always stored in the panel's physical portrait
//! layout (320x480); rotation only changes how logical coordinates land
//! in it.
//!
//! Panel init sequencing and the bus itself live behind [`Panel`].

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::digital::OutputPin;

use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};
use crate::orientation::Orientation;
use crate::rotation::Rotation;

pub const WIDTH: usize = PANEL_WIDTH as usize;
pub const HEIGHT: usize = PANEL_HEIGHT as usize;
pub const PIXELS: usize = WIDTH * HEIGHT;

/// A rotatable drawing surface backed by a frame buffer
pub trait Surface {
    type Error;

    /// Logical width for the current rotation
    fn width(&self) -> i16;
    /// Logical height for the current rotation
    fn height(&self) -> i16;
    fn rotation(&self) -> u8;
    fn set_rotation(&mut self, rotation: u8);
    /// Push the frame buffer to the physical panel
    fn flush(&mut self) -> Result<(), Self::Error>;

    fn orientation(&self) -> Orientation {
        Orientation {
            rotation: self.rotation(),
            width: self.width(),
            height: self.height(),
        }
    }
}

/// Sink for complete frames
pub trait Panel {
    type Error;

    /// Write a full frame, row-major in physical portrait layout.
    fn write_frame(&mut self, width: u16, height: u16, pixels: &[Rgb565])
    -> Result<(), Self::Error>;
}

/// RGB565 frame buffer in physical layout with a logical rotation
pub struct Canvas {
    pixels: &'static mut [Rgb565; PIXELS],
    rotation: Rotation,
}

impl Canvas {
    pub fn new(pixels: &'static mut [Rgb565; PIXELS]) -> Self {
        Self {
            pixels,
            rotation: Rotation::Portrait,
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Values wrap modulo 4.
    pub fn set_rotation(&mut self, rotation: u8) {
        self.rotation = Rotation::from(rotation & 0x03);
    }

    /// Raw buffer in physical layout
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels[..]
    }

    pub fn logical_size(&self) -> (i16, i16) {
        self.rotation.logical_size()
    }

    /// Buffer index for a logical point, `None` when off-screen
    fn index(&self, point: Point) -> Option<usize> {
        let (w, h) = self.logical_size();
        if point.x < 0 || point.y < 0 || point.x >= i32::from(w) || point.y >= i32::from(h) {
            return None;
        }
        let (lx, ly) = (point.x as usize, point.y as usize);
        let (px, py) = match self.rotation {
            Rotation::Portrait => (lx, ly),
            Rotation::Landscape => (WIDTH - 1 - ly, lx),
            Rotation::PortraitInverted => (WIDTH - 1 - lx, HEIGHT - 1 - ly),
            Rotation::LandscapeInverted => (ly, HEIGHT - 1 - lx),
        };
        Some(py * WIDTH + px)
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|i| self.pixels[i])
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels.into_iter() {
            if let Some(index) = self.index(coord) {
                self.pixels[index] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        let (w, h) = self.logical_size();
        Size::new(w as u32, h as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<P, B> {
    Panel(P),
    Backlight(B),
}

/// Canvas, panel and backlight switch
pub struct Display<P, BL> {
    canvas: Canvas,
    panel: P,
    backlight: BL,
}

impl<P, BL> Display<P, BL>
where
    P: Panel,
    BL: OutputPin,
{
    pub fn new(panel: P, backlight: BL, buffer: &'static mut [Rgb565; PIXELS]) -> Self {
        Self {
            canvas: Canvas::new(buffer),
            panel,
            backlight,
        }
    }

    /// Light the backlight, reset to portrait and show a black frame.
    pub fn begin(&mut self) -> Result<(), DisplayError<P::Error, BL::Error>> {
        self.backlight_on().map_err(DisplayError::Backlight)?;
        self.canvas.set_rotation(Rotation::Portrait.into());
        self.canvas.clear(Rgb565::BLACK).ok();
        self.flush().map_err(DisplayError::Panel)
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn backlight_on(&mut self) -> Result<(), BL::Error> {
        self.backlight.set_high()
    }

    pub fn backlight_off(&mut self) -> Result<(), BL::Error> {
        self.backlight.set_low()
    }

    /// On/off only: anything above half brightness turns the light on.
    pub fn set_backlight(&mut self, brightness: u8) -> Result<(), BL::Error> {
        if brightness > 127 {
            self.backlight_on()
        } else {
            self.backlight_off()
        }
    }

    pub fn release(self) -> (P, BL, &'static mut [Rgb565; PIXELS]) {
        (self.panel, self.backlight, self.canvas.pixels)
    }
}

impl<P, BL> Surface for Display<P, BL>
where
    P: Panel,
    BL: OutputPin,
{
    type Error = P::Error;

    fn width(&self) -> i16 {
        self.canvas.logical_size().0
    }

    fn height(&self) -> i16 {
        self.canvas.logical_size().1
    }

    fn rotation(&self) -> u8 {
        self.canvas.rotation().into()
    }

    fn set_rotation(&mut self, rotation: u8) {
        self.canvas.set_rotation(rotation);
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.panel
            .write_frame(PANEL_WIDTH, PANEL_HEIGHT, self.canvas.pixels())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_hal::digital::ErrorType;
    use std::boxed::Box;
    use std::vec;

    fn buffer() -> &'static mut [Rgb565; PIXELS] {
        let boxed: Box<[Rgb565; PIXELS]> = vec![Rgb565::BLACK; PIXELS]
            .into_boxed_slice()
            .try_into()
            .unwrap();
        Box::leak(boxed)
    }

    #[derive(Default)]
    struct MockPanel {
        frames: usize,
        last_len: usize,
        first: Option<Rgb565>,
    }

    impl Panel for MockPanel {
        type Error = Infallible;

        fn write_frame(
            &mut self,
            width: u16,
            height: u16,
            pixels: &[Rgb565],
        ) -> Result<(), Self::Error> {
            assert_eq!((width, height), (320, 480));
            self.frames += 1;
            self.last_len = pixels.len();
            self.first = pixels.first().copied();
            Ok(())
        }
    }

    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    fn display() -> Display<MockPanel, MockPin> {
        Display::new(MockPanel::default(), MockPin { high: false }, buffer())
    }

    #[test]
    fn test_logical_size_follows_rotation() {
        let mut display = display();
        assert_eq!((display.width(), display.height()), (320, 480));

        display.set_rotation(1);
        assert_eq!((display.width(), display.height()), (480, 320));
        assert_eq!(display.canvas().size(), Size::new(480, 320));

        display.set_rotation(6);
        assert_eq!(display.rotation(), 2);
        assert_eq!((display.width(), display.height()), (320, 480));
    }

    #[test]
    fn test_canvas_maps_logical_origin() {
        let mut canvas = Canvas::new(buffer());
        let cases = [
            (0, 0),
            (1, WIDTH - 1),
            (2, PIXELS - 1),
            (3, (HEIGHT - 1) * WIDTH),
        ];
        for (rotation, expected) in cases {
            canvas.clear(Rgb565::BLACK).unwrap();
            canvas.set_rotation(rotation);
            Pixel(Point::zero(), Rgb565::RED).draw(&mut canvas).unwrap();
            assert_eq!(canvas.pixels()[expected], Rgb565::RED, "rotation {rotation}");
            assert_eq!(canvas.pixel(Point::zero()), Some(Rgb565::RED));
        }
    }

    #[test]
    fn test_canvas_drops_offscreen_pixels() {
        let mut canvas = Canvas::new(buffer());
        canvas.set_rotation(1);
        Rectangle::new(Point::new(470, 310), Size::new(40, 40))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::GREEN))
            .draw(&mut canvas)
            .unwrap();

        let lit = canvas.pixels().iter().filter(|&&c| c == Rgb565::GREEN).count();
        assert_eq!(lit, 10 * 10);
        assert_eq!(canvas.pixel(Point::new(480, 0)), None);
        assert_eq!(canvas.pixel(Point::new(-1, 0)), None);
    }

    #[test]
    fn test_begin_lights_and_flushes() {
        let mut display = display();
        display.set_rotation(3);
        display.canvas_mut().clear(Rgb565::WHITE).unwrap();

        display.begin().unwrap();

        assert_eq!(display.rotation(), 0);
        let (panel, pin, _) = display.release();
        assert!(pin.high);
        assert_eq!(panel.frames, 1);
        assert_eq!(panel.last_len, PIXELS);
        assert_eq!(panel.first, Some(Rgb565::BLACK));
    }

    #[test]
    fn test_set_backlight_threshold() {
        let mut display = display();
        display.set_backlight(200).unwrap();
        assert!(display.backlight.high);
        display.set_backlight(127).unwrap();
        assert!(!display.backlight.high);
        display.set_backlight(128).unwrap();
        assert!(display.backlight.high);
        display.backlight_off().unwrap();
        assert!(!display.backlight.high);
    }
}
