use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use display_interface_spi::SPIInterface;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle};
use embedded_hal::delay::DelayNs;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use jc3248w535::{Canvas, Display, Panel, TouchSample};

const SLPOUT: u8 = 0x11;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const COLMOD: u8 = 0x3A;
const COLMOD_RGB565: u8 = 0x55;

pub type PanelSpi<'a> = ExclusiveDevice<Spi<'a, SPI0, Blocking>, Output<'a>, NoDelay>;
pub type Lcd<'a> = Display<Axs15231b<SPIInterface<PanelSpi<'a>, Output<'a>>>, Output<'a>>;

/// AXS15231B driven over a single-lane SPI link
pub struct Axs15231b<DI> {
    di: DI,
}

impl<DI> Axs15231b<DI>
where
    DI: WriteOnlyDataCommand,
{
    pub fn new(di: DI) -> Self {
        Self { di }
    }

    /// Wake the controller and switch it to RGB565.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.command(SLPOUT, &[])?;
        delay.delay_ms(120);
        self.command(COLMOD, &[COLMOD_RGB565])?;
        self.command(DISPON, &[])?;
        delay.delay_ms(20);
        Ok(())
    }

    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), DisplayError> {
        self.di.send_commands(DataFormat::U8(&[cmd]))?;
        if !params.is_empty() {
            self.di.send_data(DataFormat::U8(params))?;
        }
        Ok(())
    }
}

impl<DI> Panel for Axs15231b<DI>
where
    DI: WriteOnlyDataCommand,
{
    type Error = DisplayError;

    fn write_frame(&mut self, width: u16, height: u16, pixels: &[Rgb565]) -> Result<(), Self::Error> {
        let [xh, xl] = width.saturating_sub(1).to_be_bytes();
        let [yh, yl] = height.saturating_sub(1).to_be_bytes();
        self.command(CASET, &[0, 0, xh, xl])?;
        self.command(RASET, &[0, 0, yh, yl])?;

        self.di.send_commands(DataFormat::U8(&[RAMWR]))?;
        let mut words = pixels.iter().map(|c| c.into_storage());
        self.di.send_data(DataFormat::U16BEIter(&mut words))
    }
}

/// One colour per rotation so a missed sync shows up as the wrong colour
pub const ROTATION_COLORS: [Rgb565; 4] = [
    Rgb565::RED,
    Rgb565::GREEN,
    Rgb565::BLUE,
    Rgb565::MAGENTA,
];

fn rotation_color(canvas: &Canvas) -> Rgb565 {
    ROTATION_COLORS[u8::from(canvas.rotation()) as usize]
}

/// Clear the canvas and mark the logical origin.
pub fn draw_origin(canvas: &mut Canvas) {
    canvas.clear(Rgb565::BLACK).ok();
    Rectangle::new(Point::zero(), Size::new(24, 24))
        .into_styled(PrimitiveStyle::with_fill(rotation_color(canvas)))
        .draw(canvas)
        .ok();

    let size = canvas.size();
    Rectangle::new(
        Point::new(size.width as i32 - 24, size.height as i32 - 24),
        Size::new(24, 24),
    )
    .into_styled(PrimitiveStyle::with_stroke(rotation_color(canvas), 2))
    .draw(canvas)
    .ok();
}

/// Dot at the touch position, in logical coordinates.
pub fn draw_touch(canvas: &mut Canvas, sample: TouchSample) {
    let center = Point::new(i32::from(sample.x), i32::from(sample.y));
    Circle::with_center(center, 9)
        .into_styled(PrimitiveStyle::with_fill(rotation_color(canvas)))
        .draw(canvas)
        .ok();
}
