#![no_std]
#![no_main]

mod display;
mod touch;

use defmt::*;
use display_interface_spi::SPIInterface;
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::spi::{self, Spi};
use embassy_time::{Delay, Duration, Instant, Ticker};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal_bus::spi::ExclusiveDevice;
use jc3248w535::surface::PIXELS;
use jc3248w535::{Display, Surface, TouchSample, config, orientation};
use static_cell::ConstStaticCell;
use {defmt_rtt as _, panic_probe as _};

#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

static FRAME: ConstStaticCell<[Rgb565; PIXELS]> = ConstStaticCell::new([Rgb565::BLACK; PIXELS]);

const POLL_PERIOD: Duration = Duration::from_millis(16);
const ROTATE_EVERY: Duration = Duration::from_secs(10);
const SPI_FREQUENCY: u32 = 40_000_000;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Starting JC3248W535 panel demo");

    let p = embassy_rp::init(Default::default());

    // Touch on I2C1: SDA GP14, SCL GP15, INT GP13
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config::TOUCH_I2C_FREQUENCY;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
    let irq = Input::new(p.PIN_13, Pull::Up);
    let mut panel_touch = touch::TouchPanel::new(i2c, irq);

    if panel_touch.touch.begin() {
        info!("Touch controller found at {=u8:#x}", config::TOUCH_ADDR);
    } else {
        warn!("Touch controller not answering at {=u8:#x}", config::TOUCH_ADDR);
    }

    // Display on SPI0: CLK GP18, MOSI GP19, CS GP17, DC GP16, backlight GP20
    let mut spi_config = spi::Config::default();
    spi_config.frequency = SPI_FREQUENCY;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let backlight = Output::new(p.PIN_20, Level::Low);
    let spi_device = ExclusiveDevice::new_no_delay(spi, cs).unwrap();

    let mut panel = display::Axs15231b::new(SPIInterface::new(spi_device, dc));
    if let Err(e) = panel.init(&mut Delay) {
        error!("Panel init failed: {}", Debug2Format(&e));
    }

    let mut lcd: display::Lcd<'_> = Display::new(panel, backlight, FRAME.take());
    if let Err(e) = lcd.begin() {
        error!("Display begin failed: {}", Debug2Format(&e));
    }

    orientation::sync(&lcd, &mut panel_touch.touch);
    display::draw_origin(lcd.canvas_mut());

    let mut ticker = Ticker::every(POLL_PERIOD);
    let mut rotated_at = Instant::now();
    let mut sample = TouchSample::default();
    let mut dirty = true;

    loop {
        if rotated_at.elapsed() >= ROTATE_EVERY {
            let next = (lcd.rotation() + 1) % 4;
            orientation::rotate(&mut lcd, &mut panel_touch.touch, next);
            info!("Rotation {} ({}x{})", next, lcd.width(), lcd.height());

            display::draw_origin(lcd.canvas_mut());
            rotated_at = Instant::now();
            dirty = true;
        }

        if panel_touch.touch.read(&mut sample) {
            debug!("Touch {}", sample);
            display::draw_touch(lcd.canvas_mut(), sample);
            dirty = true;
        }

        if dirty {
            if let Err(e) = lcd.flush() {
                warn!("Flush failed: {}", Debug2Format(&e));
            }
            dirty = false;
        }

        ticker.next().await;
    }
}

#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
