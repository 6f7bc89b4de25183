use embassy_rp::gpio::Input;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C1;
use embassy_time::Delay;
use jc3248w535::TouchController;

pub type TouchBus<'a> = I2c<'a, I2C1, Blocking>;

pub struct TouchPanel<'a> {
    pub touch: TouchController<TouchBus<'a>, Delay>,
    // Configured so the line does not float; the driver only polls.
    #[allow(dead_code)]
    pub irq: Input<'a>,
}

impl<'a> TouchPanel<'a> {
    pub fn new(i2c: TouchBus<'a>, irq: Input<'a>) -> Self {
        Self {
            touch: TouchController::new(i2c, Delay),
            irq,
        }
    }
}
