//! Board wiring and protocol constants
//!
//! Pin numbers are the ESP32-S3 GPIOs the JC3248W535 module is wired to.
//! Other boards pick their own pins; only the touch address, the bus
//! clock and the panel size are properties of the panel itself.

/// Touch controller 7-bit I2C address
pub const TOUCH_ADDR: u8 = 0x3B;
/// Touch I2C data pin
pub const TOUCH_SDA: u8 = 4;
/// Touch I2C clock pin
pub const TOUCH_SCL: u8 = 8;
/// Touch interrupt pin (configured as input, not serviced)
pub const TOUCH_INT: u8 = 3;
/// Touch I2C clock, fast mode
pub const TOUCH_I2C_FREQUENCY: u32 = 400_000;
/// Time the controller needs between the command and the response read
pub const TOUCH_RESPONSE_DELAY_US: u32 = 50;

pub const LCD_CS: u8 = 45;
pub const LCD_SCLK: u8 = 47;
pub const LCD_SDIO0: u8 = 21;
pub const LCD_SDIO1: u8 = 48;
pub const LCD_SDIO2: u8 = 40;
pub const LCD_SDIO3: u8 = 39;
/// Panel reset is not wired
pub const LCD_RST: Option<u8> = None;
pub const TFT_BL: u8 = 1;

/// Physical panel width (narrow axis) in pixels
pub const PANEL_WIDTH: u16 = 320;
/// Physical panel height (long axis) in pixels
pub const PANEL_HEIGHT: u16 = 480;

/// Touch controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Delay between command write and response read, in microseconds
    pub response_delay_us: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            address: TOUCH_ADDR,
            response_delay_us: TOUCH_RESPONSE_DELAY_US,
        }
    }
}
