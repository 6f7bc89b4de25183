//! Polled AXS15231B touch driver
//!
//! The controller is read on demand; the interrupt line is not used.
//! Each [`TouchController::poll`] runs exactly one bus exchange, decodes
//! the frame, remaps it into the display's logical orientation and clamps
//! it to the logical viewport.
//!
//! The orientation used for the remap is whatever was last pushed with
//! [`TouchController::set_rotation`] (or through
//! [`OrientationSink`]). The driver holds no reference to the display, so
//! every display rotation must be followed by a sync, see
//! [`crate::orientation`].

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::TouchConfig;
use crate::orientation::{Orientation, OrientationSink};
use crate::rotation::{Rotation, Viewport};
use crate::wire::{self, TransactionError};

/// One touch reading in logical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TouchSample {
    pub x: u16,
    pub y: u16,
    pub touched: bool,
}

/// Why a poll produced no touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchError<E> {
    /// Command write failed (device absent or NAK)
    Bus(E),
    /// Response frame was incomplete
    ShortRead(E),
    /// Controller answered with an idle frame
    NoTouch,
}

impl<E> From<TransactionError<E>> for TouchError<E> {
    fn from(err: TransactionError<E>) -> Self {
        match err {
            TransactionError::Write(e) => Self::Bus(e),
            TransactionError::ShortRead(e) => Self::ShortRead(e),
        }
    }
}

/// AXS15231B touch controller on I2C
pub struct TouchController<I2C, D> {
    i2c: I2C,
    delay: D,
    config: TouchConfig,
    rotation: u8,
    viewport: Viewport,
    last: TouchSample,
}

impl<I2C, D> TouchController<I2C, D> {
    /// Create a driver with the board's default address and timing.
    ///
    /// Starts in portrait with a 320x480 viewport.
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_config(i2c, delay, TouchConfig::default())
    }

    pub fn with_config(i2c: I2C, delay: D, config: TouchConfig) -> Self {
        Self {
            i2c,
            delay,
            config,
            rotation: Rotation::Portrait.into(),
            viewport: Viewport::default(),
            last: TouchSample::default(),
        }
    }

    /// Set the rotation and logical size used to map touches.
    ///
    /// Pass the display's width and height *after* it has been rotated.
    /// The rotation is stored as given; values above 3 map like portrait.
    pub fn set_rotation(&mut self, rotation: u8, logical_width: i16, logical_height: i16) {
        self.rotation = rotation;
        self.viewport = Viewport::new(logical_width, logical_height);
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Most recent touched sample.
    ///
    /// Coordinates persist until the next touch; `touched` drops to
    /// false once the controller reports an idle frame.
    pub fn last_touch(&self) -> TouchSample {
        self.last
    }

    /// Release the bus and delay provider
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C, D> TouchController<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Probe the controller address. Returns false if nothing answers.
    ///
    /// The probe is a one-byte read; several HALs reject zero-length
    /// writes before touching the bus.
    /// Bus setup (pins, 400 kHz clock) belongs to the HAL that built `I2C`.
    pub fn begin(&mut self) -> bool {
        let mut scratch = [0u8; 1];
        self.i2c.read(self.config.address, &mut scratch).is_ok()
    }

    /// Read one touch sample.
    ///
    /// # Errors
    /// - [`TouchError::Bus`] / [`TouchError::ShortRead`]: the last touch is
    ///   left untouched
    /// - [`TouchError::NoTouch`]: the last touch is marked released
    pub fn poll(&mut self) -> Result<TouchSample, TouchError<I2C::Error>> {
        let frame = wire::transact(&mut self.i2c, &mut self.delay, &self.config)?;

        let Some(raw) = frame.decode() else {
            self.last.touched = false;
            return Err(TouchError::NoTouch);
        };

        let (x, y) = Rotation::from(self.rotation).map(raw.x, raw.y);
        let (x, y) = self.viewport.clamp(x, y);

        let sample = TouchSample { x, y, touched: true };
        self.last = sample;
        Ok(sample)
    }

    /// Boolean form of [`poll`](Self::poll).
    ///
    /// On success `sample` is overwritten. On failure only
    /// `sample.touched` is cleared; its coordinates are left as they were.
    pub fn read(&mut self, sample: &mut TouchSample) -> bool {
        match self.poll() {
            Ok(s) => {
                *sample = s;
                true
            }
            Err(_) => {
                sample.touched = false;
                false
            }
        }
    }

    /// Whether the panel is touched right now.
    ///
    /// Runs a full bus exchange, same cost as [`read`](Self::read).
    pub fn is_touched(&mut self) -> bool {
        let mut sample = TouchSample::default();
        self.read(&mut sample)
    }
}

impl<I2C, D> OrientationSink for TouchController<I2C, D> {
    fn apply_orientation(&mut self, orientation: Orientation) {
        self.set_rotation(orientation.rotation, orientation.width, orientation.height);
    }
}
