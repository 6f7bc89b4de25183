//! Rotation remapping and viewport clamping
//!
//! The touch sensor is bonded to the glass, so its axes never move when
//! the display content is rotated. A raw panel-space point is remapped
//! into the display's logical orientation with [`Rotation::map`] and then
//! limited to the synchronized logical size with [`Viewport::clamp`].
//!
//! The remap uses the fixed physical panel size; the clamp uses the
//! logical size the display reported. The two are deliberately separate.

use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};

/// Display orientation shared by the surface and the touch remap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Rotation {
    /// 320x480
    #[default]
    Portrait = 0,
    /// 480x320
    Landscape = 1,
    /// 320x480, upside down
    PortraitInverted = 2,
    /// 480x320, upside down
    LandscapeInverted = 3,
}

impl From<u8> for Rotation {
    /// Unknown rotation values fall back to the identity mapping.
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Landscape,
            2 => Self::PortraitInverted,
            3 => Self::LandscapeInverted,
            _ => Self::Portrait,
        }
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation as u8
    }
}

impl Rotation {
    /// Whether logical width and height are swapped relative to the panel
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Landscape | Self::LandscapeInverted)
    }

    /// Logical (width, height) of the panel in this orientation
    pub const fn logical_size(self) -> (i16, i16) {
        if self.swaps_axes() {
            (PANEL_HEIGHT as i16, PANEL_WIDTH as i16)
        } else {
            (PANEL_WIDTH as i16, PANEL_HEIGHT as i16)
        }
    }

    /// Map a panel-space point into logical space.
    ///
    /// | rotation | logical (x, y)        |
    /// |----------|-----------------------|
    /// | 0        | (x, y)                |
    /// | 1        | (y, 320 - x)          |
    /// | 2        | (320 - x, 480 - y)    |
    /// | 3        | (480 - y, x)          |
    ///
    /// Subtraction wraps: a raw value past the panel edge becomes a large
    /// coordinate that [`Viewport::clamp`] pulls back to the last pixel.
    pub const fn map(self, x: u16, y: u16) -> (u16, u16) {
        match self {
            Self::Portrait => (x, y),
            Self::Landscape => (y, PANEL_WIDTH.wrapping_sub(x)),
            Self::PortraitInverted => (PANEL_WIDTH.wrapping_sub(x), PANEL_HEIGHT.wrapping_sub(y)),
            Self::LandscapeInverted => (PANEL_HEIGHT.wrapping_sub(y), x),
        }
    }
}

/// Logical drawing area reported by the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Viewport {
    pub width: i16,
    pub height: i16,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(PANEL_WIDTH as i16, PANEL_HEIGHT as i16)
    }
}

impl Viewport {
    pub const fn new(width: i16, height: i16) -> Self {
        Self { width, height }
    }

    /// Pull a point at or past the right/bottom edge onto the last pixel.
    pub fn clamp(self, x: u16, y: u16) -> (u16, u16) {
        (clamp_axis(x, self.width), clamp_axis(y, self.height))
    }
}

fn clamp_axis(value: u16, limit: i16) -> u16 {
    if i32::from(value) >= i32::from(limit) {
        // Same truncation as storing `limit - 1` into an unsigned field.
        (i32::from(limit) - 1) as u16
    } else {
        value
    }
}
