//! Display/touch orientation synchronization
//!
//! The display and the touch driver never reference each other. What they
//! share is the small [`Orientation`] record: rotation plus the display's
//! logical size in that rotation. The functions here are the only place
//! where the two meet.
//!
//! Prefer [`rotate`], which changes the surface and updates the touch
//! driver in one call. [`sync`] is for code that rotated the surface
//! itself; calling it after every such rotation is the caller's job, and
//! skipping it leaves the touch driver clamping against a stale size.

use crate::surface::Surface;

/// Rotation and logical size shared by display and touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Orientation {
    pub rotation: u8,
    pub width: i16,
    pub height: i16,
}

/// Anything that maps coordinates through the display orientation
pub trait OrientationSink {
    fn apply_orientation(&mut self, orientation: Orientation);
}

/// Push the surface's current orientation into `sink`.
pub fn sync<S, T>(surface: &S, sink: &mut T)
where
    S: Surface + ?Sized,
    T: OrientationSink + ?Sized,
{
    sink.apply_orientation(surface.orientation());
}

/// Rotate the surface and update `sink` with the resulting size.
pub fn rotate<S, T>(surface: &mut S, sink: &mut T, rotation: u8)
where
    S: Surface + ?Sized,
    T: OrientationSink + ?Sized,
{
    surface.set_rotation(rotation);
    sync(surface, sink);
}
