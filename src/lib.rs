//! Driver pair for the JC3248W535 touch panel
//!
//! The board couples an AXS15231B display controller (QSPI, with an
//! off-chip frame buffer) and the AXS15231B touch controller on I2C.
//! This crate provides:
//!
//! - The touch wire protocol and frame decoding ([`wire`])
//! - Rotation remapping and viewport clamping ([`rotation`])
//! - The polled touch driver ([`touch`])
//! - Display/touch orientation synchronization ([`orientation`])
//! - A rotating RGB565 frame-buffer surface ([`surface`])
//! - Board wiring and protocol constants ([`config`])
//!
//! Everything is blocking and built on `embedded-hal` 1.0 traits, so the
//! crate runs unchanged on any HAL that implements them.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod orientation;
pub mod rotation;
pub mod surface;
pub mod touch;
pub mod wire;

pub use config::TouchConfig;
pub use orientation::{Orientation, OrientationSink};
pub use rotation::{Rotation, Viewport};
pub use surface::{Canvas, Display, DisplayError, Panel, Surface};
pub use touch::{TouchController, TouchError, TouchSample};
pub use wire::{Command, Frame, RawPoint, TransactionError};
