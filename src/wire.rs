//! AXS15231B touch wire protocol
//!
//! A touch read is one request/response exchange: an 11-byte command is
//! written to the controller, and after a short delay an 8-byte frame is
//! read back. Nothing spans two exchanges.
//!
//! Frame layout (only the bytes used here):
//!
//! | byte | meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | must be 0 for a touch report              |
//! | 1    | touch count, non-zero while touched       |
//! | 2    | bits 3..0: X[11:8]                        |
//! | 3    | X[7:0]                                    |
//! | 4    | bits 3..0: Y[11:8]                        |
//! | 5    | Y[7:0]                                    |

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::TouchConfig;

pub const COMMAND_LEN: usize = 11;
pub const FRAME_LEN: usize = 8;

/// Fixed-length command written to the touch controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command([u8; COMMAND_LEN]);

impl Command {
    /// Read-touchpad request, zero padded to 11 bytes
    pub const READ_TOUCHPAD: Self = Self([
        0xB5, 0xAB, 0xA5, 0x5A, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00,
    ]);

    pub const fn as_bytes(&self) -> &[u8; COMMAND_LEN] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }
}

/// Raw panel-space touch coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawPoint {
    pub x: u16,
    pub y: u16,
}

/// 8-byte response frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    const STATUS: usize = 0;
    const COUNT: usize = 1;
    const X_HIGH: usize = 2;
    const X_LOW: usize = 3;
    const Y_HIGH: usize = 4;
    const Y_LOW: usize = 5;

    pub const fn new(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Touch-presence gate: status byte clear and touch count non-zero
    pub fn is_touch(&self) -> bool {
        self.0[Self::STATUS] == 0 && self.0[Self::COUNT] != 0
    }

    /// Decode the touch point, or `None` for an idle frame.
    ///
    /// Coordinates come out of the controller already in panel pixels
    /// (0..320 by 0..480 in portrait); no sensor-range scaling is applied.
    pub fn decode(&self) -> Option<RawPoint> {
        if !self.is_touch() {
            return None;
        }
        Some(RawPoint {
            x: twelve_bit(self.0[Self::X_HIGH], self.0[Self::X_LOW]),
            y: twelve_bit(self.0[Self::Y_HIGH], self.0[Self::Y_LOW]),
        })
    }
}

fn twelve_bit(high: u8, low: u8) -> u16 {
    (u16::from(high & 0x0F) << 8) | u16::from(low)
}

/// Failure of one request/response exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransactionError<E> {
    /// The command write was not acknowledged; no read was attempted
    Write(E),
    /// The response read did not deliver all 8 bytes
    ShortRead(E),
}

/// Run one touch read exchange.
///
/// Not reentrant: callers sharing the bus across contexts must hold a
/// lock around the whole call.
pub fn transact<I2C, D>(
    i2c: &mut I2C,
    delay: &mut D,
    config: &TouchConfig,
) -> Result<Frame, TransactionError<I2C::Error>>
where
    I2C: I2c,
    D: DelayNs,
{
    i2c.write(config.address, Command::READ_TOUCHPAD.as_bytes())
        .map_err(TransactionError::Write)?;

    delay.delay_us(config.response_delay_us);

    let mut buf = [0u8; FRAME_LEN];
    i2c.read(config.address, &mut buf)
        .map_err(TransactionError::ShortRead)?;

    Ok(Frame(buf))
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted I2C bus and delay for driver tests

    use embedded_hal::delay::DelayNs;
    use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

    use super::{COMMAND_LEN, FRAME_LEN};

    pub struct MockBus {
        pub response: [u8; FRAME_LEN],
        pub fail_write: bool,
        pub fail_read: bool,
        pub writes: usize,
        pub reads: usize,
        pub last_address: Option<u8>,
        pub last_write: [u8; COMMAND_LEN],
        pub last_write_len: usize,
    }

    impl MockBus {
        pub fn new(response: [u8; FRAME_LEN]) -> Self {
            Self {
                response,
                fail_write: false,
                fail_read: false,
                writes: 0,
                reads: 0,
                last_address: None,
                last_write: [0; COMMAND_LEN],
                last_write_len: 0,
            }
        }

        pub fn idle() -> Self {
            Self::new([0; FRAME_LEN])
        }
    }

    impl ErrorType for MockBus {
        type Error = ErrorKind;
    }

    impl I2c for MockBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = Some(address);
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.writes += 1;
                        // RP-series HALs refuse address-only writes
                        if bytes.is_empty() {
                            return Err(ErrorKind::Other);
                        }
                        if self.fail_write {
                            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
                        }
                        let len = bytes.len().min(COMMAND_LEN);
                        self.last_write[..len].copy_from_slice(&bytes[..len]);
                        self.last_write_len = bytes.len();
                    }
                    Operation::Read(buf) => {
                        self.reads += 1;
                        if self.fail_read {
                            return Err(ErrorKind::Other);
                        }
                        let len = buf.len().min(FRAME_LEN);
                        buf[..len].copy_from_slice(&self.response[..len]);
                    }
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MockDelay {
        pub total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockBus, MockDelay};
    use super::*;

    #[test]
    fn test_command_bytes() {
        assert_eq!(
            Command::READ_TOUCHPAD.as_bytes(),
            &[0xB5, 0xAB, 0xA5, 0x5A, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00]
        );
        assert_eq!(Command::READ_TOUCHPAD.get(7), Some(0x08));
        assert_eq!(Command::READ_TOUCHPAD.get(11), None);
    }

    #[test]
    fn test_touch_gate() {
        assert!(!Frame::new([0, 0, 1, 2, 3, 4, 0, 0]).is_touch());
        assert!(Frame::new([0, 1, 0, 0, 0, 0, 0, 0]).is_touch());
        assert!(Frame::new([0, 0xFF, 0, 0, 0, 0, 0, 0]).is_touch());
        assert!(!Frame::new([1, 1, 0, 0, 0, 0, 0, 0]).is_touch());
        assert!(!Frame::new([0x80, 0, 0x01, 0x23, 0x02, 0x34, 0, 0]).is_touch());
    }

    #[test]
    fn test_decode_twelve_bit() {
        let frame = Frame::new([0, 1, 0x01, 0x23, 0x02, 0x34, 0xAA, 0xBB]);
        assert_eq!(frame.decode(), Some(RawPoint { x: 291, y: 564 }));

        // Upper nibble of the high byte carries event flags, not position
        let frame = Frame::new([0, 1, 0xF1, 0x23, 0x42, 0x34, 0, 0]);
        assert_eq!(frame.decode(), Some(RawPoint { x: 0x123, y: 0x234 }));

        assert_eq!(Frame::new([0, 0, 0x01, 0x23, 0x02, 0x34, 0, 0]).decode(), None);
    }

    #[test]
    fn test_frame_get_is_bounds_checked() {
        let frame = Frame::new([1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(frame.get(7), Some(8));
        assert_eq!(frame.get(8), None);
    }

    #[test]
    fn test_transact_writes_command_then_reads() {
        let mut bus = MockBus::new([0, 1, 0, 10, 0, 20, 0, 0]);
        let mut delay = MockDelay::default();
        let config = TouchConfig::default();

        let frame = transact(&mut bus, &mut delay, &config).unwrap();

        assert_eq!(frame.as_bytes(), &[0, 1, 0, 10, 0, 20, 0, 0]);
        assert_eq!(bus.last_address, Some(0x3B));
        assert_eq!(bus.last_write_len, COMMAND_LEN);
        assert_eq!(&bus.last_write, Command::READ_TOUCHPAD.as_bytes());
        assert_eq!((bus.writes, bus.reads), (1, 1));
        assert_eq!(delay.total_ns, 50_000);
    }

    #[test]
    fn test_transact_write_failure_skips_read() {
        let mut bus = MockBus::idle();
        bus.fail_write = true;
        let mut delay = MockDelay::default();

        let result = transact(&mut bus, &mut delay, &TouchConfig::default());

        assert!(matches!(result, Err(TransactionError::Write(_))));
        assert_eq!(bus.reads, 0);
        assert_eq!(delay.total_ns, 0);
    }

    #[test]
    fn test_transact_short_read() {
        let mut bus = MockBus::idle();
        bus.fail_read = true;
        let mut delay = MockDelay::default();

        let result = transact(&mut bus, &mut delay, &TouchConfig::default());

        assert!(matches!(result, Err(TransactionError::ShortRead(_))));
        assert_eq!(bus.writes, 1);
    }
}
