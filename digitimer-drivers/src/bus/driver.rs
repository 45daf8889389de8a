//! Byte-level bus master
//!
//! Every operation follows the same pattern: request it from the
//! controller, spin on the completion flag, clear the flag. Only one
//! transaction is ever outstanding.

use digitimer_hal::{Ack, BusOp, I2cConfig, RetryPolicy, TwoWireController};

/// Bus driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// The completion flag never came up within the retry budget
    Timeout,
}

impl From<digitimer_hal::Timeout> for BusError {
    fn from(_: digitimer_hal::Timeout) -> Self {
        BusError::Timeout
    }
}

/// Master-mode bus driver
pub struct BusDriver<C> {
    controller: C,
    retry: RetryPolicy,
}

impl<C: TwoWireController> BusDriver<C> {
    /// Configure the controller for master mode and wrap it
    pub fn new(mut controller: C, config: &I2cConfig, retry: RetryPolicy) -> Self {
        controller.configure(config);
        Self { controller, retry }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Spin until the last request completes, then clear the flag
    fn wait(&mut self) -> Result<(), BusError> {
        let controller = &self.controller;
        self.retry.spin_until(|| controller.is_complete())?;
        self.controller.clear_complete();
        Ok(())
    }

    fn condition(&mut self, op: BusOp) -> Result<(), BusError> {
        self.controller.issue(op);
        self.wait()
    }

    pub fn start(&mut self) -> Result<(), BusError> {
        self.condition(BusOp::Start)
    }

    pub fn restart(&mut self) -> Result<(), BusError> {
        self.condition(BusOp::Restart)
    }

    pub fn stop(&mut self) -> Result<(), BusError> {
        self.condition(BusOp::Stop)
    }

    pub fn send_ack(&mut self) -> Result<(), BusError> {
        self.condition(BusOp::SendAck)
    }

    pub fn send_nack(&mut self) -> Result<(), BusError> {
        self.condition(BusOp::SendNack)
    }

    /// Transmit one byte and return the target's acknowledgment
    pub fn send(&mut self, byte: u8) -> Result<Ack, BusError> {
        self.controller.load(byte);
        self.wait()?;
        Ok(self.controller.ack_status())
    }

    /// Clock in one byte
    pub fn receive(&mut self) -> Result<u8, BusError> {
        self.condition(BusOp::Receive)?;
        Ok(self.controller.received())
    }

    /// Start, address for write, data bytes, stop
    ///
    /// Returns the acknowledgment of the last byte sent. A missing
    /// acknowledgment is not an error here; the transaction still runs to
    /// the stop condition.
    pub fn write(&mut self, address: u8, bytes: &[u8]) -> Result<Ack, BusError> {
        self.start()?;
        let mut ack = self.send(address << 1)?;
        for &byte in bytes {
            ack = self.send(byte)?;
        }
        self.stop()?;
        Ok(ack)
    }

    /// Start, address for read, receive `buf.len()` bytes, stop
    ///
    /// Every byte but the last is acknowledged; the last gets a NACK.
    /// Returns the address acknowledgment.
    pub fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<Ack, BusError> {
        self.start()?;
        let ack = self.send((address << 1) | 1)?;
        let last = buf.len().saturating_sub(1);
        for (i, slot) in buf.iter_mut().enumerate() {
            *slot = self.receive()?;
            if i == last {
                self.send_nack()?;
            } else {
                self.send_ack()?;
            }
        }
        self.stop()?;
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        Issue(BusOp),
        Load(u8),
        Clear,
    }

    /// Controller that raises its flag after a few polls
    struct MockController {
        ops: Vec<Op>,
        polls_needed: u32,
        polls: Cell<u32>,
        flag: bool,
        never_completes: bool,
        nack_bytes: Vec<u8>,
        last_ack: Ack,
        rx: Vec<u8>,
        configured: Option<I2cConfig>,
    }

    impl MockController {
        fn new() -> Self {
            Self {
                ops: Vec::new(),
                polls_needed: 3,
                polls: Cell::new(0),
                flag: false,
                never_completes: false,
                nack_bytes: Vec::new(),
                last_ack: Ack::Acknowledged,
                rx: Vec::new(),
                configured: None,
            }
        }

        fn request(&mut self) {
            assert!(!self.flag, "request issued before flag was cleared");
            self.polls.set(0);
            self.flag = !self.never_completes;
        }
    }

    impl TwoWireController for MockController {
        fn configure(&mut self, config: &I2cConfig) {
            self.configured = Some(*config);
        }

        fn issue(&mut self, op: BusOp) {
            self.ops.push(Op::Issue(op));
            self.request();
        }

        fn load(&mut self, byte: u8) {
            self.ops.push(Op::Load(byte));
            self.last_ack = if self.nack_bytes.contains(&byte) {
                Ack::NotAcknowledged
            } else {
                Ack::Acknowledged
            };
            self.request();
        }

        fn is_complete(&self) -> bool {
            self.polls.set(self.polls.get() + 1);
            self.flag && self.polls.get() >= self.polls_needed
        }

        fn clear_complete(&mut self) {
            self.ops.push(Op::Clear);
            self.flag = false;
        }

        fn ack_status(&self) -> Ack {
            self.last_ack
        }

        fn received(&self) -> u8 {
            let count = self
                .ops
                .iter()
                .filter(|op| **op == Op::Issue(BusOp::Receive))
                .count();
            self.rx.get(count - 1).copied().unwrap_or(0xFF)
        }
    }

    #[test]
    fn test_new_configures_controller() {
        let bus = BusDriver::new(MockController::new(), &I2cConfig::STANDARD, RetryPolicy::Forever);
        assert_eq!(bus.controller().configured, Some(I2cConfig::STANDARD));
        assert_eq!(bus.controller().configured.map(|c| c.baud_divider()), Some(159));
    }

    #[test]
    fn test_conditions_wait_and_clear() {
        let mut bus = BusDriver::new(MockController::new(), &I2cConfig::STANDARD, RetryPolicy::Forever);
        bus.start().unwrap();
        bus.restart().unwrap();
        bus.stop().unwrap();

        assert_eq!(
            bus.controller.ops,
            vec![
                Op::Issue(BusOp::Start),
                Op::Clear,
                Op::Issue(BusOp::Restart),
                Op::Clear,
                Op::Issue(BusOp::Stop),
                Op::Clear,
            ]
        );
    }

    #[test]
    fn test_write_frames_address_and_data() {
        let mut bus = BusDriver::new(MockController::new(), &I2cConfig::STANDARD, RetryPolicy::Forever);

        let ack = bus.write(0x38, &[0x0C, 0x08]).unwrap();

        assert_eq!(ack, Ack::Acknowledged);
        let loads: Vec<u8> = bus
            .controller
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Load(b) => Some(*b),
                _ => None,
            })
            .collect();
        assert_eq!(loads, vec![0x70, 0x0C, 0x08]);
        assert_eq!(bus.controller.ops.first(), Some(&Op::Issue(BusOp::Start)));
        assert_eq!(bus.controller.ops[bus.controller.ops.len() - 2], Op::Issue(BusOp::Stop));
    }

    #[test]
    fn test_nack_is_reported_not_an_error() {
        let mut controller = MockController::new();
        controller.nack_bytes.push(0x70);
        let mut bus = BusDriver::new(controller, &I2cConfig::STANDARD, RetryPolicy::Forever);

        assert_eq!(bus.send(0x70), Ok(Ack::NotAcknowledged));
        assert_eq!(bus.send(0x01), Ok(Ack::Acknowledged));
    }

    #[test]
    fn test_read_acks_all_but_last() {
        let mut controller = MockController::new();
        controller.rx = vec![0x12, 0x34];
        let mut bus = BusDriver::new(controller, &I2cConfig::STANDARD, RetryPolicy::Forever);

        let mut buf = [0u8; 2];
        let ack = bus.read(0x38, &mut buf).unwrap();

        assert_eq!(ack, Ack::Acknowledged);
        assert_eq!(buf, [0x12, 0x34]);
        let issued: Vec<BusOp> = bus
            .controller
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Issue(o) => Some(*o),
                _ => None,
            })
            .collect();
        assert_eq!(
            issued,
            vec![
                BusOp::Start,
                BusOp::Receive,
                BusOp::SendAck,
                BusOp::Receive,
                BusOp::SendNack,
                BusOp::Stop,
            ]
        );
        assert!(bus.controller.ops.contains(&Op::Load(0x71)));
    }

    #[test]
    fn test_bounded_policy_times_out() {
        let mut controller = MockController::new();
        controller.never_completes = true;
        let mut bus = BusDriver::new(controller, &I2cConfig::STANDARD, RetryPolicy::Attempts(10));

        assert_eq!(bus.start(), Err(BusError::Timeout));
        assert_eq!(bus.controller.polls.get(), 10);
        // Flag is left alone on timeout
        assert!(!bus.controller.ops.contains(&Op::Clear));
    }

    #[test]
    fn test_bounded_policy_same_happy_path() {
        let mut forever = BusDriver::new(MockController::new(), &I2cConfig::STANDARD, RetryPolicy::Forever);
        let mut bounded =
            BusDriver::new(MockController::new(), &I2cConfig::STANDARD, RetryPolicy::Attempts(100));

        forever.write(0x38, &[1, 2, 3]).unwrap();
        bounded.write(0x38, &[1, 2, 3]).unwrap();

        assert_eq!(forever.controller.ops, bounded.controller.ops);
    }
}
