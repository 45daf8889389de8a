//! Busy-wait policy
//!
//! Every blocking operation in the firmware waits for a hardware flag.
//! The policy decides whether that wait may give up.

/// A bounded wait ran out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timeout;

/// How long a busy-wait is allowed to spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetryPolicy {
    /// Spin until the condition holds. An unresponsive peripheral stalls
    /// the caller for good.
    #[default]
    Forever,
    /// Give up after this many unsuccessful polls
    Attempts(u32),
}

impl RetryPolicy {
    /// Poll `ready` until it returns true
    ///
    /// Returns `Err(Timeout)` only under [`RetryPolicy::Attempts`].
    pub fn spin_until(&self, mut ready: impl FnMut() -> bool) -> Result<(), Timeout> {
        match *self {
            RetryPolicy::Forever => {
                while !ready() {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            RetryPolicy::Attempts(limit) => {
                for _ in 0..limit {
                    if ready() {
                        return Ok(());
                    }
                    core::hint::spin_loop();
                }
                Err(Timeout)
            }
        }
    }

    /// Whether `attempts` polls have used up the budget
    pub fn exhausted(&self, attempts: u32) -> bool {
        match *self {
            RetryPolicy::Forever => false,
            RetryPolicy::Attempts(limit) => attempts >= limit,
        }
    }
}
