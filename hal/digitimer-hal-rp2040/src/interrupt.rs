//! Global interrupt masking on Cortex-M0+

use digitimer_hal::InterruptMask;

/// Masks interrupts with `cpsid`/`cpsie` for the duration of the closure
#[derive(Debug, Default, Clone, Copy)]
pub struct CortexMask;

impl InterruptMask for CortexMask {
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        cortex_m::interrupt::free(|_| f())
    }
}
