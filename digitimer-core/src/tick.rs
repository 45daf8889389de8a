//! Refresh tick counter
//!
//! Counts display redraws so slow effects (blink, staged reveal) can be
//! derived from the fast polling loop.

/// Wrapping redraw counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RefreshTicks {
    count: u16,
    ceiling: u16,
}

impl RefreshTicks {
    /// Create a counter that resets to zero once it exceeds `ceiling`
    pub const fn new(ceiling: u16) -> Self {
        Self { count: 0, ceiling }
    }

    /// Current count
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Count one redraw and return the new value
    pub fn advance(&mut self) -> u16 {
        self.count = self.count.wrapping_add(1);
        self.count
    }

    /// Apply the ceiling; called once the redraw has used the count
    pub fn settle(&mut self) {
        if self.count > self.ceiling {
            self.count = 0;
        }
    }

    /// Whether the current count lands on a multiple of `period`
    pub fn every(&self, period: u16) -> bool {
        period != 0 && self.count % period == 0
    }
}
