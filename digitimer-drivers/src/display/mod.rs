//! Display drivers

pub mod lcd;
pub mod segment;

pub use lcd::ExpanderLcd;
pub use segment::MultiplexedSegments;
