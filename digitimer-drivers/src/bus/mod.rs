//! Two-wire bus

pub mod bitbang;
pub mod driver;

pub use bitbang::BitBangController;
pub use driver::{BusDriver, BusError};
