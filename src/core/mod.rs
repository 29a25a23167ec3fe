//! DuPont calculation and period ordering

pub mod dupont;
pub mod periods;

pub use self::dupont::{DupontCalculator, DupontReport};
pub use self::periods::{chronological_order, parse_period, Period};
