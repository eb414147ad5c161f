//! Shared utilities: logging, clocks and path helpers

pub mod logger;
pub mod time_utils;
pub(crate) mod path_utils;

pub use time_utils::{Clock, FixedClock, SystemClock};
