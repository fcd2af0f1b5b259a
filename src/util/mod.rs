//! Utility modules

pub mod clock;
pub mod time;
