//! Output formatting
//!
//! Text report on stdout, optional JSON report on disk.

pub mod json;
pub mod text;
