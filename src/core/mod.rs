//! Core types, lag/window primitives and run reports.

pub mod report;
pub mod types;
pub mod window;

pub use report::SolaReport;
pub use types::*;
pub use window::{window, window_mut, Lag};
