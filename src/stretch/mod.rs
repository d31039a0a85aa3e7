pub mod blend;
pub mod correlation;
pub mod engine;
pub mod intervals;
pub mod lag_search;
pub mod params;

pub use engine::{FrameRecord, Phase, SolaEngine, SolaOutput, Synthesis};
pub use intervals::{FrameGeometry, Intervals};
pub use params::SolaParams;
