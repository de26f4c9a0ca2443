pub mod detector;
pub mod aggregator;

pub use aggregator::{aggregate, Aggregator};
pub use detector::{detect, Detector, IgnoreSet, CONTEXT_RADIUS};
