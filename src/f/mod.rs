pub mod datasets;
pub mod metrics;

pub use datasets::*;
pub use metrics::*;
