mod layered;
mod probe;

pub use layered::LayerResolver;
pub use probe::{DiskProbe, Probe};
