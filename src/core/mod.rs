//! Fault-tolerant transcoding core.

pub mod decoder;
pub mod encoder;
pub mod pipeline;
pub mod substitution;
pub mod transform;

pub use decoder::Decoder;
pub use encoder::SafeEncoder;
pub use pipeline::{PipelineStats, StreamPipeline};
pub use substitution::SubstitutionTable;
pub use transform::{Progress, Transform};
