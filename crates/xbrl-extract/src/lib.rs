mod accumulator;
pub mod assemble;
pub mod error;
pub mod extract;
pub mod values;

pub use assemble::assemble;
pub use error::{AssembleError, ExtractError, InstanceError};
pub use extract::{ExtractOptions, ExtractionSummary, SkippedInstance, extract};
