pub mod event;
pub mod job;
pub mod relocation;
pub mod response;

pub use event::PipelineEvent;
pub use job::{OutputUploadMode, ProcessingJobSpec, SubmittedJob};
pub use relocation::{PairReport, PrefixPair, RelocatedObject, RelocationReport, RelocationTask};
pub use response::FunctionResponse;
