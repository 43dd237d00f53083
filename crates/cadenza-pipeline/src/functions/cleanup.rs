//! Cleanup function.
//!
//! Moves finished production output from its working prefixes to the final
//! prefixes, deleting the originals. The relocation work itself lives in
//! [`cadenza_storage::Relocator`]; this handler supplies the configured
//! prefix pairs and maps the outcome to the invocation contract.

use std::sync::Arc;

use cadenza_core::models::{FunctionResponse, RelocationTask};
use cadenza_core::PipelineError;
use cadenza_storage::{Relocator, Storage};

pub struct Cleanup {
    relocator: Relocator,
    task: RelocationTask,
}

impl Cleanup {
    pub fn new(storage: Arc<dyn Storage>, task: RelocationTask) -> Self {
        Self {
            relocator: Relocator::new(storage),
            task,
        }
    }

    /// Handle one scheduler invocation.
    pub async fn handle(&self) -> FunctionResponse {
        match self.relocator.relocate(&self.task).await {
            Ok(report) => {
                tracing::info!(
                    pairs = report.pairs.len(),
                    relocated = report.total_relocated(),
                    "Cleanup complete"
                );
                FunctionResponse::ok("Files moved and deleted successfully.")
            }
            Err(e) => {
                let e = PipelineError::from(e);
                tracing::error!(error = %e, "Cleanup failed");
                FunctionResponse::error(format!("Error processing files: {}", e))
            }
        }
    }
}
