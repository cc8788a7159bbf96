//! Background execution for interactive hosts
//!
//! A host with its own event loop (a GUI, an editor extension) runs the
//! generation on a blocking worker and drains the progress channel on its own
//! thread.

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

use crate::codegen::{ClassManager, CompositeKeyReport, GenerationOptions, Progress};
use crate::error::Result;
use crate::parser::Table;

/// Run [`ClassManager::generate`] on tokio's blocking pool.
///
/// Progress events arrive on the returned receiver in generation order; the
/// channel closes when the run ends. The run can't be cancelled once started.
/// Must be called from within a tokio runtime.
pub fn spawn_generation(
    manager: ClassManager,
    options: GenerationOptions,
    tables: Vec<Table>,
) -> (
    JoinHandle<Result<CompositeKeyReport>>,
    UnboundedReceiver<Progress>,
) {
    let (tx, rx) = mpsc::unbounded_channel();

    let handle = tokio::task::spawn_blocking(move || {
        manager.generate(&options, &tables, &mut |progress| {
            // The receiver may be gone; the run still completes
            let _ = tx.send(progress.clone());
        })
    });

    (handle, rx)
}
