use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::session::{Submission, SubmissionFailure, SubmissionGateway, SubmitOutcome};
use crate::store::AttemptStore;

/// Runs each submission on its own thread and reports the outcome on a
/// channel the event loop drains into `SessionController::finish_submit`.
pub struct BackgroundGateway<S> {
    store: Arc<S>,
    tx: mpsc::Sender<SubmitOutcome>,
}

impl<S> BackgroundGateway<S>
where
    S: AttemptStore + Send + Sync + 'static,
{
    pub fn new(store: S) -> (Self, mpsc::Receiver<SubmitOutcome>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                store: Arc::new(store),
                tx,
            },
            rx,
        )
    }
}

impl<S> SubmissionGateway for BackgroundGateway<S>
where
    S: AttemptStore + Send + Sync + 'static,
{
    fn submit_attempt(&mut self, submission: Submission) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let outcome = store.persist(&submission).map_err(|e| {
                warn!(error = %e, "store failed");
                SubmissionFailure::new(e.to_string())
            });
            if tx.send(outcome).is_err() {
                debug!("session gone before submission finished");
            }
        });
    }
}
