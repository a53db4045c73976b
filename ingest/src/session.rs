use common::Match;

use crate::demo::{DecodeError, DemoEvent, LiveState};
use crate::detectors;
use crate::storage::{MatchStorage, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum HandleError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("demo stream ended without an end signal")]
    Truncated,
    #[error("storing match data: {0}")]
    Storage(#[from] StorageError),
}

/// Drives one reconstruction run: every detector consumes the decoded event
/// stream, then persists its slice in save-priority order.
pub struct DemoSession {
    storage: std::sync::Arc<dyn MatchStorage>,
}

impl DemoSession {
    pub fn new(storage: std::sync::Arc<dyn MatchStorage>) -> Self {
        Self { storage }
    }

    /// Reduce the stream into the match shell and persist the result.
    ///
    /// Either returns the fully populated match or a single terminal error;
    /// a stream that fails to decode or never signals its end discards the
    /// match without entering the save phase.
    #[tracing::instrument(name = "DemoSession", skip_all, fields(external_id = %match_.external_id))]
    pub async fn run<I>(&self, events: I, mut match_: Match) -> Result<Match, HandleError>
    where
        I: IntoIterator<Item = Result<DemoEvent, DecodeError>>,
    {
        tracing::debug!("Starting processing");

        let mut detectors = detectors::all();
        let mut live = LiveState::default();
        let mut ended = false;

        for event in events {
            let event = event?;
            live.apply(&event);

            if matches!(event, DemoEvent::End) {
                ended = true;
                break;
            }

            // Handlers are awaited one after another, so every detector sees
            // the events of a tick in decode order and no handler interleaves
            // with a later event.
            for detector in detectors.iter_mut() {
                if let Err(error) = detector
                    .process(&mut match_, &live, &event, self.storage.as_ref())
                    .await
                {
                    tracing::error!(%error, detector = detector.name(), "Event handler failed");
                }
            }
        }

        if !ended {
            return Err(HandleError::Truncated);
        }

        tracing::debug!("Demo has ended, saving data");

        detectors.sort_by_key(|detector| detector.save_priority());
        for detector in detectors.iter_mut() {
            detector
                .save_data(&mut match_, self.storage.as_ref())
                .await?;
        }

        Ok(match_)
    }
}
