use common::Match;

use crate::demo::{DemoEvent, LiveState};
use crate::storage::{MatchStorage, StorageError};

pub mod basic_info;
pub mod bomb_status;
pub mod kills;
pub mod players;
pub mod rounds;
pub mod teams;

pub use basic_info::BasicInfo;
pub use bomb_status::BombStatus;
pub use kills::Kills;
pub use players::Players;
pub use rounds::Rounds;
pub use teams::Teams;

/// One unit of aggregation logic. A detector reduces the event stream into
/// its slice of the match context, then persists that slice once the stream
/// has ended. Closed set; extend by adding a variant to [`all`].
#[async_trait::async_trait]
pub trait Detector: Send {
    fn name(&self) -> &'static str;

    /// Lower priorities save earlier; later detectors may rely on rows
    /// written by earlier ones.
    fn save_priority(&self) -> u32;

    /// Reduce a single event into the match context. Errors are contained
    /// by the session loop and never abort the run.
    async fn process(
        &mut self,
        match_: &mut Match,
        live: &LiveState,
        event: &DemoEvent,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError>;

    /// Persist this detector's slice. Invoked once, after the stream ended,
    /// in ascending priority order.
    async fn save_data(
        &mut self,
        match_: &mut Match,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError>;
}

/// All detectors, in registration order. Events are dispatched to each in
/// this order; the save phase reorders by [`Detector::save_priority`].
pub fn all() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(BasicInfo::new()),
        Box::new(Players::new()),
        Box::new(Teams::new()),
        Box::new(Rounds::new()),
        Box::new(Kills::new()),
        Box::new(BombStatus::new()),
    ]
}
