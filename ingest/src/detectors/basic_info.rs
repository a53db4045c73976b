use super::*;

pub struct BasicInfo {}

impl BasicInfo {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Detector for BasicInfo {
    fn name(&self) -> &'static str {
        "Basic info"
    }

    fn save_priority(&self) -> u32 {
        500
    }

    async fn process(
        &mut self,
        match_: &mut Match,
        _live: &LiveState,
        event: &DemoEvent,
        _storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        if let DemoEvent::Start(header) = event {
            tracing::debug!(
                "Demo header: {} at {} ticks/s, {} ticks total",
                header.map,
                header.tick_rate,
                header.playback_ticks
            );
            match_.map = header.map.clone();
            match_.tickrate = header.tick_rate;
            match_.duration_ticks = header.playback_ticks;
            match_.date = chrono::Utc::now();
        }
        Ok(())
    }

    #[tracing::instrument(name = "BasicInfo", skip_all)]
    async fn save_data(
        &mut self,
        match_: &mut Match,
        storage: &dyn MatchStorage,
    ) -> Result<(), StorageError> {
        storage.save_match(match_).await
    }
}
