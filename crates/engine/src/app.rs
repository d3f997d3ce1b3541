//! Composition root: wires the catalog, detector, stores, and clock into a
//! running game - one actor task plus the 1 Hz expiry ticker.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use snaphunt_domain::{Challenge, GameEvent, GameSession, ObjectCatalog};

use crate::application::ports::outbound::{
    BlobStorePort, ClockPort, DetectionPort, EventBusPort, RandomPort, SnapshotStorePort,
};
use crate::application::services::{GameHandle, GameService};
use crate::error::EngineError;
use crate::infrastructure::clock::{SystemClock, SystemRandom};
use crate::infrastructure::event_bus::BroadcastEventBus;
use crate::infrastructure::persistence::{FileBlobStore, FileSnapshotStore};
use crate::infrastructure::settings::GameConfig;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub struct Game {
    handle: GameHandle,
    event_bus: Arc<BroadcastEventBus<GameEvent>>,
    catalog: ObjectCatalog,
    config: GameConfig,
    random: Arc<dyn RandomPort>,
    actor: JoinHandle<()>,
    ticker: JoinHandle<()>,
}

impl Game {
    /// Wire a game from explicit collaborators. Loads the saved session (a
    /// missing or corrupt snapshot starts fresh), spawns the actor, and
    /// starts ticking.
    pub async fn start(
        config: GameConfig,
        catalog: ObjectCatalog,
        detector: Arc<dyn DetectionPort>,
        snapshot_store: Arc<dyn SnapshotStorePort>,
        blob_store: Arc<dyn BlobStorePort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let session = match snapshot_store.load().await {
            Ok(Some(snapshot)) => GameSession::from_snapshot(snapshot),
            Ok(None) => GameSession::new(),
            Err(err) => {
                warn!(error = %err, "failed to load saved session; starting fresh");
                GameSession::new()
            }
        };

        let event_bus = Arc::new(BroadcastEventBus::new());
        let (handle, actor) = GameService::spawn(
            session,
            config.confidence_threshold,
            detector,
            clock,
            snapshot_store,
            blob_store,
            Arc::clone(&event_bus) as Arc<dyn EventBusPort<GameEvent>>,
        );
        let ticker = spawn_ticker(handle.clone());

        Self {
            handle,
            event_bus,
            catalog,
            config,
            random,
            actor,
            ticker,
        }
    }

    /// Convenience wiring for local on-device storage under
    /// `config.data_dir`, with the system clock and RNG.
    pub async fn with_local_storage(
        config: GameConfig,
        catalog: ObjectCatalog,
        detector: Arc<dyn DetectionPort>,
    ) -> Self {
        let snapshot_store = Arc::new(FileSnapshotStore::new(&config.data_dir));
        let blob_store = Arc::new(FileBlobStore::new(&config.data_dir));
        Self::start(
            config,
            catalog,
            detector,
            snapshot_store,
            blob_store,
            Arc::new(SystemClock::new()),
            Arc::new(SystemRandom::new()),
        )
        .await
    }

    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Subscribe to engine notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.event_bus.subscribe()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ObjectCatalog {
        &self.catalog
    }

    /// Start a challenge with targets sampled from the catalog per the
    /// configured per-tier counts.
    pub async fn start_sampled_challenge(&self) -> Result<Challenge, EngineError> {
        let mut pick = |n: usize| self.random.pick_index(n);
        let objects = self.catalog.sample(&self.config.target_counts, &mut pick)?;
        self.handle
            .start_challenge(objects, self.config.challenge_minutes)
            .await
    }

    /// Flush a final snapshot and stop the actor and ticker.
    pub async fn shutdown(self) {
        if let Err(err) = self.handle.shutdown().await {
            warn!(error = %err, "engine already stopped at shutdown");
        }
        self.ticker.abort();
        if let Err(err) = self.actor.await {
            if !err.is_cancelled() {
                warn!(error = %err, "actor task ended abnormally");
            }
        }
        debug!("game shut down");
    }
}

fn spawn_ticker(handle: GameHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        // First tick of tokio's interval fires immediately; harmless here
        loop {
            interval.tick().await;
            if handle.tick().await.is_err() {
                break;
            }
        }
    })
}
