// ── Session lifecycle ──
//
// Full lifecycle for one device connection: manifest load, first poll,
// entity construction, background polling, teardown. Exactly one
// Session exists per configured device; sessions share nothing.

use std::sync::Arc;

use indexmap::IndexMap;
use mada_api::{DeviceClient, TransportConfig};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::coordinator::{PollCoordinator, PollState};
use crate::dispatch::CommandDispatcher;
use crate::entity::EntityView;
use crate::error::CoreError;
use crate::manifest;
use crate::model::{DeviceInfo, EntityDefinition};

/// A live connection to one irrigation controller.
///
/// Cheaply cloneable via `Arc`. Created by [`establish`](Self::establish);
/// must be torn down with [`teardown`](Self::teardown) to stop the poll
/// task.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    coordinator: PollCoordinator,
    device: DeviceInfo,
    definitions: IndexMap<String, Arc<EntityDefinition>>,
    entities: Vec<EntityView>,
}

impl Session {
    /// Establish a session with the device at `config.host`.
    ///
    /// Order matters and matches the device contract:
    /// 1. fetch the manifest once (soft-fail: errors yield an empty
    ///    entity table, the session still comes up);
    /// 2. run the first status fetch to completion -- the session is not
    ///    ready before its outcome, success or failure, is recorded;
    /// 3. construct every entity view, exactly once, for the life of
    ///    the session;
    /// 4. start the periodic poll task.
    ///
    /// Only configuration problems (unparseable host) fail establishment.
    pub async fn establish(config: SessionConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = DeviceClient::new(&config.host, &transport)?;

        let (definitions, device) = manifest::load(&client).await;

        let coordinator = PollCoordinator::new(client.clone(), config.poll_interval);
        if let Err(e) = coordinator.start().await {
            // Recorded in PollState; entities read as unavailable until
            // a later cycle succeeds.
            warn!(host = %config.host, error = %e, "first status poll failed");
        }

        let dispatcher = CommandDispatcher::new(client, coordinator.clone());

        let definitions: IndexMap<String, Arc<EntityDefinition>> = definitions
            .into_iter()
            .map(|(id, def)| (id, Arc::new(def)))
            .collect();

        let entities: Vec<EntityView> = definitions
            .values()
            .map(|def| EntityView::new(Arc::clone(def), coordinator.clone(), dispatcher.clone()))
            .collect();

        info!(
            host = %config.host,
            entities = entities.len(),
            "session established"
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                config,
                coordinator,
                device,
                definitions,
                entities,
            }),
        })
    }

    /// The configured device host.
    pub fn host(&self) -> &str {
        &self.inner.config.host
    }

    /// Device-identity record for the host's device registry.
    pub fn device(&self) -> &DeviceInfo {
        &self.inner.device
    }

    /// All entity views, in manifest order.
    pub fn entities(&self) -> &[EntityView] {
        &self.inner.entities
    }

    /// Look up one entity view by id.
    pub fn entity(&self, id: &str) -> Option<&EntityView> {
        let index = self.inner.definitions.get_index_of(id)?;
        self.inner.entities.get(index)
    }

    /// The entity-definition table, keyed by id.
    pub fn definitions(&self) -> &IndexMap<String, Arc<EntityDefinition>> {
        &self.inner.definitions
    }

    /// The session's poll coordinator.
    pub fn coordinator(&self) -> &PollCoordinator {
        &self.inner.coordinator
    }

    /// Subscribe to snapshot/availability changes.
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.inner.coordinator.subscribe()
    }

    /// Schedule an out-of-cycle status refresh.
    pub fn request_refresh(&self) {
        self.inner.coordinator.request_refresh();
    }

    /// Stop the poll task and wait for it to finish. The only terminal
    /// condition for a session.
    pub async fn teardown(&self) {
        self.inner.coordinator.shutdown().await;
        info!(host = %self.inner.config.host, "session torn down");
    }
}
