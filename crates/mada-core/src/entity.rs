// ── Entity projection ──
//
// One generic view type serves all three entity kinds; behavior is
// selected by the definition's `kind` discriminant. Reads are computed
// on demand against the coordinator's current snapshot -- never cached,
// so a view always reflects the latest poll.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, warn};

use crate::coordinator::PollCoordinator;
use crate::dispatch::{CommandDispatcher, WritePayload};
use crate::model::{EntityDefinition, EntityKind};
use crate::paths;

/// Runtime projection of one manifest entity against the live snapshot.
///
/// Constructed exactly once per definition at session establishment and
/// alive for the whole session. Holds handles, not data: every read goes
/// through the coordinator's current
/// [`PollState`](crate::coordinator::PollState).
#[derive(Clone)]
pub struct EntityView {
    def: Arc<EntityDefinition>,
    coordinator: PollCoordinator,
    dispatcher: CommandDispatcher,
}

impl EntityView {
    pub(crate) fn new(
        def: Arc<EntityDefinition>,
        coordinator: PollCoordinator,
        dispatcher: CommandDispatcher,
    ) -> Self {
        Self {
            def,
            coordinator,
            dispatcher,
        }
    }

    pub fn definition(&self) -> &EntityDefinition {
        &self.def
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    pub fn kind(&self) -> EntityKind {
        self.def.kind
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The raw resolved value, or `None` when unavailable.
    ///
    /// Unavailable means any of: no successful poll yet, the most recent
    /// cycle failed (the stale snapshot is deliberately not served), the
    /// declared data path is shorter than two keys, or the path does not
    /// resolve in the current document.
    pub fn value(&self) -> Option<Value> {
        let state = self.coordinator.state();
        if !state.is_available() {
            return None;
        }
        let snapshot = state.snapshot?;
        paths::resolve(&snapshot, &self.def.data_path).cloned()
    }

    /// Whether this entity currently has a usable value.
    pub fn is_available(&self) -> bool {
        self.value().is_some()
    }

    /// Switch reading: truthiness coercion of the resolved value.
    pub fn is_on(&self) -> Option<bool> {
        self.value().map(|v| truthy(&v))
    }

    /// Numeric reading; non-numeric resolved values are unavailable.
    pub fn number(&self) -> Option<f64> {
        match self.value()? {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    // ── Writes (fire-and-forget) ─────────────────────────────────────

    /// Switch on. Failures are logged, never propagated; the snapshot is
    /// only updated by the refresh a successful write schedules.
    pub async fn turn_on(&self) {
        self.write_bool(true).await;
    }

    /// Switch off.
    pub async fn turn_off(&self) {
        self.write_bool(false).await;
    }

    async fn write_bool(&self, on: bool) {
        if self.def.kind != EntityKind::Switch {
            warn!(entity = %self.def.id, kind = self.def.kind.as_str(),
                "ignoring boolean write to non-switch entity");
            return;
        }
        if let Err(e) = self.dispatcher.write(&self.def, WritePayload::Bool(on)).await {
            error!(entity = %self.def.id, error = %e, "switch write failed");
        }
    }

    /// Number write. Values outside the declared `[min, max]` are
    /// rejected before any network traffic. Failures are logged, never
    /// propagated.
    pub async fn set_value(&self, value: f64) {
        if self.def.kind != EntityKind::Number {
            warn!(entity = %self.def.id, kind = self.def.kind.as_str(),
                "ignoring numeric write to non-number entity");
            return;
        }
        if let Err(e) = self
            .dispatcher
            .write(&self.def, WritePayload::Number(value))
            .await
        {
            error!(entity = %self.def.id, error = %e, "number write failed");
        }
    }
}

/// Truthiness in the source integration's sense: `false`, `0`, `""`,
/// `null`, and empty containers are off; everything else is on.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
